//! LogEvent - the value passed through the fan-out chain.

use std::error::Error;
use std::sync::Arc;

use crate::Priority;

/// One log call: priority, tag, message and an optional cause.
///
/// Immutable once constructed. A sink that needs to rewrite the message
/// (see `CrashSink`) derives new data instead of mutating in place.
/// Cloneable because the file writer queues events by value.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub priority: Priority,
    pub tag: String,
    pub message: String,
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl LogEvent {
    /// Create an event without a cause.
    pub fn new(priority: Priority, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            priority,
            tag: tag.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Attach an error as the cause of this event.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_construction() {
        let event = LogEvent::new(Priority::Info, "Main", "started");
        assert_eq!(event.priority, Priority::Info);
        assert_eq!(event.tag, "Main");
        assert_eq!(event.message, "started");
        assert!(event.cause.is_none());
    }

    #[test]
    fn test_event_with_cause() {
        let io = std::io::Error::other("disk on fire");
        let event = LogEvent::new(Priority::Error, "Fs", "write failed").with_cause(io);
        let cause = event.cause.as_ref().unwrap();
        assert_eq!(cause.to_string(), "disk on fire");
    }
}
