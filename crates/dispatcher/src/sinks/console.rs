//! ConsoleSink - echoes events via tracing

use tracing::{debug, error, info, trace, warn};

use contracts::{
    BypassOutput, LogEvent, LogSink, PipelineError, Priority, PriorityFilter, SinkKind,
};

/// Sink that echoes every accepted event to the console.
///
/// Doubles as the dispatcher's default raw output: bypass deliveries use
/// the same echo, so a sink's internal failure always shows up somewhere.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    filter: Option<PriorityFilter>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a sink-local block-list overriding the default filter.
    pub fn with_filter(mut self, filter: PriorityFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    fn echo(event: &LogEvent) {
        let cause = event.cause.as_ref().map(|c| c.to_string());
        match event.priority {
            Priority::Verbose => {
                trace!(tag = %event.tag, cause = ?cause, "{}", event.message)
            }
            Priority::Debug => {
                debug!(tag = %event.tag, cause = ?cause, "{}", event.message)
            }
            Priority::Info => {
                info!(tag = %event.tag, cause = ?cause, "{}", event.message)
            }
            Priority::Warn => {
                warn!(tag = %event.tag, cause = ?cause, "{}", event.message)
            }
            Priority::Error | Priority::Fatal => {
                error!(tag = %event.tag, cause = ?cause, "{}", event.message)
            }
        }
    }
}

impl LogSink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn filter(&self) -> Option<&PriorityFilter> {
        self.filter.as_ref()
    }

    fn on_accepted(&self, event: &LogEvent) -> Result<(), PipelineError> {
        Self::echo(event);
        Ok(())
    }
}

impl BypassOutput for ConsoleSink {
    fn deliver(&self, event: &LogEvent) {
        Self::echo(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_accepts_everything_by_default() {
        let sink = ConsoleSink::new();
        let fallback = PriorityFilter::empty();
        for priority in Priority::ALL {
            assert!(sink.accepts(priority, &fallback));
        }
        let event = LogEvent::new(Priority::Info, "Tag", "hello");
        assert!(sink.on_accepted(&event).is_ok());
    }

    #[test]
    fn test_console_sink_own_filter() {
        let sink = ConsoleSink::new().with_filter(PriorityFilter::blocking([Priority::Verbose]));
        let fallback = PriorityFilter::blocking(Priority::ALL);
        assert!(!sink.accepts(Priority::Verbose, &fallback));
        // own filter wins over the all-blocking fallback
        assert!(sink.accepts(Priority::Error, &fallback));
    }
}
