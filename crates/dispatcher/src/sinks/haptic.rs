//! HapticSink - pulses a device actuator on accepted events

use std::time::Duration;

use contracts::{LogEvent, LogSink, PipelineError, PriorityFilter, SinkKind};

/// Default pulse duration.
pub const DEFAULT_PULSE: Duration = Duration::from_millis(75);

/// Platform boundary: whatever can produce a haptic pulse.
pub trait Actuator: Send + Sync {
    fn pulse(&self, duration: Duration);
}

/// Sink that pulses an actuator for every accepted event.
///
/// A host without an actuator registers `None`; the sink then accepts and
/// ignores events.
pub struct HapticSink {
    actuator: Option<Box<dyn Actuator>>,
    duration: Duration,
    filter: Option<PriorityFilter>,
}

impl HapticSink {
    pub fn new(actuator: Option<Box<dyn Actuator>>) -> Self {
        Self {
            actuator,
            duration: DEFAULT_PULSE,
            filter: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_filter(mut self, filter: PriorityFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

impl LogSink for HapticSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Haptic
    }

    fn filter(&self) -> Option<&PriorityFilter> {
        self.filter.as_ref()
    }

    fn on_accepted(&self, _event: &LogEvent) -> Result<(), PipelineError> {
        if let Some(actuator) = &self.actuator {
            actuator.pulse(self.duration);
        }
        Ok(())
    }
}
