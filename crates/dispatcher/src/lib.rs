//! # Dispatcher
//!
//! Log-event distribution core.
//!
//! Responsibilities:
//! - Fan out each [`LogEvent`](contracts::LogEvent) to every registered sink, in order
//! - Gate every sink through the two-level priority-filter protocol
//! - Keep one sink's failure from reaching the others
//! - Offer a bypass path so a sink can report its own failure without recursion

pub mod dispatcher;
pub mod metrics;
pub mod sinks;

pub use contracts::{LogEvent, LogSink, Priority, PriorityFilter, SinkKind};
pub use dispatcher::{Dispatcher, DispatcherBuilder, SinkId};
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use sinks::{Actuator, ConsoleSink, CrashSink, FileWriterConfig, FileWriterSink, HapticSink};
