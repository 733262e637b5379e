//! LogSink trait - the capability every dispatched-to component implements.

use serde::{Deserialize, Serialize};
use std::error::Error;

use crate::{gate, LogEvent, PipelineError, Priority, PriorityFilter};

/// Stable kind identifier registered by every sink at construction.
///
/// Used for removal-by-kind instead of runtime type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    Console,
    Crash,
    FileWriter,
    Haptic,
}

/// A consumer of dispatched log events.
///
/// The dispatcher composes `accepts` and `on_accepted` unconditionally:
/// gate, then act. Implementations must never perform their effect outside
/// that composition, and must never duplicate gating logic beyond
/// overriding `accepts`.
pub trait LogSink: Send + Sync {
    /// The kind this sink registered at construction.
    fn kind(&self) -> SinkKind;

    /// The sink's own filter, if it carries one.
    fn filter(&self) -> Option<&PriorityFilter> {
        None
    }

    /// Whether an event of this priority should reach `on_accepted`.
    ///
    /// Default: the shared gate — own filter when present, otherwise the
    /// dispatcher's default filter.
    fn accepts(&self, priority: Priority, fallback: &PriorityFilter) -> bool {
        gate(self.filter(), fallback, priority)
    }

    /// The sink's effect. Only ever invoked after `accepts` returned true.
    fn on_accepted(&self, event: &LogEvent) -> Result<(), PipelineError>;
}

/// The raw output path behind the dispatcher.
///
/// Delivery through this trait never re-enters sink fan-out, which lets a
/// sink report its own internal failure without risking recursion.
pub trait BypassOutput: Send + Sync {
    fn deliver(&self, event: &LogEvent);
}

/// Interface a crash-reporting backend implements.
///
/// Invoked only for highest-severity events whose message carried the
/// configured crash prefix; `message` arrives with the prefix stripped.
pub trait CrashReporter: Send + Sync {
    fn report_crash(
        &self,
        priority: Priority,
        tag: &str,
        message: &str,
        cause: Option<&(dyn Error + Send + Sync)>,
    );
}
