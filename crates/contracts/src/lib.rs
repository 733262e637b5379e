//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Event Model
//! - A log call is an ephemeral [`LogEvent`] passed by reference through the fan-out
//! - Sinks gate on [`Priority`] through a block-list [`PriorityFilter`]

mod analytics;
mod blueprint;
mod error;
mod event;
mod filter;
mod priority;
mod sink;

pub use analytics::{events, AnalyticsConsumer, AttrMap, AttrValue};
pub use blueprint::{PipelineBlueprint, SinkSpec, DEFAULT_QUEUE_CAPACITY};
pub use error::PipelineError;
pub use event::LogEvent;
pub use filter::{gate, PriorityFilter};
pub use priority::Priority;
pub use sink::{BypassOutput, CrashReporter, LogSink, SinkKind};
