//! # Analytics
//!
//! Fan-out registry for analytics consumers.
//!
//! Independent of the log dispatcher: application code triggers these
//! operations directly. The fanout is an explicitly constructed value the
//! host passes around; there is no process-wide singleton.

mod consumers;
mod fanout;

pub use consumers::TracingConsumer;
pub use contracts::{events, AnalyticsConsumer, AttrMap, AttrValue};
pub use fanout::{AnalyticsFanout, ConsumerId};
