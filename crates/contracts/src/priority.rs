//! Log priority levels, ordered from most verbose to most severe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PipelineError;

/// Severity of a log event.
///
/// Ordering follows severity: `Verbose < Debug < Info < Warn < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Priority {
    /// All priorities, in severity order.
    pub const ALL: [Priority; 6] = [
        Priority::Verbose,
        Priority::Debug,
        Priority::Info,
        Priority::Warn,
        Priority::Error,
        Priority::Fatal,
    ];

    /// Single-letter marker used in the file line format.
    ///
    /// `Fatal` maps to `WTF`, everything else to its initial.
    pub fn letter(self) -> &'static str {
        match self {
            Priority::Verbose => "V",
            Priority::Debug => "D",
            Priority::Info => "I",
            Priority::Warn => "W",
            Priority::Error => "E",
            Priority::Fatal => "WTF",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Verbose => "verbose",
            Priority::Debug => "debug",
            Priority::Info => "info",
            Priority::Warn => "warn",
            Priority::Error => "error",
            Priority::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

impl FromStr for Priority {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v" | "verbose" => Ok(Priority::Verbose),
            "d" | "debug" => Ok(Priority::Debug),
            "i" | "info" => Ok(Priority::Info),
            "w" | "warn" | "warning" => Ok(Priority::Warn),
            "e" | "error" => Ok(Priority::Error),
            "f" | "wtf" | "fatal" => Ok(Priority::Fatal),
            other => Err(PipelineError::Other(format!(
                "unknown priority: {other}"
            ))),
        }
    }
}
