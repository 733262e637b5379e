//! PipelineBlueprint - declarative pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Priority;

/// Default bound for a file writer's work queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Declarative description of a dispatcher: one default block-list plus an
/// ordered sink list (order in the file = dispatch order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineBlueprint {
    /// Priorities suppressed by the tree-wide default filter.
    #[serde(default)]
    pub default_filter: Vec<Priority>,

    /// Sinks, in dispatch order. Duplicates are permitted.
    #[serde(default)]
    pub sinks: Vec<SinkSpec>,
}

/// One sink entry, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkSpec {
    Console {
        /// Optional per-sink block-list overriding the default filter.
        #[serde(default)]
        filter: Option<Vec<Priority>>,
    },
    Crash {
        /// Message prefix marking a log line as a crash report.
        #[serde(default = "default_crash_prefix")]
        prefix: String,
    },
    FileWriter {
        /// Preferred output directory; falls back when unusable.
        #[serde(default)]
        directory: Option<PathBuf>,
        /// Prefer the external directory when no explicit directory is usable.
        #[serde(default)]
        prefer_external: bool,
        /// External storage location, used only with `prefer_external`.
        #[serde(default)]
        external_dir: Option<PathBuf>,
        /// Application identity embedded in the log file name.
        app_id: String,
        #[serde(default = "default_queue_capacity")]
        queue_capacity: usize,
        #[serde(default)]
        filter: Option<Vec<Priority>>,
    },
    Haptic {
        /// Pulse duration in milliseconds.
        #[serde(default = "default_pulse_ms")]
        pulse_ms: u64,
        #[serde(default)]
        filter: Option<Vec<Priority>>,
    },
}

fn default_crash_prefix() -> String {
    "CRASH: ".to_string()
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_pulse_ms() -> u64 {
    75
}
