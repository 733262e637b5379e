//! CLI error types

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error (from contract)
    #[error("config error: {0}")]
    Config(#[from] contracts::PipelineError),

    /// Malformed input line
    #[error("malformed input line '{line}': expected '<priority> <tag> <message...>'")]
    MalformedLine { line: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
