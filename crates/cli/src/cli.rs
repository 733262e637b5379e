//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// logpipe - pluggable log-event distribution pipeline
#[derive(Parser, Debug)]
#[command(
    name = "logpipe",
    author,
    version,
    about = "Log-event distribution pipeline host",
    long_about = "Routes log events (priority, tag, message, optional cause) to a set of \n\
                  independently filtered sinks: console echo, crash extraction, \n\
                  asynchronous file persistence and haptic feedback."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LOGPIPE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "LOGPIPE_LOG_FORMAT"
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the pipeline and dispatch events read from stdin
    Run(RunArgs),

    /// Validate a configuration file without running
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Pipeline configuration file (.toml / .json)
    #[arg(short, long, env = "LOGPIPE_CONFIG")]
    pub config: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Pipeline configuration file (.toml / .json)
    #[arg(short, long, env = "LOGPIPE_CONFIG")]
    pub config: PathBuf,
}

/// Log output format choices
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LogFormatArg {
    Json,
    Pretty,
    Compact,
}
