//! # logpipe CLI
//!
//! Command-line host for the log distribution pipeline.
//!
//! Provides:
//! - Configuration loading and validation
//! - Dispatcher wiring from a blueprint
//! - A stdin-driven event feed for exercising the pipeline

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_pipeline, run_validate};
use observability::{LogFormat, ObservabilityConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "logpipe starting");

    let result = match &cli.command {
        Commands::Run(args) => run_pipeline(args).await,
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    Ok(result?)
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let log_format = match cli.log_format {
        cli::LogFormatArg::Json => LogFormat::Json,
        cli::LogFormatArg::Pretty => LogFormat::Pretty,
        cli::LogFormatArg::Compact => LogFormat::Compact,
    };

    observability::init_with_config(ObservabilityConfig {
        log_format,
        default_log_level: default_level.to_string(),
    })
}
