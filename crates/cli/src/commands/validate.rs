//! Validate command - parse and validate a configuration file.

use tracing::info;

use config_loader::ConfigLoader;
use contracts::SinkSpec;

use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validate the configuration and print a short summary.
pub fn run_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let blueprint = ConfigLoader::load_from_path(&args.config)?;

    info!(
        config = %args.config.display(),
        blocked = blueprint.default_filter.len(),
        sinks = blueprint.sinks.len(),
        "Configuration valid"
    );

    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        info!(idx, kind = sink_kind_name(sink), "Sink");
    }

    Ok(())
}

fn sink_kind_name(spec: &SinkSpec) -> &'static str {
    match spec {
        SinkSpec::Console { .. } => "console",
        SinkSpec::Crash { .. } => "crash",
        SinkSpec::FileWriter { .. } => "file_writer",
        SinkSpec::Haptic { .. } => "haptic",
    }
}
