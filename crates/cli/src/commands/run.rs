//! Run command - wire the pipeline and feed it from stdin.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use analytics::{AnalyticsFanout, TracingConsumer};
use config_loader::ConfigLoader;
use contracts::{
    BypassOutput, CrashReporter, LogEvent, LogSink, PipelineBlueprint, Priority, PriorityFilter,
    SinkSpec,
};
use dispatcher::{
    ConsoleSink, CrashSink, Dispatcher, DispatcherBuilder, FileWriterConfig, FileWriterSink,
    HapticSink, SinkMetrics,
};

use crate::cli::RunArgs;
use crate::error::CliError;

/// Crash backend for this host: renders reports as error-level tracing events.
struct TracingCrashReporter;

impl CrashReporter for TracingCrashReporter {
    fn report_crash(
        &self,
        priority: Priority,
        tag: &str,
        message: &str,
        cause: Option<&(dyn std::error::Error + Send + Sync)>,
    ) {
        error!(
            priority = %priority,
            tag = %tag,
            cause = ?cause.map(|c| c.to_string()),
            "Crash report: {message}"
        );
    }
}

/// Load the blueprint, build the dispatcher and dispatch one event per
/// stdin line until EOF.
pub async fn run_pipeline(args: &RunArgs) -> Result<(), CliError> {
    let blueprint = ConfigLoader::load_from_path(&args.config)?;
    let (dispatcher, writer_metrics) = build_dispatcher(&blueprint);
    info!(sinks = dispatcher.sink_count(), "Pipeline built");

    let mut fanout = AnalyticsFanout::new();
    fanout.add_consumer(Box::new(TracingConsumer::new()));
    fanout.log_app_opened();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut dispatched: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(event) => {
                dispatcher.dispatch(&event);
                dispatched += 1;
            }
            Err(e) => warn!(error = %e, "Skipping input line"),
        }
    }

    info!(events = dispatched, "Input closed, pipeline done");
    for metrics in &writer_metrics {
        let totals = metrics.snapshot();
        info!(
            written = totals.written_count,
            failed = totals.failure_count,
            dropped = totals.dropped_count,
            queued = totals.queue_len,
            "Writer totals"
        );
    }
    Ok(())
}

/// Build a dispatcher from a validated blueprint.
///
/// The console echo doubles as the bypass raw output, so file-writer
/// failures always surface on the console. Also returns the metrics handle
/// of every file writer, so the host can report totals at shutdown.
pub fn build_dispatcher(blueprint: &PipelineBlueprint) -> (Dispatcher, Vec<Arc<SinkMetrics>>) {
    let bypass = Arc::new(ConsoleSink::new());
    let mut writer_metrics = Vec::new();

    let mut builder = DispatcherBuilder::new()
        .default_filter(PriorityFilter::blocking(
            blueprint.default_filter.iter().copied(),
        ))
        .bypass(Arc::clone(&bypass) as Arc<dyn BypassOutput>);

    for spec in &blueprint.sinks {
        builder = builder.sink(build_sink(spec, &bypass, &mut writer_metrics));
    }
    (builder.build(), writer_metrics)
}

fn build_sink(
    spec: &SinkSpec,
    bypass: &Arc<ConsoleSink>,
    writer_metrics: &mut Vec<Arc<SinkMetrics>>,
) -> Box<dyn LogSink> {
    match spec {
        SinkSpec::Console { filter } => {
            let mut sink = ConsoleSink::new();
            if let Some(blocked) = filter {
                sink = sink.with_filter(PriorityFilter::blocking(blocked.iter().copied()));
            }
            Box::new(sink)
        }
        SinkSpec::Crash { prefix } => Box::new(
            CrashSink::new(Box::new(TracingCrashReporter)).with_prefix(prefix.clone()),
        ),
        SinkSpec::FileWriter {
            directory,
            prefer_external,
            external_dir,
            app_id,
            queue_capacity,
            filter,
        } => {
            let mut config = FileWriterConfig::new(app_id.clone());
            config.directory = directory.clone();
            config.prefer_external = *prefer_external;
            config.external_dir = external_dir.clone();
            config.queue_capacity = *queue_capacity;

            let mut sink =
                FileWriterSink::spawn(config, Arc::clone(bypass) as Arc<dyn BypassOutput>);
            writer_metrics.push(sink.metrics());
            if let Some(blocked) = filter {
                sink = sink.with_filter(PriorityFilter::blocking(blocked.iter().copied()));
            }
            Box::new(sink)
        }
        SinkSpec::Haptic { pulse_ms, filter } => {
            // this host has no actuator; the sink accepts and ignores
            let mut sink = HapticSink::new(None).with_duration(Duration::from_millis(*pulse_ms));
            if let Some(blocked) = filter {
                sink = sink.with_filter(PriorityFilter::blocking(blocked.iter().copied()));
            }
            Box::new(sink)
        }
    }
}

/// Parse `<priority> <tag> <message...>` into an event.
fn parse_line(line: &str) -> Result<LogEvent, CliError> {
    let malformed = || CliError::MalformedLine {
        line: line.to_string(),
    };

    let mut parts = line.splitn(3, ' ');
    let priority = parts
        .next()
        .and_then(|p| Priority::from_str(p).ok())
        .ok_or_else(malformed)?;
    let tag = parts.next().filter(|t| !t.is_empty()).ok_or_else(malformed)?;
    let message = parts.next().ok_or_else(malformed)?;

    Ok(LogEvent::new(priority, tag, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_loader::ConfigFormat;

    #[test]
    fn test_parse_line() {
        let event = parse_line("error Main CRASH: disk full").unwrap();
        assert_eq!(event.priority, Priority::Error);
        assert_eq!(event.tag, "Main");
        assert_eq!(event.message, "CRASH: disk full");

        assert!(parse_line("error Main").is_err());
        assert!(parse_line("loud Main hello").is_err());
    }

    #[tokio::test]
    async fn test_build_dispatcher_from_blueprint() {
        let content = r#"
default_filter = ["verbose"]

[[sinks]]
kind = "console"

[[sinks]]
kind = "crash"

[[sinks]]
kind = "haptic"
"#;
        let blueprint = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap();
        let (dispatcher, writers) = build_dispatcher(&blueprint);
        assert_eq!(dispatcher.sink_count(), 3);
        assert!(writers.is_empty());
        assert!(!dispatcher.default_filter_allows(Priority::Verbose));

        // smoke: dispatching through the built tree must not fail
        dispatcher.dispatch(&LogEvent::new(Priority::Error, "Main", "CRASH: boom"));
    }

    #[tokio::test]
    async fn test_build_dispatcher_exposes_writer_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "[[sinks]]\nkind = \"file_writer\"\napp_id = \"demo\"\ndirectory = \"{}\"\n",
            dir.path().display()
        );
        let blueprint = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();

        let (dispatcher, writers) = build_dispatcher(&blueprint);
        assert_eq!(dispatcher.sink_count(), 1);
        assert_eq!(writers.len(), 1);

        let totals = writers[0].snapshot();
        assert_eq!(totals.written_count, 0);
        assert_eq!(totals.dropped_count, 0);
    }
}
