//! # Integration Tests
//!
//! End-to-end tests for the log distribution pipeline.
//!
//! Covers:
//! - Full fan-out: crash extraction and file persistence from one dispatch
//! - Dispatch-order file round trips under the real runtime
//! - Tree-wide default filtering across sinks

#[cfg(test)]
mod e2e_tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use contracts::{BypassOutput, CrashReporter, LogEvent, Priority, PriorityFilter};
    use dispatcher::{
        ConsoleSink, CrashSink, Dispatcher, DispatcherBuilder, FileWriterConfig, FileWriterSink,
        SinkMetrics,
    };
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingReporter {
        reports: Mutex<Vec<(Priority, String, String)>>,
    }

    struct SharedReporter(Arc<RecordingReporter>);

    impl CrashReporter for SharedReporter {
        fn report_crash(
            &self,
            priority: Priority,
            tag: &str,
            message: &str,
            _cause: Option<&(dyn std::error::Error + Send + Sync)>,
        ) {
            self.0
                .reports
                .lock()
                .unwrap()
                .push((priority, tag.to_string(), message.to_string()));
        }
    }

    /// Wait until the writer task has flushed `expected` lines.
    async fn wait_for_written(metrics: &SinkMetrics, expected: u64) {
        for _ in 0..200 {
            if metrics.written_count() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "writer never reached {expected} lines (got {})",
            metrics.written_count()
        );
    }

    #[tokio::test]
    async fn test_crash_and_file_from_one_dispatch() {
        let dir = tempdir().unwrap();
        let reporter = Arc::new(RecordingReporter::default());

        let file_sink = FileWriterSink::spawn(
            FileWriterConfig::new("e2e").directory(dir.path()),
            Arc::new(ConsoleSink::new()) as Arc<dyn BypassOutput>,
        );
        let metrics = file_sink.metrics();
        let log_file = file_sink.log_file().to_path_buf();

        // empty default filter: nothing blocked
        let dispatcher = DispatcherBuilder::new()
            .default_filter(PriorityFilter::empty())
            .sink(Box::new(CrashSink::new(Box::new(SharedReporter(Arc::clone(&reporter))))))
            .sink(Box::new(file_sink))
            .build();

        dispatcher.dispatch(&LogEvent::new(Priority::Error, "Main", "CRASH: disk full"));
        wait_for_written(&metrics, 1).await;

        // exactly one crash report, with the prefix stripped
        let reports = reporter.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0],
            (Priority::Error, "Main".to_string(), "disk full".to_string())
        );

        // exactly one file line, with the original message intact
        let contents = std::fs::read_to_string(log_file).unwrap();
        assert_eq!(contents, "E/Main: CRASH: disk full\n");
    }

    #[tokio::test]
    async fn test_file_round_trip_in_dispatch_order() {
        let dir = tempdir().unwrap();
        let mut dispatcher = Dispatcher::new(PriorityFilter::empty());

        // the file writer reports its own failures through the tree's raw path
        let file_sink = FileWriterSink::spawn(
            FileWriterConfig::new("e2e").directory(dir.path()),
            dispatcher.bypass(),
        );
        let metrics = file_sink.metrics();
        let log_file = file_sink.log_file().to_path_buf();
        dispatcher.add(Box::new(file_sink));

        dispatcher.dispatch(&LogEvent::new(Priority::Error, "TagA", "hello"));
        dispatcher.dispatch(&LogEvent::new(Priority::Warn, "TagB", "world"));
        wait_for_written(&metrics, 2).await;

        let contents = std::fs::read_to_string(log_file).unwrap();
        assert_eq!(contents, "E/TagA: hello\nW/TagB: world\n");
    }

    #[tokio::test]
    async fn test_default_filter_gates_the_whole_tree() {
        let dir = tempdir().unwrap();
        let reporter = Arc::new(RecordingReporter::default());

        let file_sink = FileWriterSink::spawn(
            FileWriterConfig::new("e2e").directory(dir.path()),
            Arc::new(ConsoleSink::new()) as Arc<dyn BypassOutput>,
        );
        let metrics = file_sink.metrics();
        let log_file = file_sink.log_file().to_path_buf();

        let dispatcher = DispatcherBuilder::new()
            .default_filter(PriorityFilter::blocking([Priority::Verbose, Priority::Debug]))
            .sink(Box::new(CrashSink::new(Box::new(SharedReporter(Arc::clone(&reporter))))))
            .sink(Box::new(file_sink))
            .build();

        dispatcher.dispatch(&LogEvent::new(Priority::Verbose, "Noise", "ignored"));
        dispatcher.dispatch(&LogEvent::new(Priority::Debug, "Noise", "ignored"));
        dispatcher.dispatch(&LogEvent::new(Priority::Info, "Main", "kept"));
        wait_for_written(&metrics, 1).await;

        // only the info event reached the file; the crash sink saw nothing
        // reportable (wrong severity, no prefix)
        let contents = std::fs::read_to_string(log_file).unwrap();
        assert_eq!(contents, "I/Main: kept\n");
        assert!(reporter.reports.lock().unwrap().is_empty());
    }
}
