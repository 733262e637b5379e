//! CrashSink - extracts crash reports from prefixed log messages

use contracts::{
    CrashReporter, LogEvent, LogSink, PipelineError, Priority, PriorityFilter, SinkKind,
};

/// Prefix marking a log message as a crash report.
pub const DEFAULT_CRASH_PREFIX: &str = "CRASH: ";

/// Sink that forwards prefixed highest-severity messages to a crash
/// reporting backend.
///
/// The severity gate is hard-coded to `Error`/`Fatal` and cannot be
/// loosened by configuration. Messages without the prefix are silently
/// dropped; that is policy, not an error.
pub struct CrashSink {
    prefix: String,
    reporter: Box<dyn CrashReporter>,
}

impl CrashSink {
    pub fn new(reporter: Box<dyn CrashReporter>) -> Self {
        Self {
            prefix: DEFAULT_CRASH_PREFIX.to_string(),
            reporter,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    /// Replace the crash prefix at runtime.
    ///
    /// An empty prefix would match every message, so it is ignored and the
    /// current prefix stays in place.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.prefix = prefix;
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn matches(&self, message: &str) -> bool {
        !message.is_empty() && message.starts_with(&self.prefix)
    }

    /// Strip the first occurrence of the prefix only, leaving any later
    /// repetition of the prefix string intact.
    fn extract(&self, message: &str) -> String {
        message.replacen(&self.prefix, "", 1)
    }
}

impl LogSink for CrashSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Crash
    }

    /// Hard-coded narrowing: only the highest-severity priorities pass,
    /// regardless of any assigned filter.
    fn accepts(&self, priority: Priority, _fallback: &PriorityFilter) -> bool {
        matches!(priority, Priority::Error | Priority::Fatal)
    }

    fn on_accepted(&self, event: &LogEvent) -> Result<(), PipelineError> {
        if !self.matches(&event.message) {
            return Ok(());
        }

        // derive a new message, the original event stays untouched
        let stripped = self.extract(&event.message);
        self.reporter.report_crash(
            event.priority,
            &event.tag,
            &stripped,
            event.cause.as_deref(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingReporter {
        reports: Mutex<Vec<(Priority, String, String, bool)>>,
    }

    struct SharedReporter(Arc<RecordingReporter>);

    impl CrashReporter for SharedReporter {
        fn report_crash(
            &self,
            priority: Priority,
            tag: &str,
            message: &str,
            cause: Option<&(dyn std::error::Error + Send + Sync)>,
        ) {
            self.0.reports.lock().unwrap().push((
                priority,
                tag.to_string(),
                message.to_string(),
                cause.is_some(),
            ));
        }
    }

    fn sink_with_recorder() -> (CrashSink, Arc<RecordingReporter>) {
        let recorder = Arc::new(RecordingReporter::default());
        (
            CrashSink::new(Box::new(SharedReporter(Arc::clone(&recorder)))),
            recorder,
        )
    }

    #[test]
    fn test_accepts_only_highest_severity() {
        let (sink, _) = sink_with_recorder();
        let open = PriorityFilter::empty();
        assert!(sink.accepts(Priority::Error, &open));
        assert!(sink.accepts(Priority::Fatal, &open));
        for priority in [Priority::Verbose, Priority::Debug, Priority::Info, Priority::Warn] {
            assert!(!sink.accepts(priority, &open));
        }
    }

    #[test]
    fn test_prefix_extraction() {
        let (sink, recorder) = sink_with_recorder();
        let event = LogEvent::new(Priority::Error, "Main", "CRASH: boom");
        sink.on_accepted(&event).unwrap();

        let reports = recorder.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].2, "boom");
    }

    #[test]
    fn test_only_first_prefix_occurrence_is_stripped() {
        let (sink, recorder) = sink_with_recorder();
        let event = LogEvent::new(Priority::Error, "Main", "CRASH: CRASH: x");
        sink.on_accepted(&event).unwrap();

        let reports = recorder.reports.lock().unwrap();
        assert_eq!(reports[0].2, "CRASH: x");
    }

    #[test]
    fn test_unprefixed_message_is_silently_dropped() {
        let (sink, recorder) = sink_with_recorder();
        let event = LogEvent::new(Priority::Error, "Main", "boom");
        sink.on_accepted(&event).unwrap();
        assert!(recorder.reports.lock().unwrap().is_empty());

        // empty message never matches either
        let event = LogEvent::new(Priority::Error, "Main", "");
        sink.on_accepted(&event).unwrap();
        assert!(recorder.reports.lock().unwrap().is_empty());
    }

    #[test]
    fn test_custom_prefix() {
        let (sink, recorder) = sink_with_recorder();
        let sink = sink.with_prefix("BOOM! ");
        sink.on_accepted(&LogEvent::new(Priority::Fatal, "T", "BOOM! it broke"))
            .unwrap();
        sink.on_accepted(&LogEvent::new(Priority::Fatal, "T", "CRASH: ignored"))
            .unwrap();

        let reports = recorder.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].2, "it broke");
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let (mut sink, recorder) = sink_with_recorder();
        sink.set_prefix("");
        assert_eq!(sink.prefix(), DEFAULT_CRASH_PREFIX);

        // without the guard an empty prefix would turn every error into a report
        sink.on_accepted(&LogEvent::new(Priority::Error, "Main", "boom"))
            .unwrap();
        assert!(recorder.reports.lock().unwrap().is_empty());

        sink.on_accepted(&LogEvent::new(Priority::Error, "Main", "CRASH: boom"))
            .unwrap();
        assert_eq!(recorder.reports.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_cause_is_forwarded() {
        let (sink, recorder) = sink_with_recorder();
        let event = LogEvent::new(Priority::Error, "Main", "CRASH: oom")
            .with_cause(std::io::Error::other("allocation failed"));
        sink.on_accepted(&event).unwrap();

        let reports = recorder.reports.lock().unwrap();
        assert!(reports[0].3, "cause should reach the reporter");
    }
}
