//! FileWriterSink - appends events to a process-lifetime log file off the
//! calling thread

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use contracts::{
    BypassOutput, LogEvent, LogSink, PipelineError, PriorityFilter, SinkKind,
    DEFAULT_QUEUE_CAPACITY,
};

use crate::metrics::SinkMetrics;

/// Fixed message reported through the bypass path on a write failure.
const WRITE_FAILURE_MESSAGE: &str = "could not write log to file";

/// Configuration for FileWriterSink
#[derive(Debug, Clone)]
pub struct FileWriterConfig {
    /// Caller-supplied directory; used when it exists and is both readable
    /// and writable.
    pub directory: Option<PathBuf>,
    /// Prefer the external directory when no explicit directory is usable.
    pub prefer_external: bool,
    /// External storage location, consulted only with `prefer_external`.
    pub external_dir: Option<PathBuf>,
    /// Unconditional fallback: the process-private data directory.
    pub internal_dir: PathBuf,
    /// Application identity embedded in the log file name.
    pub app_id: String,
    /// Bound of the writer work queue.
    pub queue_capacity: usize,
}

impl FileWriterConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        let app_id = app_id.into();
        Self {
            directory: None,
            prefer_external: false,
            external_dir: None,
            internal_dir: std::env::temp_dir().join(&app_id),
            app_id,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    pub fn internal_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.internal_dir = dir.into();
        self
    }

    pub fn external_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.external_dir = Some(dir.into());
        self.prefer_external = true;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}

/// Sink that appends every accepted event to a timestamped log file.
///
/// Accepted events are cloned onto a bounded queue consumed by a single
/// dedicated writer task, so appends stay in the order they were enqueued
/// and the caller never blocks. When the queue is full the newest event is
/// dropped and counted. The file is opened in append mode and closed for
/// every single line: no handle survives between writes, so a process kill
/// never leaves it in an inconsistent state.
pub struct FileWriterSink {
    tx: mpsc::Sender<LogEvent>,
    metrics: Arc<SinkMetrics>,
    log_dir: PathBuf,
    log_file: PathBuf,
    filter: Option<PriorityFilter>,
    worker: JoinHandle<()>,
}

impl FileWriterSink {
    /// Resolve the target directory and file, create the file eagerly and
    /// spawn the writer task.
    ///
    /// Never fails: an unusable directory silently falls back (explicit →
    /// external when preferred → internal), and a file-creation failure is
    /// reported through `bypass` instead of propagated.
    pub fn spawn(config: FileWriterConfig, bypass: Arc<dyn BypassOutput>) -> Self {
        let log_dir = resolve_directory(&config);
        let log_file = log_dir.join(generate_file_name(&config.app_id));

        if let Err(e) = create_eagerly(&log_file) {
            bypass.deliver(
                &LogEvent::new(
                    contracts::Priority::Warn,
                    "FileWriterSink",
                    format!("could not create {}", log_file.display()),
                )
                .with_cause(e),
            );
        } else {
            debug!(file = %log_file.display(), "Log file created");
        }

        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let metrics = Arc::new(SinkMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_path = log_file.clone();
        let worker = tokio::spawn(async move {
            writer_worker(worker_path, rx, worker_metrics, bypass).await;
        });

        Self {
            tx,
            metrics,
            log_dir,
            log_file,
            filter: None,
            worker,
        }
    }

    /// Attach a sink-local block-list overriding the default filter.
    pub fn with_filter(mut self, filter: PriorityFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn log_directory(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Shared writer metrics (queue length, written/failed/dropped counts).
    pub fn metrics(&self) -> Arc<SinkMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Stop accepting events and wait for the writer task to drain.
    ///
    /// The dispatcher never calls this; the process-lifetime sink simply
    /// lives until exit. Useful for hosts that want a flushed file on
    /// shutdown, and for tests.
    pub async fn shutdown(self) {
        let Self { tx, worker, .. } = self;
        drop(tx);
        let _ = worker.await;
    }

    #[cfg(test)]
    fn with_stalled_worker(capacity: usize) -> Self {
        // keeps the receiver alive without consuming, so the queue can fill
        let (tx, rx) = mpsc::channel(capacity);
        let worker = tokio::spawn(async move {
            let _rx = rx;
            std::future::pending::<()>().await;
        });
        Self {
            tx,
            metrics: Arc::new(SinkMetrics::new()),
            log_dir: PathBuf::new(),
            log_file: PathBuf::new(),
            filter: None,
            worker,
        }
    }
}

impl LogSink for FileWriterSink {
    fn kind(&self) -> SinkKind {
        SinkKind::FileWriter
    }

    fn filter(&self) -> Option<&PriorityFilter> {
        self.filter.as_ref()
    }

    /// Enqueue the event for the writer task; never blocks the caller.
    fn on_accepted(&self, event: &LogEvent) -> Result<(), PipelineError> {
        match self.tx.try_send(event.clone()) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                // drop-newest policy: the caller is never blocked
                self.metrics.inc_dropped_count();
                warn!(tag = %dropped.tag, "Writer queue full, event dropped");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(PipelineError::sink_write(
                "file_writer",
                "writer task stopped unexpectedly",
            )),
        }
    }
}

/// Worker task: drains the queue and appends one line per event.
async fn writer_worker(
    path: PathBuf,
    mut rx: mpsc::Receiver<LogEvent>,
    metrics: Arc<SinkMetrics>,
    bypass: Arc<dyn BypassOutput>,
) {
    debug!(file = %path.display(), "Writer worker started");

    while let Some(event) = rx.recv().await {
        metrics.set_queue_len(rx.len());

        match append_line(&path, &event) {
            Ok(()) => metrics.inc_written_count(),
            Err(e) => {
                metrics.inc_failure_count();
                // report through the raw path; must never re-enter fan-out
                bypass.deliver(
                    &LogEvent::new(event.priority, event.tag.clone(), WRITE_FAILURE_MESSAGE)
                        .with_cause(e),
                );
            }
        }
    }

    debug!(file = %path.display(), "Writer worker stopped");
}

/// Open in append mode, write one full line, flush, close.
fn append_line(path: &Path, event: &LogEvent) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    let line = format!(
        "{}/{}: {}\n",
        event.priority.letter(),
        event.tag,
        event.message
    );
    file.write_all(line.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn create_eagerly(path: &Path) -> std::io::Result<()> {
    OpenOptions::new().append(true).create(true).open(path)?;
    Ok(())
}

/// `log_<app_id>_<yyyyMMdd_HHmmss>.txt`
fn generate_file_name(app_id: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("log_{app_id}_{timestamp}.txt")
}

fn resolve_directory(config: &FileWriterConfig) -> PathBuf {
    if let Some(dir) = &config.directory {
        if directory_usable(dir) {
            return dir.clone();
        }
        warn!(dir = %dir.display(), "Requested log directory unusable, falling back");
    }

    if config.prefer_external {
        if let Some(dir) = &config.external_dir {
            if directory_usable(dir) {
                return dir.clone();
            }
        }
    }

    if let Err(e) = std::fs::create_dir_all(&config.internal_dir) {
        warn!(
            dir = %config.internal_dir.display(),
            error = %e,
            "Could not create internal log directory"
        );
    }
    config.internal_dir.clone()
}

fn directory_usable(dir: &Path) -> bool {
    if !dir.is_dir() || std::fs::read_dir(dir).is_err() {
        return false;
    }
    std::fs::metadata(dir)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
