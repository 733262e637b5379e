//! Counters a background writer shares with its host

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Shared counters for one background writer task.
///
/// The sink side updates them, the host side reads them. All accesses are
/// relaxed: the counts are informational and never gate control flow.
#[derive(Debug, Default)]
pub struct SinkMetrics {
    queue_len: AtomicUsize,
    written_count: AtomicU64,
    failure_count: AtomicU64,
    dropped_count: AtomicU64,
}

impl SinkMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events currently waiting in the writer queue.
    pub fn queue_len(&self) -> usize {
        self.queue_len.load(Ordering::Relaxed)
    }

    pub fn set_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    /// Lines flushed to the log file so far.
    pub fn written_count(&self) -> u64 {
        self.written_count.load(Ordering::Relaxed)
    }

    pub fn inc_written_count(&self) {
        self.written_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Writes that failed and were rerouted to the bypass output.
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Events discarded because the queue was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    pub fn inc_dropped_count(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy all counters for reporting.
    ///
    /// Fields are read independently; a snapshot taken while the writer is
    /// running may mix counts from adjacent events.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queue_len: self.queue_len(),
            written_count: self.written_count(),
            failure_count: self.failure_count(),
            dropped_count: self.dropped_count(),
        }
    }
}

/// Point-in-time copy of [`SinkMetrics`], for end-of-run reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queue_len: usize,
    pub written_count: u64,
    pub failure_count: u64,
    pub dropped_count: u64,
}
