//! Dispatcher - ordered fan-out of log events to sinks

use std::sync::Arc;

use tracing::{debug, error};

use contracts::{BypassOutput, LogEvent, LogSink, PipelineError, Priority, PriorityFilter, SinkKind};

use crate::sinks::ConsoleSink;

/// Identity handle returned by [`Dispatcher::add`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

struct SinkEntry {
    id: SinkId,
    sink: Box<dyn LogSink>,
}

/// The central tree: an ordered sink list, a default block-list filter and
/// the raw bypass output.
///
/// A pure fan-out relay with no internal phases; its only observable
/// behavior is which sinks receive which events, in what order. Created
/// once at application start, mutated only by configuration code, live for
/// the process lifetime.
pub struct Dispatcher {
    sinks: Vec<SinkEntry>,
    default_filter: PriorityFilter,
    bypass: Arc<dyn BypassOutput>,
    next_id: u64,
}

impl Dispatcher {
    /// Create an empty dispatcher with the given default filter.
    ///
    /// The bypass path echoes to the console; use [`DispatcherBuilder`] to
    /// replace it.
    pub fn new(default_filter: PriorityFilter) -> Self {
        Self {
            sinks: Vec::new(),
            default_filter,
            bypass: Arc::new(ConsoleSink::new()),
            next_id: 0,
        }
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Append a sink to the dispatch order. No de-duplication: adding the
    /// same kind twice dispatches to it twice.
    pub fn add(&mut self, sink: Box<dyn LogSink>) -> SinkId {
        let id = SinkId(self.next_id);
        self.next_id += 1;
        self.sinks.push(SinkEntry { id, sink });
        id
    }

    /// Remove a sink by identity. No-op when nothing matches.
    pub fn remove(&mut self, id: SinkId) {
        self.sinks.retain(|entry| entry.id != id);
    }

    /// Remove every sink of the given kind. No-op when nothing matches.
    pub fn remove_by_kind(&mut self, kind: SinkKind) {
        self.sinks.retain(|entry| entry.sink.kind() != kind);
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Whether the tree-wide default filter lets this priority proceed.
    ///
    /// Used by any sink that declines to carry its own filter.
    pub fn default_filter_allows(&self, priority: Priority) -> bool {
        self.default_filter.allows(priority)
    }

    /// Forward an event to every sink in registration order.
    ///
    /// Synchronous from the caller's perspective; a sink may internally
    /// defer its effect. A failing sink is skipped and the remaining sinks
    /// still run.
    pub fn dispatch(&self, event: &LogEvent) {
        for entry in &self.sinks {
            if let Err(e) = gate_and_log(entry.sink.as_ref(), event, &self.default_filter) {
                error!(
                    kind = ?entry.sink.kind(),
                    error = %e,
                    "Sink failed, continuing dispatch"
                );
            }
        }
    }

    /// Deliver an event straight to the raw output, without sink fan-out.
    ///
    /// Used by sinks to report their own internal failures; never recurses
    /// into the sink list.
    pub fn bypass_dispatch(&self, event: &LogEvent) {
        self.bypass.deliver(event);
    }

    /// Handle to the raw output path, for sinks that report failures from
    /// a background task.
    pub fn bypass(&self) -> Arc<dyn BypassOutput> {
        Arc::clone(&self.bypass)
    }
}

/// The gate-then-act composition, in one place.
///
/// Every sink goes through here: evaluate the two-level filter protocol,
/// invoke the effect only on acceptance.
fn gate_and_log(
    sink: &dyn LogSink,
    event: &LogEvent,
    fallback: &PriorityFilter,
) -> Result<(), PipelineError> {
    if sink.accepts(event.priority, fallback) {
        sink.on_accepted(event)
    } else {
        Ok(())
    }
}

/// Builder for wiring a dispatcher at application start.
pub struct DispatcherBuilder {
    default_filter: PriorityFilter,
    bypass: Option<Arc<dyn BypassOutput>>,
    sinks: Vec<Box<dyn LogSink>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            default_filter: PriorityFilter::empty(),
            bypass: None,
            sinks: Vec::new(),
        }
    }

    /// Default development tree: console echo, nothing filtered.
    pub fn development() -> Self {
        Self::new().sink(Box::new(ConsoleSink::new()))
    }

    /// Default production tree: console echo with verbose, debug and info
    /// suppressed tree-wide.
    pub fn production() -> Self {
        Self::new()
            .default_filter(PriorityFilter::blocking([
                Priority::Verbose,
                Priority::Debug,
                Priority::Info,
            ]))
            .sink(Box::new(ConsoleSink::new()))
    }

    pub fn default_filter(mut self, filter: PriorityFilter) -> Self {
        self.default_filter = filter;
        self
    }

    pub fn bypass(mut self, bypass: Arc<dyn BypassOutput>) -> Self {
        self.bypass = Some(bypass);
        self
    }

    /// Append a sink; builder order is dispatch order.
    pub fn sink(mut self, sink: Box<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn build(self) -> Dispatcher {
        let mut dispatcher = Dispatcher::new(self.default_filter);
        if let Some(bypass) = self.bypass {
            dispatcher.bypass = bypass;
        }
        for sink in self.sinks {
            dispatcher.add(sink);
        }
        debug!(sinks = dispatcher.sink_count(), "Dispatcher built");
        dispatcher
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
