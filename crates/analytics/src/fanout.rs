//! AnalyticsFanout - forwards canonical events to every registered consumer

use contracts::{AnalyticsConsumer, AttrMap};

/// Identity handle returned by [`AnalyticsFanout::add_consumer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsumerId(u64);

/// Registry of analytics consumers.
///
/// Iteration order is unspecified across mutations, so consumers must be
/// commutative with each other. Mutation happens only in configuration
/// code; the fan-out operations take `&self`.
#[derive(Default)]
pub struct AnalyticsFanout {
    consumers: Vec<(ConsumerId, Box<dyn AnalyticsConsumer>)>,
    next_id: u64,
}

impl AnalyticsFanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_consumer(&mut self, consumer: Box<dyn AnalyticsConsumer>) -> ConsumerId {
        let id = ConsumerId(self.next_id);
        self.next_id += 1;
        self.consumers.push((id, consumer));
        id
    }

    /// Remove a consumer by identity. Idempotent.
    pub fn remove_consumer(&mut self, id: ConsumerId) -> &mut Self {
        self.consumers.retain(|(cid, _)| *cid != id);
        self
    }

    /// Remove every consumer of the given kind. Idempotent.
    pub fn remove_by_kind(&mut self, kind: &str) -> &mut Self {
        self.consumers.retain(|(_, c)| c.kind() != kind);
        self
    }

    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Forward a custom event to every consumer.
    pub fn log_custom(&self, event_name: &str, attributes: Option<&AttrMap>) -> &Self {
        for (_, consumer) in &self.consumers {
            consumer.log_custom(event_name, attributes);
        }
        self
    }

    pub fn log_app_opened(&self) -> &Self {
        for (_, consumer) in &self.consumers {
            consumer.log_app_opened();
        }
        self
    }

    pub fn log_click_generic(&self, name: &str) -> &Self {
        for (_, consumer) in &self.consumers {
            consumer.log_click_generic(name);
        }
        self
    }

    pub fn log_click_button(&self, name: &str) -> &Self {
        for (_, consumer) in &self.consumers {
            consumer.log_click_button(name);
        }
        self
    }
}
