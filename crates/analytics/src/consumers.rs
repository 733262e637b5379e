//! Reference analytics backend that logs via tracing

use std::collections::HashMap;

use tracing::info;

use contracts::{events, AnalyticsConsumer, AttrMap, AttrValue};

/// Consumer that renders every analytics event as a structured log line.
///
/// Stands in for a real SDK backend during development and in tests.
/// Click events delegate to `log_custom` with a `name` attribute, the way
/// SDK-backed consumers translate them.
#[derive(Debug, Default)]
pub struct TracingConsumer;

impl TracingConsumer {
    pub fn new() -> Self {
        Self
    }
}

impl AnalyticsConsumer for TracingConsumer {
    fn kind(&self) -> &'static str {
        "tracing"
    }

    fn log_custom(&self, event_name: &str, attributes: Option<&AttrMap>) {
        let attrs = attributes
            .filter(|map| !map.is_empty())
            .map(|map| serde_json::to_string(map).unwrap_or_default());
        info!(event = %event_name, attributes = ?attrs, "Analytics event");
    }

    fn log_app_opened(&self) {
        self.log_custom(events::APP_OPENED, None);
    }

    fn log_click_generic(&self, name: &str) {
        let attrs = HashMap::from([("name".to_string(), AttrValue::from(name))]);
        self.log_custom(events::CLICKED_GENERIC, Some(&attrs));
    }

    fn log_click_button(&self, name: &str) {
        let attrs = HashMap::from([("name".to_string(), AttrValue::from(name))]);
        self.log_custom(events::CLICKED_BUTTON, Some(&attrs));
    }
}
