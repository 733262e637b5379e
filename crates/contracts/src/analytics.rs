//! AnalyticsConsumer trait and attribute types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical analytics event names.
pub mod events {
    pub const APP_OPENED: &str = "app_opened";
    pub const CLICKED_GENERIC: &str = "click_generic";
    pub const CLICKED_BUTTON: &str = "click_button";
}

/// An attribute value attached to a custom analytics event.
///
/// Numbers stay numeric so a consumer can forward them as such;
/// everything else is stringified at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// Optional key/value attributes for a custom event, like "username" - "amartinz".
/// An absent or empty map means "no attributes".
pub type AttrMap = HashMap<String, AttrValue>;

/// Interface an analytics backend implements.
///
/// Registered into the fanout registry; every operation must be
/// commutative with respect to other consumers since iteration order is
/// unspecified across registry mutations.
pub trait AnalyticsConsumer: Send + Sync {
    /// Stable kind identifier, used for removal-by-kind.
    fn kind(&self) -> &'static str;

    /// Log a custom event with optional attributes.
    fn log_custom(&self, event_name: &str, attributes: Option<&AttrMap>);

    fn log_app_opened(&self);

    fn log_click_generic(&self, name: &str);

    fn log_click_button(&self, name: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_attrs_stay_numeric() {
        assert_eq!(AttrValue::from(3i64), AttrValue::Number(3.0));
        assert_eq!(AttrValue::from(0.5), AttrValue::Number(0.5));
        assert_eq!(AttrValue::from("x"), AttrValue::Text("x".to_string()));
    }

    #[test]
    fn test_attr_serde_untagged() {
        let json = serde_json::to_string(&AttrValue::Number(2.0)).unwrap();
        assert_eq!(json, "2.0");
        let json = serde_json::to_string(&AttrValue::from("hi")).unwrap();
        assert_eq!(json, "\"hi\"");
    }
}
