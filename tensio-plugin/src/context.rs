//! Call context

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tensio_core::TensioError;

/// Context passed to every tool call
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Reference instant for window-based tools when the caller gives none
    pub now: DateTime<Utc>,
    /// Server-level settings, one object per section (e.g. "thresholds")
    pub settings: JsonValue,
}

impl ToolContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now, settings: JsonValue::Object(Default::default()) }
    }

    pub fn with_settings(mut self, settings: JsonValue) -> Self {
        self.settings = settings;
        self
    }

    /// Decode one settings section, falling back to `T::default()` when absent
    pub fn section<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, TensioError> {
        match self.settings.get(name) {
            None | Some(JsonValue::Null) => Ok(T::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                TensioError::config_error(format!("section '{}': {}", name, e))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Limits {
        min: u32,
        max: u32,
    }

    #[test]
    fn test_missing_section_is_default() {
        let ctx = ToolContext::new(Utc::now());
        assert_eq!(ctx.section::<Limits>("limits").unwrap(), Limits::default());
    }

    #[test]
    fn test_partial_section() {
        let ctx = ToolContext::new(Utc::now()).with_settings(json!({ "limits": { "max": 9 } }));
        assert_eq!(ctx.section::<Limits>("limits").unwrap(), Limits { min: 0, max: 9 });
    }

    #[test]
    fn test_bad_section() {
        let ctx = ToolContext::new(Utc::now()).with_settings(json!({ "limits": "nope" }));
        assert!(ctx.section::<Limits>("limits").is_err());
    }
}
