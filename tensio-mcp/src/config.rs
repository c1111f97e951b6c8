//! Server configuration

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::path::Path;
use tensio_core::TensioError;
use tensio_insights::Thresholds;

/// Environment variable naming the TOML config file
pub const CONFIG_ENV: &str = "TENSIO_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    pub log_filter: String,
    pub thresholds: Thresholds,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

impl ServerConfig {
    pub fn parse(content: &str) -> Result<Self, TensioError> {
        let config: Self = toml::from_str(content).map_err(|e| TensioError::config_error(e.to_string()))?;
        if let Some(field) = config.thresholds.invalid_field() {
            return Err(TensioError::config_error(format!(
                "thresholds.{} must be finite and non-negative",
                field
            )));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, TensioError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TensioError::config_error(format!("reading {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Config from the file named by `TENSIO_CONFIG`, or defaults when unset
    pub fn from_env() -> Result<Self, TensioError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Settings object handed to tools through `ToolContext`
    pub fn tool_settings(&self) -> JsonValue {
        json!({ "thresholds": self.thresholds })
    }
}
