//! Service configuration for the HTTP front end

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// Environment variable overriding `cors_allow_origin`
pub const CORS_ORIGIN_ENV: &str = "REVERSE_DCF_CORS_ORIGIN";

/// Environment variable overriding `log_filter`
pub const LOG_FILTER_ENV: &str = "REVERSE_DCF_LOG";

/// Environment variable naming an optional JSON config file
pub const CONFIG_PATH_ENV: &str = "REVERSE_DCF_CONFIG";

/// Settings for the request layer. The valuation engine takes none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Value of the Access-Control-Allow-Origin header
    #[serde(default = "default_cors_allow_origin")]
    pub cors_allow_origin: String,

    /// env_logger filter directive, e.g. "info" or "reverse_dcf=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_cors_allow_origin() -> String { "*".to_string() }
fn default_log_filter() -> String { "info".to_string() }

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cors_allow_origin: default_cors_allow_origin(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServiceConfig {
    /// Config file named by `REVERSE_DCF_CONFIG` (or defaults), then
    /// individual environment overrides on top
    pub fn from_env() -> Result<Self, Box<dyn Error + Send + Sync>> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(origin) = lookup(CORS_ORIGIN_ENV).filter(|v| !v.trim().is_empty()) {
            self.cors_allow_origin = origin;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }
}
