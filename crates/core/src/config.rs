use std::path::Path;

use serde::Deserialize;

use crate::types::SdkAdapterConfig;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `ANALYTICS_BRIDGE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Replaces the built-in adapter tables when present.
    #[serde(default)]
    pub adapter: Option<SdkAdapterConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_collection_enabled")]
    pub collection_enabled: bool,
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub dev_key: String,
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    #[serde(default)]
    pub customer_user_id: Option<String>,
    #[serde(default = "default_min_time_between_sessions_secs")]
    pub min_time_between_sessions_secs: u64,
    #[serde(default)]
    pub device_tracking_disabled: bool,
}

// Default functions
fn default_collection_enabled() -> bool {
    true
}
fn default_session_timeout_secs() -> u64 {
    1800
}
fn default_currency_code() -> String {
    "USD".to_string()
}
fn default_min_time_between_sessions_secs() -> u64 {
    5
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            collection_enabled: default_collection_enabled(),
            session_timeout_secs: default_session_timeout_secs(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            dev_key: String::new(),
            currency_code: default_currency_code(),
            customer_user_id: None,
            min_time_between_sessions_secs: default_min_time_between_sessions_secs(),
            device_tracking_disabled: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            tracker: TrackerConfig::default(),
            adapter: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file, then environment
    /// variables (which take precedence).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ANALYTICS_BRIDGE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut app: AppConfig = config.try_deserialize()?;

        // `config` lowercases keys; adapter map keys must keep their case.
        if let Some(path) = path.filter(|p| p.extension().is_some_and(|ext| ext == "toml")) {
            if let Some(adapter) = read_adapter_table(path)? {
                app.adapter = Some(adapter);
            }
        }

        tracing::debug!(
            has_adapter_override = app.adapter.is_some(),
            collection_enabled = app.analytics.collection_enabled,
            "Configuration assembled"
        );

        Ok(app)
    }
}

/// Only the `[adapter]` table of a config file.
#[derive(Debug, Deserialize)]
struct AdapterTable {
    #[serde(default)]
    adapter: Option<SdkAdapterConfig>,
}

fn read_adapter_table(path: &Path) -> Result<Option<SdkAdapterConfig>, config::ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let table: AdapterTable =
        toml::from_str(&raw).map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    Ok(table.adapter)
}
