use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::helpers::deserialize_duration_from_seconds;
use crate::{notification::ChannelConfig, providers::ControllerConfig};

/// Provides the default value for reconnect_delay_secs.
fn default_reconnect_delay() -> Duration {
    Duration::from_secs(10)
}

/// Provides the default value for max_retries.
fn default_max_retries() -> u32 {
    3
}

/// Application configuration for tagwatch.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Seconds between poll cycles.
    #[serde(deserialize_with = "deserialize_duration_from_seconds")]
    pub poll_interval_secs: Duration,

    /// Seconds to wait before polling again after a transport-level
    /// controller error.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        default = "default_reconnect_delay"
    )]
    pub reconnect_delay_secs: Duration,

    /// Consecutive read failures of a critical tag before an alert fires.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Minimum seconds between two notifications for the same alert key.
    #[serde(deserialize_with = "deserialize_duration_from_seconds")]
    pub alert_throttle_secs: Duration,

    /// Directory for daily CSV log files.
    pub log_dir: PathBuf,

    /// Alert notification recipients.
    pub recipients: Vec<String>,

    /// The configured notification channel.
    pub channel: ChannelConfig,

    /// The controller read source.
    pub controller: ControllerConfig,

    /// Path to the tag configuration file.
    #[serde(skip_deserializing)]
    pub tags_config_path: PathBuf,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("TAGWATCH").separator("__"))
            .build()?;
        let mut config: Self = s.try_deserialize()?;

        // Join the tag file path with the config directory so it resolves
        // relative to app.yaml.
        config.tags_config_path = Path::new(config_dir_str).join("tags.yaml");

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the engine must not start with.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs.is_zero() {
            return Err(ConfigError::Message("poll_interval_secs must be at least 1".into()));
        }
        if self.max_retries == 0 {
            return Err(ConfigError::Message("max_retries must be at least 1".into()));
        }
        if self.recipients.is_empty() {
            return Err(ConfigError::Message("recipients must not be empty".into()));
        }
        Ok(())
    }
}
