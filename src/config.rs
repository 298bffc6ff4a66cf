//! Tracker and feed configuration

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

const ENV_INITIAL_CAPACITY: &str = "ORDER_TRACKER_INITIAL_CAPACITY";
const ENV_CHANNEL_CAPACITY: &str = "ORDER_TRACKER_CHANNEL_CAPACITY";
const ENV_HALT_ON_ERROR: &str = "ORDER_TRACKER_HALT_ON_ERROR";

/// Order tracker configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Number of orders to reserve room for in each partition
    #[serde(default)]
    pub initial_capacity: usize,

    /// Event feed configuration
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Order event feed configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Bound of the event channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Stop the feed on the first rejected event instead of skipping it
    #[serde(default)]
    pub halt_on_error: bool,
}

fn default_channel_capacity() -> usize {
    1024
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            halt_on_error: false,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> TrackerResult<Self> {
        let config: TrackerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from YAML file
    pub fn from_yaml_file(path: &str) -> TrackerResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::ConfigError(format!("{}: {}", path, e)))?;

        Self::from_yaml(&contents)
    }

    /// Load configuration from the environment, reading `.env` if present
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> TrackerResult<Self> {
        dotenv::dotenv().ok();

        let mut config = TrackerConfig::default();

        if let Some(capacity) = env_var(ENV_INITIAL_CAPACITY)? {
            config.initial_capacity = capacity;
        }
        if let Some(capacity) = env_var(ENV_CHANNEL_CAPACITY)? {
            config.feed.channel_capacity = capacity;
        }
        if let Some(halt) = env_var(ENV_HALT_ON_ERROR)? {
            config.feed.halt_on_error = halt;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check configuration values
    pub fn validate(&self) -> TrackerResult<()> {
        if self.feed.channel_capacity == 0 {
            return Err(TrackerError::ConfigError(
                "feed.channel_capacity must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_var<T>(key: &str) -> TrackerResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| TrackerError::ConfigError(format!("{}={:?}: {}", key, raw, e))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(TrackerError::ConfigError(format!("{}: {}", key, e))),
    }
}
