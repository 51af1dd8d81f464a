//! Engine configuration.
//!
//! Every tunable lives in a typed section with defaults matching the shipped
//! game, so an empty YAML document (or no file at all) yields a working
//! engine. Sections:
//!
//! - `calendar` -- the local day boundary.
//! - `care` -- satisfaction, cooldowns, and affinity ([`CareConfig`]).
//! - `shop` -- daily shop and eggs ([`ShopConfig`]).
//! - `logging` -- log level and format for binaries.
//! - `storage` -- where the state record lives.

use std::path::Path;

use calpet_care::CareConfig;
use calpet_shop::ShopConfig;
use calpet_types::{Calendar, CalendarError};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Local day boundary.
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Care rules.
    #[serde(default)]
    pub care: CareConfig,

    /// Shop and egg rules.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// State record location.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.storage.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Local day boundary configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CalendarConfig {
    /// Minutes east of UTC where the player's day starts (e.g. 540 for
    /// JST). Defaults to 0.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl CalendarConfig {
    /// Build the configured calendar.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] for offsets of a day or more.
    pub fn calendar(&self) -> Result<Calendar, CalendarError> {
        Calendar::from_offset_minutes(self.utc_offset_minutes)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

/// State record location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON state record.
    #[serde(default = "default_state_path")]
    pub state_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

impl StorageConfig {
    /// Apply environment variable overrides.
    ///
    /// `CALPET_STATE` overrides `state_path`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CALPET_STATE") {
            self.state_path = val;
        }
    }
}

fn default_state_path() -> String {
    String::from("calpet-state.json")
}
