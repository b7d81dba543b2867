//! Configuration management for Yakusu.
//!
//! Handles loading, saving, and validating configuration from
//! platform-specific config directories. User preferences edited from the
//! options page live separately in the settings store.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application name used for config directory.
const APP_NAME: &str = "Yakusu";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Default settings filename.
const SETTINGS_FILENAME: &str = "settings.json";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI language override, e.g. "zh_CN". Detected from the environment when unset.
    pub locale: Option<String>,

    /// Translator HTTP settings.
    pub http: HttpConfig,

    /// File paths.
    pub paths: PathsConfig,
}

/// HTTP settings shared by all translators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base URL of the translation site.
    pub host: String,

    /// Per-request timeout in seconds.
    pub timeout_sec: u64,

    /// How many times a rejected request is resent after refreshing the token.
    pub max_retry: u32,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Print token refreshes and retries.
    pub debug: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "https://fanyi.baidu.com/".to_string(),
            timeout_sec: 5,
            max_retry: 3,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            debug: false,
        }
    }
}

/// File path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Settings file. Defaults to `settings.json` next to the config file.
    pub settings_file: Option<PathBuf>,
}

impl Config {
    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from the default location.
    ///
    /// If the config file doesn't exist, creates a default one.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = url::Url::parse(&self.http.host).map_err(|e| ConfigError::InvalidValue {
            key: "http.host".to_string(),
            message: e.to_string(),
        })?;

        if !matches!(host.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "http.host".to_string(),
                message: format!("unsupported scheme '{}'", host.scheme()),
            });
        }

        if self.http.timeout_sec == 0 {
            return Err(ConfigError::InvalidValue {
                key: "http.timeout_sec".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the effective settings file, using config or default.
    pub fn settings_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref file) = self.paths.settings_file {
            Ok(file.clone())
        } else {
            Ok(Self::config_dir()?.join(SETTINGS_FILENAME))
        }
    }
}
