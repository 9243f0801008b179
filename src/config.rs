//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub ui: UiConfig,
}

/// Backend API connection settings.
///
/// One configured origin replaces the per-page hardcoded hosts the old
/// frontend shipped with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts for idempotent requests (default: 3).
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

/// Notification polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Poll interval while the user is active, in seconds.
    pub active_secs: u64,
    /// Poll interval after the user has gone idle, in seconds.
    pub idle_secs: u64,
    /// Seconds without input before the idle interval applies.
    pub idle_after_secs: u64,
    /// Multiplier applied to the interval after a failed poll.
    pub backoff_factor: f64,
    /// Upper bound on the backed-off interval, in seconds.
    pub max_secs: u64,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub remember_username: bool,
    pub cached_username: String,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("API base URL cannot be empty".to_string()));
        }
        if !self.api.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.api.retry_attempts == 0 {
            return Err(ConfigError::Validation("Retry attempts must be at least 1".to_string()));
        }
        if self.polling.active_secs == 0 {
            return Err(ConfigError::Validation(
                "Active poll interval must be at least 1 second".to_string(),
            ));
        }
        if self.polling.idle_secs < self.polling.active_secs {
            return Err(ConfigError::Validation(
                "Idle poll interval cannot be shorter than the active interval".to_string(),
            ));
        }
        if self.polling.backoff_factor < 1.0 {
            return Err(ConfigError::Validation("Backoff factor must be at least 1.0".to_string()));
        }
        if self.polling.max_secs < self.polling.idle_secs {
            return Err(ConfigError::Validation(
                "Max poll interval cannot be shorter than the idle interval".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: default_timeout_secs(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            active_secs: 15,
            idle_secs: 120,
            idle_after_secs: 300,
            backoff_factor: 2.0,
            max_secs: 600,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            remember_username: true,
            cached_username: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_non_http_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_polling_bounds() {
        let mut config = AppConfig::default();

        config.polling.idle_secs = config.polling.active_secs - 1;
        assert!(config.validate().is_err());

        config.polling = PollingConfig::default();
        config.polling.backoff_factor = 0.5;
        assert!(config.validate().is_err());

        config.polling = PollingConfig::default();
        config.polling.max_secs = config.polling.idle_secs - 1;
        assert!(config.validate().is_err());

        config.polling = PollingConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.polling.active_secs, config.polling.active_secs);
    }
}
