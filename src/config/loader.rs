//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching
//! config/default.toml. Every section and field has a default, so an empty
//! or missing file yields a usable configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::tracker_api::{TrackerApiConfig, DEFAULT_API_BASE_URL};
use crate::application::wallet_bridge::{PollSchedule, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};

/// Main configuration structure matching config/default.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    pub wallet: WalletSection,
    pub logging: LoggingSection,
}

/// Data API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Solana Tracker data API base URL
    pub base_url: String,
    /// API key sent as `x-api-key` (prefer SOLANA_TRACKER_API_KEY in .env)
    pub api_key: Option<String>,
    /// Request timeout in seconds; unset means no client-side timeout
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl ApiSection {
    /// Get base URL with environment variable override
    /// Checks SOLANA_TRACKER_API_URL env var first, falls back to config value
    pub fn get_base_url(&self) -> String {
        std::env::var("SOLANA_TRACKER_API_URL").unwrap_or_else(|_| self.base_url.clone())
    }

    /// Get API key; SOLANA_TRACKER_API_KEY is only a fallback
    /// when the config value is empty/None
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("SOLANA_TRACKER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
    }

    /// Client configuration with env overrides applied
    pub fn client_config(&self) -> TrackerApiConfig {
        let mut config = TrackerApiConfig::default().with_base_url(self.get_base_url());
        if let Some(key) = self.get_api_key() {
            config = config.with_api_key(key);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Wallet configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalletSection {
    /// Keypair file standing in for the wallet extension
    pub keypair_path: String,
    /// Availability polls before giving up, including the first
    pub poll_attempts: u32,
    /// Delay between availability polls
    pub poll_interval_ms: u64,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            keypair_path: "~/.config/solana/id.json".to_string(),
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl WalletSection {
    /// Get keypair path with environment variable override, `~` expanded
    /// Checks SOLANA_KEYPAIR_PATH env var first, falls back to config value
    pub fn get_keypair_path(&self) -> String {
        let path = std::env::var("SOLANA_KEYPAIR_PATH").unwrap_or_else(|_| self.keypair_path.clone());
        shellexpand::tilde(&path).to_string()
    }

    pub fn poll_schedule(&self) -> PollSchedule {
        PollSchedule {
            attempts: self.poll_attempts,
            interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration, falling back to defaults when the file does not exist
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        let config = Config::default();
        config.validate()?;
        return Ok(config);
    }
    load_config(path)
}

/// Base URL must be a non-empty http(s) URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "base_url cannot be empty".to_string(),
        ));
    }

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "base_url must be an http(s) URL, got {}",
            base_url
        )));
    }
    Ok(())
}

impl Config {
    /// Validate all configuration parameters, env overrides applied
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.api.get_base_url())?;

        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0 when set".to_string(),
            ));
        }

        if self.wallet.keypair_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "keypair_path cannot be empty".to_string(),
            ));
        }

        if self.wallet.poll_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "poll_attempts must be > 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging level must be one of {:?}, got {}",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}
