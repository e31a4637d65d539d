//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    ApiSection, Config, ConfigError, LoggingSection, WalletSection, load_config, load_or_default,
};
