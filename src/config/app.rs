//! Application configuration loading from config.toml
//!
//! The file is optional. Every key has a default, so a fresh checkout runs
//! without any configuration; a file that exists but cannot be parsed is an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "EXPENSE_TRACKER_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed application identifier used to scope storage locations
    pub app_id: String,
    /// Monthly budget every new ledger starts with
    pub default_budget: f64,
    /// Socket address the HTTP server binds to
    pub bind_address: String,
    /// Seconds without a request after which a page session's ledger is stopped
    pub session_idle_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: "expense-tracker".to_string(),
            default_budget: 1000.0,
            bind_address: "127.0.0.1:3000".to_string(),
            session_idle_secs: 1800,
        }
    }
}

/// Parses configuration from a TOML string
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a value has the wrong type
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file, falling back to defaults when the file is absent
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);

    if !path_ref.exists() {
        info!("No config file at {:?}, using defaults", path_ref);
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `$EXPENSE_TRACKER_CONFIG`, or `./config.toml` when unset
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path)?;
    if config.app_id.trim().is_empty() {
        return Err(Error::Config {
            message: "app_id must not be empty".to_string(),
        });
    }
    if config.session_idle_secs == 0 {
        return Err(Error::Config {
            message: "session_idle_secs must be greater than zero".to_string(),
        });
    }
    info!(app_id = %config.app_id, "Loaded application configuration");
    Ok(config)
}
