//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. Every value has a default
//! suitable for local development, so an empty environment is valid.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default key under which the selection aggregate is persisted
pub const DEFAULT_SELECTION_STORAGE_KEY: &str = "fitting-room-selection";

/// Default file backing the device-local key-value storage
pub const DEFAULT_SELECTION_STORAGE_PATH: &str = "fitroom_storage.json";

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!(
                "Unknown log format: {}. Supported formats: pretty, json",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File backing the device-local key-value storage
    pub selection_storage_path: PathBuf,

    /// Well-known key the selection aggregate is stored under
    pub selection_storage_key: String,

    /// Base URL used to build fetchable blob URLs
    pub blob_base_url: String,

    /// Runtime configuration
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selection_storage_path: PathBuf::from(DEFAULT_SELECTION_STORAGE_PATH),
            selection_storage_key: DEFAULT_SELECTION_STORAGE_KEY.to_string(),
            blob_base_url: "http://localhost:8080/v1/storage".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Self::default();

        let log_format = match env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.log_format,
        };

        let config = Self {
            selection_storage_path: env::var("SELECTION_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.selection_storage_path),
            selection_storage_key: env::var("SELECTION_STORAGE_KEY")
                .unwrap_or(defaults.selection_storage_key),
            blob_base_url: env::var("BLOB_BASE_URL").unwrap_or(defaults.blob_base_url),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
        };

        if config.selection_storage_key.trim().is_empty() {
            return Err(anyhow::anyhow!("SELECTION_STORAGE_KEY must not be empty"));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "SELECTION_STORAGE_PATH",
        "SELECTION_STORAGE_KEY",
        "BLOB_BASE_URL",
        "LOG_LEVEL",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults_when_env_empty() {
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.selection_storage_path,
            PathBuf::from(DEFAULT_SELECTION_STORAGE_PATH)
        );
        assert_eq!(config.selection_storage_key, DEFAULT_SELECTION_STORAGE_KEY);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn test_config_reads_overrides() {
        clear_env();
        env::set_var("SELECTION_STORAGE_PATH", "/tmp/fitroom-test.json");
        env::set_var("SELECTION_STORAGE_KEY", "custom-key");
        env::set_var("LOG_FORMAT", "JSON");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.selection_storage_path,
            PathBuf::from("/tmp/fitroom-test.json")
        );
        assert_eq!(config.selection_storage_key, "custom-key");
        assert_eq!(config.log_format, LogFormat::Json);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_rejects_blank_storage_key() {
        clear_env();
        env::set_var("SELECTION_STORAGE_KEY", "   ");

        let result = Config::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_rejects_unknown_log_format() {
        clear_env();
        env::set_var("LOG_FORMAT", "xml");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("Unknown log format: xml"));

        clear_env();
    }
}
