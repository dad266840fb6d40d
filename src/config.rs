//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the forecast-config.toml file.
//! It provides a centralized way to configure the beach location, the forecast horizon and
//! seed, and the tip service endpoint.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::forecast::DEFAULT_HORIZON_DAYS;

pub const CONFIG_FILE: &str = "forecast-config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration loaded from forecast-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub location: LocationConfig,
    pub forecast: ForecastConfig,
    pub tip: TipConfig,
}

/// Beach the forecast is for
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Used in the report header and in tip prompts
    pub name: String,
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of days to generate, today included
    pub horizon_days: u32,
    /// Fixed seed for a reproducible week; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Tip service settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TipConfig {
    /// Base URL of the models collection
    pub endpoint: String,
    /// Model name appended to the endpoint
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig::default(),
            forecast: ForecastConfig::default(),
            tip: TipConfig::default(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        LocationConfig {
            name: "Porangahau Beach".to_string(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            horizon_days: DEFAULT_HORIZON_DAYS,
            seed: None,
        }
    }
}

impl Default for TipConfig {
    fn default() -> Self {
        TipConfig {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from forecast-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(location = %config.location.name, path = %path.display(), "loaded configuration");
                    config
                }
                Err(error) => {
                    warn!(%error, path = %path.display(), "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.location.name, "Porangahau Beach");
        assert_eq!(config.forecast.horizon_days, 7);
        assert_eq!(config.forecast.seed, None);
        assert_eq!(config.tip.model, "gemini-2.0-flash");
        assert_eq!(config.tip.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.forecast.seed = Some(1234);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_seed_is_optional_in_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            r#"
[location]
name = "Ocean Beach"

[forecast]
horizon_days = 3

[tip]
endpoint = "http://localhost:8080"
model = "local"
api_key_env = "LOCAL_KEY"
"#,
        )
        .unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.location.name, "Ocean Beach");
        assert_eq!(config.forecast.horizon_days, 3);
        assert_eq!(config.forecast.seed, None);
    }

    #[test]
    fn test_partial_file_keeps_given_values() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[location]\nname = \"Ninety Mile Beach\"\n").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.location.name, "Ninety Mile Beach");
        assert_eq!(config.forecast, ForecastConfig::default());
        assert_eq!(config.tip, TipConfig::default());

        let parsed: Config = toml::from_str("[forecast]\nseed = 9\n").unwrap();
        assert_eq!(parsed.forecast.horizon_days, DEFAULT_HORIZON_DAYS);
        assert_eq!(parsed.forecast.seed, Some(9));
        assert_eq!(parsed.location, LocationConfig::default());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[forecast\nhorizon_days = ").unwrap();
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.forecast.seed = Some(7);
        config.save_to_path(file.path()).unwrap();
        assert_eq!(Config::load_from_path(file.path()), config);
    }
}
