//! Configuration management for igcdump.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use clap::ValueEnum;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "igcdump";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "IGCDUMP_";

/// Most decimal places worth printing for a coordinate (about 0.1 mm).
const MAX_PRECISION: usize = 9;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `IGCDUMP_`, sections separated
///    by `__`, e.g. `IGCDUMP_OUTPUT__FORMAT=json`)
/// 2. TOML config file at `~/.config/igcdump/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,
    /// Record listing configuration.
    pub records: RecordsConfig,
}

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Indent JSON output.
    pub pretty: bool,
    /// Decimal places for coordinates in plain output.
    pub precision: usize,
}

/// Record listing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// List lines no grammar matched.
    pub include_unknown: bool,
}

/// Output format for decoded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Plain,
    /// JSON output
    Json,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            pretty: false,
            precision: 5,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.output.precision > MAX_PRECISION {
            return Err(Error::config_validation(format!(
                "output.precision ({}) cannot be greater than {MAX_PRECISION}",
                self.output.precision
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("igcdump-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.output.format, OutputFormat::Plain);
        assert!(!config.output.pretty);
        assert_eq!(config.output.precision, 5);
        assert!(!config.records.include_unknown);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_precision_too_large() {
        let mut config = Config::default();
        config.output.precision = 12;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("output.precision"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = write_config(
            "valid.toml",
            "[output]\nformat = \"json\"\npretty = true\n\n[records]\ninclude_unknown = true\n",
        );
        let config = Config::load_from(Some(path)).unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert_eq!(config.output.precision, 5);
        assert!(config.records.include_unknown);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = write_config("invalid.toml", "[output]\nprecision = 20\n");
        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_load_rejects_unknown_format() {
        let path = write_config("bad-format.toml", "[output]\nformat = \"xml\"\n");
        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("igcdump"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_output_format_serialize() {
        let json = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(json, "\"json\"");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let json = r#"{"output": {"precision": 3}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.output.precision, 3);
        assert_eq!(config.output.format, OutputFormat::Plain);
    }
}
