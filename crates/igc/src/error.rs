//! Error types for igc.
//!
//! Decoding itself never fails: unmatched lines become unknown records. The
//! errors here cover the surrounding layer of reading input, loading
//! configuration and writing output.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for igc operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// Failed to read an IGC file.
    #[error("failed to read {path}: {source}")]
    ReadInput {
        /// Path of the input file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Reading stdin or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for igc operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an input read error.
    #[must_use]
    pub fn read_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadInput {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from loading or validating configuration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad(_) | Self::ConfigValidation { .. })
    }
}
