//! Error types for config loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or directory could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A layer is not valid JSON5.
    #[error("{layer} is not valid JSON5: {source}")]
    Syntax {
        layer: String,
        #[source]
        source: json5::Error,
    },
    /// The merged value does not match the config model.
    #[error("config does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),
    /// A specific field failed validation.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// A cross-field check failed.
    #[error("invalid config: {0}")]
    Invalid(String),
}
