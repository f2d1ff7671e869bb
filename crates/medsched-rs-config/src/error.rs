//! Failures raised while reading, merging, and checking desk configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists (or was demanded) but could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Unreadable {
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
    /// The merged document does not fit the config structs.
    #[error("config does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),
    /// A key is unknown or holds the wrong kind of value.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// A decoded setting is outside what the desk can use.
    #[error("{key} must {requirement}")]
    OutOfRange {
        key: &'static str,
        requirement: &'static str,
    },
}
