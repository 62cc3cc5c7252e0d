//! Error type for the surfaces around the conversion pipeline
//!
//! The conversion itself is total and never fails. Errors only come from
//! reading input, decoding it and loading configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqfError {
    #[error("Invalid JSON delta: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML delta: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown input format '{0}' (expected auto, json or yaml)")]
    UnknownInputFormat(String),
}

pub type Result<T> = std::result::Result<T, SqfError>;
