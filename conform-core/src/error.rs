//! Error types for conform-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading run settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with the line context from serde_yaml.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Well-formed YAML with a value conform cannot use.
    #[error("invalid settings at {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}
