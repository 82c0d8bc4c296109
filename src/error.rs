//! Errors raised while loading or reading layered configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by an injected parse function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Errors during config loading and lookup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{}", crate::constants::NOT_LOADED_MESSAGE)]
    NotLoaded,

    #[error("key '{key}' not in any config dictionary")]
    KeyNotFound { key: String },

    #[error("unknown config level '{name}'")]
    UnknownLevel { name: String },

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but the parse function rejected its content.
    #[error("error decoding config file {path}: {source}")]
    ParseFile { path: PathBuf, source: BoxError },

    /// A loader other than a file loader failed.
    #[error("loader for level '{level}' failed: {source}")]
    Loader { level: String, source: BoxError },

    #[error("config value for '{key}' has the wrong shape: {source}")]
    Deserialize {
        key: String,
        source: serde_json::Error,
    },

    #[error("config does not match the requested type: {source}")]
    Extract { source: serde_json::Error },

    #[error("unable to determine the config directory for '{app_name}'")]
    ConfigDirUnavailable { app_name: String },
}

impl ConfigError {
    /// Build a [`ConfigError::Loader`] from any error type.
    pub fn loader(level: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Loader {
            level: level.into(),
            source: source.into(),
        }
    }
}
