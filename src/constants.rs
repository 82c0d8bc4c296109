//! Crate-wide constants.
//!
//! Centralises level names, the default filename pattern and the
//! environment variable names used for directory discovery.

/// Name of the level backed by a file in the current working directory.
pub const LEVEL_LOCAL: &str = "local";

/// Name of the level backed by a file in the per-user config directory.
pub const LEVEL_USER: &str = "user";

/// Prefix of the default config filename (`.{app_name}conf`).
pub const DEFAULT_FILENAME_PREFIX: &str = ".";

/// Suffix of the default config filename (`.{app_name}conf`).
pub const DEFAULT_FILENAME_SUFFIX: &str = "conf";

/// Directory under the home directory holding per-user config on non-Windows platforms.
pub const XDG_CONFIG_DIR: &str = ".config";

/// Message carried by [`crate::ConfigError::NotLoaded`].
pub const NOT_LOADED_MESSAGE: &str = "Config not loaded. Call load() before reading.";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_HOME: &str = "HOME";
pub const ENV_LOCAL_APP_DATA: &str = "LOCALAPPDATA";
