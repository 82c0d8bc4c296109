//! Default config file locations.
//!
//! Two candidates, checked in this order:
//! 1. `.{app_name}conf` (or an explicit filename) relative to the working directory
//! 2. the same filename inside the per-user config directory:
//!    - Windows: `%LOCALAPPDATA%\{app_name}`
//!    - elsewhere: `~/.config/{app_name}`

use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_FILENAME_PREFIX, DEFAULT_FILENAME_SUFFIX, ENV_HOME, ENV_LOCAL_APP_DATA, LEVEL_LOCAL,
    LEVEL_USER, XDG_CONFIG_DIR,
};
use crate::env::Env;
use crate::error::{ConfigError, Result};
use crate::format::Parser;
use crate::loader::FileLoader;
use crate::reader::ConfigReader;

/// Candidate config file paths, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPaths {
    pub local: PathBuf,
    pub user: PathBuf,
}

impl DefaultPaths {
    /// `(level name, path)` pairs in priority order.
    pub fn levels(&self) -> [(&'static str, &Path); 2] {
        [(LEVEL_LOCAL, self.local.as_path()), (LEVEL_USER, self.user.as_path())]
    }
}

/// Default filename for `app_name`, e.g. `.myappconf`.
pub fn default_filename(app_name: &str) -> String {
    format!("{DEFAULT_FILENAME_PREFIX}{app_name}{DEFAULT_FILENAME_SUFFIX}")
}

/// Per-user config directory for `app_name` on the current platform.
pub fn default_config_dir(app_name: &str, env: &Env) -> Result<PathBuf> {
    config_dir_for(app_name, env, cfg!(windows))
}

fn config_dir_for(app_name: &str, env: &Env, windows: bool) -> Result<PathBuf> {
    let base = if windows {
        env.path_var(ENV_LOCAL_APP_DATA)
            .or_else(|| env.is_real().then(dirs::data_local_dir).flatten())
    } else {
        env.path_var(ENV_HOME)
            .or_else(|| env.is_real().then(dirs::home_dir).flatten())
            .map(|home| home.join(XDG_CONFIG_DIR))
    };

    base.map(|dir| dir.join(app_name))
        .ok_or_else(|| ConfigError::ConfigDirUnavailable {
            app_name: app_name.to_string(),
        })
}

/// Local and per-user candidate paths for `app_name`.
pub fn default_paths(app_name: &str, filename: Option<&Path>, env: &Env) -> Result<DefaultPaths> {
    let filename = filename
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_filename(app_name)));
    let user = default_config_dir(app_name, env)?.join(&filename);

    Ok(DefaultPaths {
        local: filename,
        user,
    })
}

/// Build a reader with `local` and `user` file levels for `app_name`.
pub fn file_reader(app_name: &str, filename: Option<&Path>, parser: Parser) -> Result<ConfigReader> {
    file_reader_with_env(app_name, filename, parser, &Env::real())
}

/// Same as [`file_reader`], resolving directories through `env`.
pub fn file_reader_with_env(
    app_name: &str,
    filename: Option<&Path>,
    parser: Parser,
    env: &Env,
) -> Result<ConfigReader> {
    let paths = default_paths(app_name, filename, env)?;
    let mut reader = ConfigReader::default();
    for (name, path) in paths.levels() {
        reader
            .loaders_mut()
            .push_named(name, FileLoader::new(path, parser.clone()));
    }
    Ok(reader)
}
