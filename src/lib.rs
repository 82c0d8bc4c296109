//! layerconf — layered configuration reader.
//!
//! A [`ConfigReader`] holds an ordered list of [`Loader`]s. Calling
//! [`ConfigReader::load`] invokes every loader and resolves their mappings
//! into one read-only view where earlier loaders take priority over later
//! ones.
//!
//! ```no_run
//! use layerconf::{StaticLoader, file_reader, format};
//! use serde_json::json;
//!
//! let mut reader = file_reader("myapp", None, format::json())?;
//! reader
//!     .loaders_mut()
//!     .push_named("defaults", StaticLoader::from_pairs([("retries", json!(3))]));
//! reader.load()?;
//!
//! let retries: u32 = reader.get_as("retries")?;
//! # Ok::<(), layerconf::ConfigError>(())
//! ```

pub mod constants;
pub mod env;
pub mod error;
pub mod format;
pub mod loader;
pub mod paths;
pub mod reader;
pub mod value;

pub use error::{BoxError, ConfigError, Result};
pub use format::{Format, Parser};
pub use loader::{FileLoader, FnLoader, Loader, StaticLoader};
pub use paths::{DefaultPaths, default_config_dir, default_paths, file_reader, file_reader_with_env};
pub use reader::{ConfigReader, LoaderSet, ModifyHook, Resolution};
pub use value::{ConfigMap, Level};
