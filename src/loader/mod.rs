//! Loaders: the sources a [`ConfigReader`](crate::ConfigReader) reads from.
//!
//! A loader produces one level's mapping on demand. It is invoked once per
//! `load()` call and keeps no state between invocations, so a file that
//! changed on disk is picked up by the next load.

pub mod file;

use std::fmt;

use serde_json::Value;

use crate::error::Result;
use crate::value::{ConfigMap, Level};

pub use file::FileLoader;

/// A source of configuration values.
///
/// Implementations must treat an absent source as empty and only fail when
/// a source is present but unusable.
pub trait Loader {
    /// Produce this source's mapping.
    fn load(&self) -> Result<Level>;

    /// Human-readable label used in `Debug` output and logs.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<F> Loader for F
where
    F: Fn() -> Result<ConfigMap>,
{
    fn load(&self) -> Result<Level> {
        self().map(Level::from)
    }

    fn describe(&self) -> String {
        "fn".to_string()
    }
}

/// Loader returning a fixed in-memory mapping, typically built-in defaults.
#[derive(Clone, Default)]
pub struct StaticLoader {
    level: Level,
}

impl StaticLoader {
    pub fn new(map: ConfigMap) -> Self {
        Self { level: map.into() }
    }

    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self {
            level: pairs.into_iter().collect(),
        }
    }
}

impl Loader for StaticLoader {
    fn load(&self) -> Result<Level> {
        Ok(self.level.clone())
    }

    fn describe(&self) -> String {
        format!("StaticLoader({} keys)", self.level.len())
    }
}

impl fmt::Debug for StaticLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Loader wrapping an infallible callable that computes a mapping.
pub struct FnLoader<F> {
    label: String,
    produce: F,
}

impl<F> FnLoader<F>
where
    F: Fn() -> ConfigMap,
{
    pub fn new(label: impl Into<String>, produce: F) -> Self {
        Self {
            label: label.into(),
            produce,
        }
    }
}

impl<F> Loader for FnLoader<F>
where
    F: Fn() -> ConfigMap,
{
    fn load(&self) -> Result<Level> {
        Ok((self.produce)().into())
    }

    fn describe(&self) -> String {
        format!("FnLoader('{}')", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn static_loader_returns_its_map() {
        let loader = StaticLoader::from_pairs([("i", json!(123)), ("b", json!("default string"))]);
        let level = loader.load().unwrap();
        assert_eq!(level.get("i"), Some(&json!(123)));
        assert_eq!(level.get("b"), Some(&json!("default string")));
        assert_eq!(loader.describe(), "StaticLoader(2 keys)");
    }

    #[test]
    fn closure_is_a_loader() {
        let loader = || -> Result<ConfigMap> {
            let mut map = ConfigMap::new();
            map.insert("x".to_string(), json!(true));
            Ok(map)
        };
        let level = loader.load().unwrap();
        assert_eq!(level.get("x"), Some(&json!(true)));
    }

    #[test]
    fn closure_errors_propagate() {
        let loader = || -> Result<ConfigMap> { Err(ConfigError::loader("remote", "unreachable")) };
        let err = loader.load().unwrap_err();
        assert!(matches!(err, ConfigError::Loader { .. }));
    }

    #[test]
    fn fn_loader_is_invoked_on_every_load() {
        let calls = Cell::new(0);
        let loader = FnLoader::new("counter", || {
            calls.set(calls.get() + 1);
            let mut map = ConfigMap::new();
            map.insert("calls".to_string(), json!(calls.get()));
            map
        });
        assert_eq!(loader.load().unwrap().get("calls"), Some(&json!(1)));
        assert_eq!(loader.load().unwrap().get("calls"), Some(&json!(2)));
        assert_eq!(loader.describe(), "FnLoader('counter')");
    }
}
