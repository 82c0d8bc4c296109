//! The layered configuration reader.
//!
//! Priority (highest to lowest) follows loader order: the loader at index 0
//! wins over every loader after it.
//!
//! Lifecycle:
//! - Before the first successful [`ConfigReader::load`], every read fails
//!   with [`ConfigError::NotLoaded`].
//! - Each `load()` re-reads the *current* loader list and replaces the
//!   resolved state wholesale.
//! - A failed `load()` leaves the previous state untouched: an unloaded
//!   reader stays unloaded, a loaded one keeps serving its last good view.

mod set;

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::loader::Loader;
use crate::value::{ConfigMap, Level};

pub use set::LoaderSet;

/// Post-merge hook; edits the merged mapping in place.
pub type ModifyHook = Box<dyn Fn(&mut ConfigMap)>;

/// How levels are combined into one view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Keep levels separate and search them in order on every lookup.
    PrioritySearch,
    /// Flatten levels into one mapping, replaying them lowest priority
    /// first, then run the modify hook on the result.
    #[default]
    Merge,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::PrioritySearch => write!(f, "priority-search"),
            Resolution::Merge => write!(f, "merge"),
        }
    }
}

/// State installed by a successful load.
struct Resolved {
    resolution: Resolution,
    names: Vec<Option<String>>,
    levels: Vec<Level>,
    /// Union of all levels, first level wins. Has the modify hook applied
    /// in merge mode.
    view: ConfigMap,
}

impl Resolved {
    fn lookup(&self, key: &str) -> Option<&Value> {
        match self.resolution {
            Resolution::PrioritySearch => self.levels.iter().find_map(|level| level.get(key)),
            Resolution::Merge => self.view.get(key),
        }
    }
}

/// Aggregates ordered loaders into one read-only configuration view.
#[derive(Default)]
pub struct ConfigReader {
    loaders: LoaderSet,
    resolution: Resolution,
    modify: Option<ModifyHook>,
    state: Option<Resolved>,
}

impl ConfigReader {
    /// Build a reader over unnamed loaders, highest priority first.
    pub fn new<I>(loaders: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Loader>>,
    {
        let mut set = LoaderSet::new();
        for loader in loaders {
            set.push_boxed(None, loader);
        }
        Self::from_set(set)
    }

    /// Build a reader over named levels, highest priority first.
    pub fn from_levels<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = (S, Box<dyn Loader>)>,
        S: Into<String>,
    {
        let mut set = LoaderSet::new();
        for (name, loader) in levels {
            set.push_boxed(Some(name.into()), loader);
        }
        Self::from_set(set)
    }

    pub fn from_set(loaders: LoaderSet) -> Self {
        Self {
            loaders,
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_modify(mut self, hook: impl Fn(&mut ConfigMap) + 'static) -> Self {
        self.modify = Some(Box::new(hook));
        self
    }

    /// Takes effect on the next `load()`.
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    /// Takes effect on the next `load()`.
    pub fn set_modify(&mut self, hook: impl Fn(&mut ConfigMap) + 'static) {
        self.modify = Some(Box::new(hook));
    }

    pub fn clear_modify(&mut self) {
        self.modify = None;
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn loaders(&self) -> &LoaderSet {
        &self.loaders
    }

    /// Mutable access to the loader list. Changes are seen by the next `load()`.
    pub fn loaders_mut(&mut self) -> &mut LoaderSet {
        &mut self.loaders
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Invoke every loader in order and install the resolved view.
    ///
    /// Any loader error aborts the whole load; the previously resolved
    /// state, if any, stays in place. Errors that do not already name their
    /// source are wrapped in [`ConfigError::Loader`] with the level label.
    pub fn load(&mut self) -> Result<()> {
        let entries = self.loaders.entries();
        let mut names = Vec::with_capacity(entries.len());
        let mut levels = Vec::with_capacity(entries.len());

        for entry in entries {
            let level = entry.loader.load().map_err(|e| {
                tracing::warn!(
                    loader = %entry.label(),
                    error = %e,
                    "config loader failed, keeping previous state"
                );
                match e {
                    ConfigError::ReadFile { .. }
                    | ConfigError::ParseFile { .. }
                    | ConfigError::Loader { .. } => e,
                    other => ConfigError::loader(entry.label(), other),
                }
            })?;
            tracing::debug!(loader = %entry.label(), keys = level.len(), "invoked config loader");
            names.push(entry.name.clone());
            levels.push(level);
        }

        let mut view = ConfigMap::new();
        for level in levels.iter().rev() {
            for (key, value) in level {
                view.insert(key.clone(), value.clone());
            }
        }

        if let Some(hook) = &self.modify {
            match self.resolution {
                Resolution::Merge => hook(&mut view),
                Resolution::PrioritySearch => {
                    tracing::warn!("modify hook ignored in priority-search resolution");
                }
            }
        }

        tracing::debug!(
            levels = levels.len(),
            keys = view.len(),
            resolution = %self.resolution,
            "config loaded"
        );

        self.state = Some(Resolved {
            resolution: self.resolution,
            names,
            levels,
            view,
        });
        Ok(())
    }

    fn resolved(&self) -> Result<&Resolved> {
        self.state.as_ref().ok_or(ConfigError::NotLoaded)
    }

    /// Look up `key`, failing if no level defines it.
    pub fn get_item(&self, key: &str) -> Result<&Value> {
        self.resolved()?
            .lookup(key)
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Look up `key`, returning `None` if no level defines it.
    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.resolved()?.lookup(key))
    }

    /// Look up `key`, returning `default` if no level defines it.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> Result<&'a Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Look up `key` and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.get_item(key)?;
        T::deserialize(value).map_err(|e| ConfigError::Deserialize {
            key: key.to_string(),
            source: e,
        })
    }

    /// Deserialize the whole resolved view into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let object: serde_json::Map<String, Value> = self
            .iter()?
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        serde_json::from_value(Value::Object(object)).map_err(|e| ConfigError::Extract { source: e })
    }

    /// The raw mapping of the level called `name`.
    pub fn get_level(&self, name: &str) -> Result<&Level> {
        let resolved = self.resolved()?;
        resolved
            .names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .map(|index| &resolved.levels[index])
            .ok_or_else(|| ConfigError::UnknownLevel {
                name: name.to_string(),
            })
    }

    /// Every level's raw mapping, in priority order.
    pub fn levels(&self) -> Result<&[Level]> {
        Ok(&self.resolved()?.levels)
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.resolved()?.lookup(key).is_some())
    }

    /// Number of distinct keys in the resolved view.
    pub fn len(&self) -> Result<usize> {
        Ok(self.resolved()?.view.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.resolved()?.view.is_empty())
    }

    pub fn keys(&self) -> Result<impl Iterator<Item = &str>> {
        Ok(self.resolved()?.view.keys().map(String::as_str))
    }

    /// Key-value pairs of the resolved view.
    pub fn iter(&self) -> Result<indexmap::map::Iter<'_, String, Value>> {
        Ok(self.resolved()?.view.iter())
    }

    /// Copy the resolved view into an owned map.
    pub fn to_map(&self) -> Result<ConfigMap> {
        Ok(self.resolved()?.view.clone())
    }
}

impl fmt::Debug for ConfigReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigReader({:?})", self.loaders)
    }
}
