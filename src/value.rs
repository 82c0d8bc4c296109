//! Configuration mappings.
//!
//! Loaders build a mutable [`ConfigMap`] and hand it to the reader frozen
//! as a [`Level`], so one level's data cannot be edited through a handle
//! that looks like the merged configuration.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// Insertion-ordered mapping of config keys to values.
pub type ConfigMap = IndexMap<String, Value>;

/// Read-only snapshot of one loader's mapping.
///
/// Cloning is cheap; all clones share the same data.
#[derive(Clone, Default, PartialEq)]
pub struct Level {
    entries: Arc<ConfigMap>,
}

impl Level {
    /// An empty level, as produced for a missing source.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Copy the level into a new, independently mutable map.
    pub fn to_map(&self) -> ConfigMap {
        self.entries.as_ref().clone()
    }
}

impl From<ConfigMap> for Level {
    fn from(map: ConfigMap) -> Self {
        Self {
            entries: Arc::new(map),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Level {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<ConfigMap>()
            .into()
    }
}

impl<'a> IntoIterator for &'a Level {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
