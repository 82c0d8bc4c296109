//! Ordered, caller-mutable collection of loaders.

use std::fmt;

use crate::loader::Loader;

pub(crate) struct Entry {
    pub(crate) name: Option<String>,
    pub(crate) loader: Box<dyn Loader>,
}

impl Entry {
    /// Label used in logs: the level name when set, else the loader's description.
    pub(crate) fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.loader.describe(),
        }
    }
}

/// The loaders of a [`ConfigReader`](crate::ConfigReader), highest priority first.
///
/// Level names are unique: adding a named loader whose name is already
/// present drops the earlier entry. Indices past the end are clamped, so
/// `insert(usize::MAX, ..)` appends.
#[derive(Default)]
pub struct LoaderSet {
    entries: Vec<Entry>,
}

impl LoaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unnamed loader with the lowest priority so far.
    pub fn push(&mut self, loader: impl Loader + 'static) {
        self.push_boxed(None, Box::new(loader));
    }

    /// Append a named loader with the lowest priority so far.
    pub fn push_named(&mut self, name: impl Into<String>, loader: impl Loader + 'static) {
        self.push_boxed(Some(name.into()), Box::new(loader));
    }

    /// Insert an unnamed loader at `index`; index 0 is the highest priority.
    pub fn insert(&mut self, index: usize, loader: impl Loader + 'static) {
        self.insert_boxed(index, None, Box::new(loader));
    }

    /// Insert a named loader at `index`; index 0 is the highest priority.
    pub fn insert_named(
        &mut self,
        index: usize,
        name: impl Into<String>,
        loader: impl Loader + 'static,
    ) {
        self.insert_boxed(index, Some(name.into()), Box::new(loader));
    }

    /// Append an already boxed loader.
    pub fn push_boxed(&mut self, name: Option<String>, loader: Box<dyn Loader>) {
        self.insert_boxed(usize::MAX, name, loader);
    }

    /// Insert an already boxed loader at `index`.
    pub fn insert_boxed(&mut self, index: usize, name: Option<String>, loader: Box<dyn Loader>) {
        if let Some(name) = &name {
            self.remove_named(name);
        }
        let index = index.min(self.entries.len());
        self.entries.insert(index, Entry { name, loader });
    }

    /// Remove the loader at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Loader>> {
        (index < self.entries.len()).then(|| self.entries.remove(index).loader)
    }

    /// Remove the loader registered under `name`, if any.
    pub fn remove_named(&mut self, name: &str) -> Option<Box<dyn Loader>> {
        let index = self.position(name)?;
        Some(self.entries.remove(index).loader)
    }

    /// Index of the level called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name.as_deref() == Some(name))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Level names in priority order; `None` for unnamed loaders.
    pub fn names(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|e| e.name.as_deref())
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl fmt::Debug for LoaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&entry.loader.describe())?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticLoader;

    fn names(set: &LoaderSet) -> Vec<Option<&str>> {
        set.names().collect()
    }

    #[test]
    fn push_and_insert_keep_order() {
        let mut set = LoaderSet::new();
        set.push_named("user", StaticLoader::default());
        set.insert_named(0, "local", StaticLoader::default());
        set.push(StaticLoader::default());
        assert_eq!(names(&set), vec![Some("local"), Some("user"), None]);
    }

    #[test]
    fn insert_past_end_appends() {
        let mut set = LoaderSet::new();
        set.push_named("a", StaticLoader::default());
        set.insert_named(10, "b", StaticLoader::default());
        assert_eq!(names(&set), vec![Some("a"), Some("b")]);
    }

    #[test]
    fn duplicate_name_replaces_entry() {
        let mut set = LoaderSet::new();
        set.push_named("a", StaticLoader::default());
        set.push_named("b", StaticLoader::default());
        set.insert_named(0, "b", StaticLoader::default());
        assert_eq!(names(&set), vec![Some("b"), Some("a")]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_by_index_and_name() {
        let mut set = LoaderSet::new();
        set.push_named("a", StaticLoader::default());
        set.push_named("b", StaticLoader::default());
        set.push_named("c", StaticLoader::default());

        assert!(set.remove(5).is_none());
        assert!(set.remove(0).is_some());
        assert!(set.remove_named("missing").is_none());
        assert!(set.remove_named("c").is_some());
        assert_eq!(names(&set), vec![Some("b")]);
    }

    #[test]
    fn debug_lists_descriptions() {
        let mut set = LoaderSet::new();
        set.push(StaticLoader::default());
        set.push(StaticLoader::default());
        assert_eq!(format!("{set:?}"), "[StaticLoader(0 keys), StaticLoader(0 keys)]");
    }
}
