//! Environment variable abstraction for testability.
//!
//! Directory discovery reads `HOME` / `LOCALAPPDATA` through [`Env`] so that
//! tests can point it at a temporary directory via [`Env::mock()`] instead
//! of calling `std::env::set_var`.

use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable reader.
///
/// Production code uses [`Env::real()`]; tests supply a fixed set of values.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    #[doc(hidden)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Look up a variable holding a directory. Empty values count as unset.
    pub fn path_var(&self, name: &str) -> Option<PathBuf> {
        self.var(name)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Whether lookups go to the real process environment.
    pub fn is_real(&self) -> bool {
        self.overrides.is_none()
    }
}
