//! File-backed loader.
//!
//! Reads the whole file on each invocation and hands the text to an
//! injected parse function. A missing file is an empty level.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::format::{self, Format, Parser};
use crate::loader::Loader;
use crate::value::Level;

/// Loader reading one config file.
#[derive(Clone)]
pub struct FileLoader {
    path: PathBuf,
    parser: Parser,
}

impl FileLoader {
    /// Create a loader for `path` decoded with `parser`.
    pub fn new(path: impl Into<PathBuf>, parser: Parser) -> Self {
        Self {
            path: path.into(),
            parser,
        }
    }

    /// Create a loader that parses JSON.
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::new(path, format::json())
    }

    /// Create a loader whose format follows the file extension, falling back to JSON.
    pub fn detect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path).unwrap_or_default();
        Self::new(path, format.parser())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for FileLoader {
    fn load(&self) -> Result<Level> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(path = %self.path.display(), "config file not found, using empty level");
                return Ok(Level::empty());
            }
            Err(e) => {
                return Err(ConfigError::ReadFile {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let map = (self.parser)(&content).map_err(|e| ConfigError::ParseFile {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), keys = map.len(), "loaded config file");
        Ok(map.into())
    }

    fn describe(&self) -> String {
        format!("FileLoader('{}')", self.path.display())
    }
}

impl fmt::Debug for FileLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLoader")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error as _;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileLoader::json(dir.path().join("absent.json"));
        let level = loader.load().unwrap();
        assert!(level.is_empty());
    }

    #[test]
    fn reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        std::fs::write(&path, r#"{"i": 123, "b": "default string"}"#).unwrap();

        let level = FileLoader::json(&path).load().unwrap();
        assert_eq!(level.get("i"), Some(&json!(123)));
        assert_eq!(level.get("b"), Some(&json!("default string")));
    }

    #[test]
    fn invalid_file_names_path_and_chains_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileLoader::json(&path).load().unwrap_err();
        match &err {
            ConfigError::ParseFile { path: p, .. } => assert_eq!(p, &path),
            other => panic!("expected ParseFile, got {other:?}"),
        }
        assert!(err.to_string().contains(&path.display().to_string()));
        let cause = err.source().unwrap();
        assert!(cause.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileLoader::json(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn custom_parser_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.conf");
        std::fs::write(&path, "name=demo\nport=8080\n").unwrap();

        let parser = format::parser_fn(|text| {
            Ok(text
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(k, v)| (k.trim().to_string(), json!(v.trim())))
                .collect())
        });
        let level = FileLoader::new(&path, parser).load().unwrap();
        assert_eq!(level.get("name"), Some(&json!("demo")));
        assert_eq!(level.get("port"), Some(&json!("8080")));
    }

    #[test]
    fn detect_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        std::fs::write(&path, "port = 8080\n").unwrap();

        let level = FileLoader::detect(&path).load().unwrap();
        assert_eq!(level.get("port"), Some(&json!(8080)));
    }

    #[test]
    fn rereads_file_on_each_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        let loader = FileLoader::json(&path);

        assert!(loader.load().unwrap().is_empty());
        std::fs::write(&path, r#"{"v": 1}"#).unwrap();
        assert_eq!(loader.load().unwrap().get("v"), Some(&json!(1)));
        std::fs::write(&path, r#"{"v": 2}"#).unwrap();
        assert_eq!(loader.load().unwrap().get("v"), Some(&json!(2)));
    }

    #[test]
    fn describe_names_path() {
        let loader = FileLoader::json("/etc/app.json");
        assert_eq!(loader.describe(), "FileLoader('/etc/app.json')");
    }
}
