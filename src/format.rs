//! Parse functions for file-backed loaders.
//!
//! A [`Parser`] turns the full text of a config file into a [`ConfigMap`].
//! JSON is the default; TOML and YAML are provided through the same
//! injection point, and callers can supply any other function.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;
use crate::value::ConfigMap;

/// Shared parse function: full file text in, top-level mapping out.
pub type Parser = Arc<dyn Fn(&str) -> Result<ConfigMap, BoxError> + Send + Sync>;

/// Built-in file formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    /// The parse function for this format.
    pub fn parser(self) -> Parser {
        match self {
            Format::Json => json(),
            Format::Toml => toml(),
            Format::Yaml => yaml(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Toml => write!(f, "toml"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(format!("unknown config format: {other}")),
        }
    }
}

/// Wrap a plain function or closure as a [`Parser`].
pub fn parser_fn<F>(f: F) -> Parser
where
    F: Fn(&str) -> Result<ConfigMap, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// JSON object text to mapping.
pub fn json() -> Parser {
    parser_fn(|text| Ok(serde_json::from_str::<ConfigMap>(text)?))
}

/// TOML document to mapping. Datetimes become their RFC 3339 string form.
pub fn toml() -> Parser {
    parser_fn(|text| {
        let table: toml::Table = toml::from_str(text)?;
        Ok(table
            .into_iter()
            .map(|(k, v)| (k, toml_to_json(v)))
            .collect())
    })
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        // NaN and infinities have no JSON number form
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// YAML mapping to mapping. An empty document yields an empty mapping.
pub fn yaml() -> Parser {
    parser_fn(|text| {
        if text.trim().is_empty() {
            return Ok(ConfigMap::new());
        }
        Ok(serde_yaml_ng::from_str::<ConfigMap>(text)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_parses_object() {
        let map = json()(r#"{"i": 123, "b": "default string"}"#).unwrap();
        assert_eq!(map["i"], json!(123));
        assert_eq!(map["b"], json!("default string"));
    }

    #[test]
    fn json_rejects_non_object() {
        assert!(json()("[1, 2, 3]").is_err());
        assert!(json()("{ not json").is_err());
    }

    #[test]
    fn toml_parses_tables() {
        let map = toml()(
            r#"
name = "app"

[server]
port = 8080
"#,
        )
        .unwrap();
        assert_eq!(map["name"], json!("app"));
        assert_eq!(map["server"], json!({"port": 8080}));
    }

    #[test]
    fn toml_datetime_becomes_string() {
        let map = toml()(
            r#"
released = 1979-05-27T07:32:00Z
day = 1979-05-27

[nested]
at = [07:32:00]
"#,
        )
        .unwrap();
        assert_eq!(map["released"], json!("1979-05-27T07:32:00Z"));
        assert_eq!(map["day"], json!("1979-05-27"));
        assert_eq!(map["nested"], json!({"at": ["07:32:00"]}));
    }

    #[test]
    fn toml_non_finite_float_kept_as_string() {
        let map = toml()("ratio = 1.5\nlimit = inf\n").unwrap();
        assert_eq!(map["ratio"], json!(1.5));
        assert_eq!(map["limit"], json!("inf"));
    }

    #[test]
    fn toml_rejects_invalid() {
        assert!(toml()("not valid {{ toml").is_err());
    }

    #[test]
    fn yaml_parses_mapping() {
        let map = yaml()("i: 123\nlist: [a, b]\n").unwrap();
        assert_eq!(map["i"], json!(123));
        assert_eq!(map["list"], json!(["a", "b"]));
    }

    #[test]
    fn yaml_empty_document_is_empty_map() {
        assert!(yaml()("").unwrap().is_empty());
        assert!(yaml()("   \n").unwrap().is_empty());
    }

    #[test]
    fn yaml_rejects_scalar_document() {
        assert!(yaml()("just a string").is_err());
    }

    #[test]
    fn format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.TOML")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("c.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new(".myappconf")), None);
    }

    #[test]
    fn format_display_round_trips() {
        for format in [Format::Json, Format::Toml, Format::Yaml] {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
    }
}
