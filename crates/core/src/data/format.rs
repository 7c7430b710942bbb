//! Translation file formats

use crate::error::{Error, Result};
use serde_yaml::Value;
use std::path::Path;

/// Serialization format of a translation file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON, everything else is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    /// Parse file content; an empty document parses as `Null`
    pub fn parse(self, content: &str, path: &Path) -> Result<Value> {
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }

        match self {
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| Error::data_parse(path, e)),
            Format::Json => serde_json::from_str(content).map_err(|e| Error::data_parse(path, e)),
        }
    }

    /// Serialize a document, always ending with a newline
    pub fn dump(self, value: &Value, path: &Path) -> Result<String> {
        let mut out = match self {
            Format::Yaml => serde_yaml::to_string(value)
                .map(|s| s.strip_prefix("---\n").map(str::to_string).unwrap_or(s))
                .map_err(|e| Error::data_write(path, e))?,
            Format::Json => {
                serde_json::to_string_pretty(value).map_err(|e| Error::data_write(path, e))?
            }
        };

        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("en.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("en.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("locales/en.JSON")), Format::Json);
    }

    #[test]
    fn test_parse_empty_is_null() {
        let value = Format::Yaml.parse("  \n", Path::new("en.yml")).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Format::Json
            .parse("{\"en\": ", Path::new("config/locales/en.json"))
            .unwrap_err();
        assert!(err.message.contains("config/locales/en.json"));
    }

    #[test]
    fn test_json_dump_ends_with_newline() {
        let value: Value = serde_yaml::from_str("en:\n  hello: Hello\n").unwrap();
        let out = Format::Json.dump(&value, Path::new("en.json")).unwrap();
        assert!(out.ends_with("}\n"));
        assert!(out.contains("\"hello\": \"Hello\""));
    }
}
