//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, or from the first standard
    /// location found under `root`, or fall back to defaults
    pub fn load(root: &Path, path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                let p = if p.is_absolute() { p.to_path_buf() } else { root.join(p) };
                if !p.exists() {
                    return Err(Error::config_not_found(&p));
                }
                Some(p)
            }
            None => find_config_file(root),
        };

        let schema = if let Some(ref p) = config_path {
            tracing::debug!(path = %p.display(), "loading configuration");
            load_config_file(p)?
        } else {
            tracing::debug!("no configuration file found, using defaults");
            ConfigSchema::default()
        };

        schema.validate().context("While validating the configuration")?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file(root: &Path) -> Option<PathBuf> {
    let candidates = [
        "config/i18n-tasks.yml",
        "config/i18n-tasks.yaml",
        ".i18n-tasks.yml",
        ".i18n-tasks.toml",
        "i18n-tasks.toml",
    ];

    candidates
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
}

/// Load and parse a YAML or TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml" | "yaml")
    );

    let parsed = if is_yaml {
        serde_yaml::from_str::<Option<ConfigSchema>>(&content)
            .map(Option::unwrap_or_default)
            .map_err(|e| e.to_string())
    } else {
        toml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| {
        Error::new(
            crate::error::ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.base_locale, "en");
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path(), None).unwrap();
        assert!(config.path.is_none());
    }

    #[test]
    fn test_config_load_yaml() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join("config/i18n-tasks.yml"),
            "base_locale: de\nlocales: [de, en]\nignore_unused:\n  - 'errors.*'\n",
        )
        .unwrap();

        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config.schema.base_locale, "de");
        assert_eq!(
            config.schema.locales,
            Some(vec!["de".to_string(), "en".to_string()])
        );
        assert_eq!(config.schema.ignore_unused, vec!["errors.*"]);
    }

    #[test]
    fn test_config_load_empty_yaml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".i18n-tasks.yml"), "").unwrap();

        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config.schema.base_locale, "en");
    }

    #[test]
    fn test_config_load_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("i18n-tasks.toml"),
            "base_locale = \"fr\"\n\n[search]\npaths = [\"src/\"]\n",
        )
        .unwrap();

        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config.schema.base_locale, "fr");
        assert_eq!(config.schema.search.paths, vec!["src/"]);
    }

    #[test]
    fn test_config_explicit_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path(), Some(Path::new("nope.yml"))).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".i18n-tasks.yml"), "base_locale: [unclosed").unwrap();

        let err = Config::load(dir.path(), None).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigParseError);
    }
}
