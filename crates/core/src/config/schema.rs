//! Configuration schema definitions
//!
//! Mirrors the layout of `config/i18n-tasks.yml`:
//!
//! ```yaml
//! base_locale: en
//! locales: [en, es]
//! data:
//!   read:
//!     - config/locales/%{locale}.yml
//!     - config/locales/*.%{locale}.yml
//!   write:
//!     - ["{devise, simple_form}.*", "config/locales/\\1.%{locale}.yml"]
//!     - config/locales/%{locale}.yml
//! search:
//!   paths: [app/]
//!   relative_roots: [app/views]
//! ignore_unused:
//!   - "activerecord.*"
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder replaced by the locale in data paths
pub const LOCALE_PLACEHOLDER: &str = "%{locale}";

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    /// Reference locale other locales are compared against
    #[serde(default = "default_base_locale")]
    pub base_locale: String,

    /// Locales to work with; inferred from the data files when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub search: SearchConfig,

    /// Keys never reported as missing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_missing: Vec<String>,

    /// Keys never reported as unused
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_unused: Vec<String>,

    /// Keys ignored by both the missing and the unused checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Keys allowed to equal the base value, per locale (`all` for every locale)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ignore_eq_base: BTreeMap<String, Vec<String>>,
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self {
            base_locale: default_base_locale(),
            locales: None,
            data: DataConfig::default(),
            search: SearchConfig::default(),
            ignore_missing: Vec::new(),
            ignore_unused: Vec::new(),
            ignore: Vec::new(),
            ignore_eq_base: BTreeMap::new(),
        }
    }
}

impl ConfigSchema {
    /// Reject configurations the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_locale.trim().is_empty() {
            return Err(Error::config_invalid("base_locale must not be empty"));
        }

        if self.data.read.is_empty() {
            return Err(Error::config_invalid("data.read must list at least one path"));
        }

        for pattern in &self.data.read {
            if !pattern.contains(LOCALE_PLACEHOLDER) {
                return Err(Error::config_invalid(format!(
                    "data.read path \"{}\" does not contain {}",
                    pattern, LOCALE_PLACEHOLDER
                ))
                .with_suggestion("Use a path such as config/locales/%{locale}.yml"));
            }
        }

        if self.data.write.is_empty() {
            return Err(Error::config_invalid("data.write must list at least one route"));
        }

        if let Some(pattern) = &self.search.pattern {
            let regex = Regex::new(pattern)?;
            if regex.captures_len() < 2 {
                return Err(Error::config_invalid(format!(
                    "search.pattern \"{}\" must capture the key in a group",
                    pattern
                )));
            }
        }

        Ok(())
    }
}

fn default_base_locale() -> String {
    "en".to_string()
}

/// Where translation data is read from and written to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path globs containing `%{locale}`, merged in order
    #[serde(default = "default_read")]
    pub read: Vec<String>,

    /// Routes deciding which file each key is written to
    #[serde(default = "default_write")]
    pub write: Vec<WriteRouteConfig>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            read: default_read(),
            write: default_write(),
        }
    }
}

fn default_read() -> Vec<String> {
    vec![format!("config/locales/{}.yml", LOCALE_PLACEHOLDER)]
}

fn default_write() -> Vec<WriteRouteConfig> {
    vec![WriteRouteConfig::Path(format!(
        "config/locales/{}.yml",
        LOCALE_PLACEHOLDER
    ))]
}

/// A write route as written in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WriteRouteConfig {
    /// Every key goes to this path
    Path(String),
    /// Keys matching the pattern go to the path
    Routed(String, String),
}

/// Source search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Directories to scan
    #[serde(default = "default_search_paths")]
    pub paths: Vec<String>,

    /// File name globs to include (all files when empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// File name globs to exclude
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Regex overriding the default translation call pattern; group 1 is the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Directories relative keys (`.title`) resolve against
    #[serde(default = "default_relative_roots")]
    pub relative_roots: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            paths: default_search_paths(),
            include: Vec::new(),
            exclude: default_exclude(),
            pattern: None,
            relative_roots: default_relative_roots(),
        }
    }
}

fn default_search_paths() -> Vec<String> {
    vec!["app/".to_string()]
}

fn default_exclude() -> Vec<String> {
    [
        "*.jpg", "*.png", "*.gif", "*.svg", "*.ico", "*.eot", "*.ttf", "*.woff", "*.pdf",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_relative_roots() -> Vec<String> {
    vec!["app/views".to_string()]
}
