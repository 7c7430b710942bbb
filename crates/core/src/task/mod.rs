//! The i18n task engine
//!
//! `I18nTask` ties the configuration, the translation store and the source
//! scanner together. Every command of the CLI is a method call on it:
//!
//! ```rust,no_run
//! use i18n_tasks_core::config::Config;
//! use i18n_tasks_core::task::{I18nTask, MissingKind};
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("."), None)?;
//! let task = I18nTask::new(config, ".")?;
//! let missing = task.missing_keys(task.locales(), &MissingKind::ALL)?;
//! println!("{} missing translations", missing.len());
//! # Ok::<(), i18n_tasks_core::Error>(())
//! ```

mod fill;
mod missing;
mod unused;

pub use fill::{humanize_key, FillFrom, FillStrategy, ValueTemplate};
pub use missing::{MissingKey, MissingKind};
pub use unused::UnusedKey;

use crate::config::Config;
use crate::data::FileSystemData;
use crate::error::{Result, ResultExt};
use crate::key_pattern::{KeyPattern, KeyPatternSet};
use crate::scanner::{PatternScanner, UsedKey};
use serde_yaml::Mapping;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Locale key in `ignore_eq_base` that applies to every locale
const ALL_LOCALES: &str = "all";

/// Translation tasks over one project
pub struct I18nTask {
    config: Config,
    root: PathBuf,
    store: FileSystemData,
    scanner: PatternScanner,
    locales: Vec<String>,
    ignore_missing: KeyPatternSet,
    ignore_unused: KeyPatternSet,
    ignore_eq_base: BTreeMap<String, KeyPatternSet>,
}

impl I18nTask {
    /// Build the engine for a project root
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let schema = &config.schema;

        let store = FileSystemData::new(&root, &schema.data)?;
        let scanner = PatternScanner::new(&root, &schema.search)
            .context("While preparing the source scanner")?;

        let mut ignore_missing = KeyPatternSet::new(&schema.ignore_missing)?;
        let mut ignore_unused = KeyPatternSet::new(&schema.ignore_unused)?;
        ignore_missing.extend(KeyPatternSet::new(&schema.ignore)?);
        ignore_unused.extend(KeyPatternSet::new(&schema.ignore)?);

        let ignore_eq_base = schema
            .ignore_eq_base
            .iter()
            .map(|(locale, patterns)| -> Result<(String, KeyPatternSet)> {
                Ok((locale.clone(), KeyPatternSet::new(patterns)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        let configured = match &schema.locales {
            Some(locales) => locales.clone(),
            None => store.available_locales()?,
        };
        let locales = order_locales(&schema.base_locale, configured);
        tracing::debug!(base = %schema.base_locale, ?locales, "resolved locales");

        Ok(Self {
            config,
            root,
            store,
            scanner,
            locales,
            ignore_missing,
            ignore_unused,
            ignore_eq_base,
        })
    }

    pub fn base_locale(&self) -> &str {
        &self.config.schema.base_locale
    }

    /// All locales, base locale first
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store(&self) -> &FileSystemData {
        &self.store
    }

    /// Current data of a locale
    pub fn data(&self, locale: &str) -> Result<Mapping> {
        self.store
            .read(locale)
            .context(format!("While reading locale {}", locale))
    }

    /// Keys referenced from source; occurrences are dropped unless `with_usages`
    pub fn used_keys(
        &self,
        filter: Option<&KeyPattern>,
        with_usages: bool,
    ) -> Result<Vec<UsedKey>> {
        let mut keys = self.scanner.keys(filter)?;
        if !with_usages {
            for key in &mut keys {
                key.usages.clear();
            }
        }
        Ok(keys)
    }

    /// Rewrite each locale sorted and routed to its configured files
    pub fn normalize_store(&self, locales: &[String]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for locale in locales {
            let data = self.data(locale)?;
            written.extend(self.store.write(locale, &data)?);
            tracing::info!(locale = %locale, "normalized");
        }
        Ok(written)
    }

    /// The effective configuration, with locales resolved
    pub fn config_for_inspect(&self) -> Result<serde_yaml::Value> {
        let mut schema = self.config.schema.clone();
        schema.locales = Some(self.locales.clone());
        Ok(serde_yaml::to_value(&schema)?)
    }

    fn is_eq_base_ignored(&self, locale: &str, key: &str) -> bool {
        [ALL_LOCALES, locale].iter().any(|l| {
            self.ignore_eq_base
                .get(*l)
                .is_some_and(|set| set.matches_any(key))
        })
    }
}

/// Base locale first, then the others in their given order without duplicates
fn order_locales(base: &str, locales: Vec<String>) -> Vec<String> {
    let mut ordered = vec![base.to_string()];
    for locale in locales {
        if !ordered.contains(&locale) {
            ordered.push(locale);
        }
    }
    ordered
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_locales_inferred_base_first() {
        let dir = project();
        write_file(dir.path(), "config/locales/de.yml", "de: {}\n");
        let task = task(dir.path());
        assert_eq!(task.locales(), &["en", "de", "es"]);
        assert_eq!(task.base_locale(), "en");
    }

    #[test]
    fn test_locales_from_config() {
        let dir = project();
        write_file(dir.path(), "config/i18n-tasks.yml", "locales: [es, en, es]\n");
        assert_eq!(task(dir.path()).locales(), &["en", "es"]);
    }

    #[test]
    fn test_used_keys_without_usages() {
        let dir = project();
        let keys = task(dir.path()).used_keys(None, false).unwrap();
        let names: Vec<&str> = keys.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(names, vec!["common.ok", "users.index.heading", "users.name", "users.title"]);
        assert!(keys.iter().all(|k| k.usages.is_empty()));
    }

    #[test]
    fn test_used_keys_with_filter() {
        let dir = project();
        let filter = KeyPattern::new("{common, users}.:").unwrap();
        let keys = task(dir.path()).used_keys(Some(&filter), true).unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys.iter().all(|k| !k.usages.is_empty()));
    }

    #[test]
    fn test_normalize_sorts_and_routes() {
        let dir = project();
        write_file(
            dir.path(),
            "config/i18n-tasks.yml",
            r#"
data:
  read:
    - config/locales/%{locale}.yml
    - config/locales/*.%{locale}.yml
  write:
    - ["common.*", "config/locales/common.%{locale}.yml"]
    - config/locales/%{locale}.yml
"#,
        );
        let task = task(dir.path());
        let written = task.normalize_store(&["en".to_string()]).unwrap();
        assert_eq!(written.len(), 2);

        assert_eq!(
            read_file(dir.path(), "config/locales/en.yml"),
            "en:\n  users:\n    name: Name\n    old_label: Old\n    title: Users\n"
        );
        assert_eq!(
            read_file(dir.path(), "config/locales/common.en.yml"),
            "en:\n  common:\n    ok: OK\n"
        );
        assert!(read_file(dir.path(), "config/locales/es.yml").contains("Usuarios"));
    }

    #[test]
    fn test_config_for_inspect() {
        let dir = project();
        let value = task(dir.path()).config_for_inspect().unwrap();
        let yaml = serde_yaml::to_string(&value).unwrap();
        assert!(yaml.contains("base_locale: en"));
        assert!(yaml.contains("- es"));
    }
}
