//! Locale data stored as YAML/JSON files on disk
//!
//! Reading merges every file matching the configured read globs. Writing
//! routes each key to the first write route that accepts it, so a single
//! normalize pass can move keys between files.

use super::format::Format;
use super::tree;
use crate::config::{DataConfig, WriteRouteConfig, LOCALE_PLACEHOLDER};
use crate::error::{Error, ErrorCode, Result, ResultExt};
use crate::file_scanner::relative_path;
use crate::key_pattern::KeyPattern;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// A compiled write route
#[derive(Debug, Clone)]
pub struct WriteRoute {
    pattern: Option<KeyPattern>,
    template: String,
}

impl WriteRoute {
    fn from_config(config: &WriteRouteConfig) -> Result<Self> {
        match config {
            WriteRouteConfig::Path(template) => Ok(Self {
                pattern: None,
                template: template.clone(),
            }),
            WriteRouteConfig::Routed(pattern, template) => Ok(Self {
                pattern: Some(KeyPattern::new(pattern)?),
                template: template.clone(),
            }),
        }
    }

    /// Relative path the key is written to, if this route accepts it
    pub fn path_for(&self, key: &str, locale: &str) -> Option<String> {
        let mut path = self.template.replace(LOCALE_PLACEHOLDER, locale);
        if let Some(pattern) = &self.pattern {
            if !pattern.matches(key) {
                return None;
            }
            for (i, capture) in pattern.captures(key).iter().enumerate() {
                path = path.replace(&format!("\\{}", i + 1), capture);
            }
        }
        Some(path)
    }
}

/// File-backed translation store
#[derive(Debug, Clone)]
pub struct FileSystemData {
    root: PathBuf,
    read: Vec<String>,
    write: Vec<WriteRoute>,
}

impl FileSystemData {
    /// Build the store for a project root
    pub fn new(root: impl Into<PathBuf>, config: &DataConfig) -> Result<Self> {
        let write = config
            .write
            .iter()
            .map(WriteRoute::from_config)
            .collect::<Result<Vec<_>>>()
            .context("While compiling data.write routes")?;

        Ok(Self {
            root: root.into(),
            read: config.read.clone(),
            write,
        })
    }

    /// Files the locale is read from, in merge order
    pub fn read_paths(&self, locale: &str) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for pattern in &self.read {
            for path in self.glob(&pattern.replace(LOCALE_PLACEHOLDER, locale))? {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
        Ok(paths)
    }

    /// Read and merge all data for a locale
    pub fn read(&self, locale: &str) -> Result<Mapping> {
        let mut merged = Mapping::new();

        for path in self.read_paths(locale)? {
            tracing::debug!(locale, path = %path.display(), "reading translations");
            let content = std::fs::read_to_string(&path)
                .map_err(Error::from)
                .context(format!("While reading {}", path.display()))?;

            let locale_tree = match Format::from_path(&path).parse(&content, &path)? {
                Value::Mapping(mut doc) => match doc.shift_remove(locale) {
                    Some(Value::Mapping(t)) => t,
                    _ => Mapping::new(),
                },
                _ => Mapping::new(),
            };

            tree::deep_merge(&mut merged, locale_tree);
        }

        Ok(merged)
    }

    /// Write a locale's data through the write routes
    ///
    /// Files that were read for the locale but receive no keys are rewritten
    /// with an empty locale root. Returns the files written.
    pub fn write(&self, locale: &str, data: &Mapping) -> Result<Vec<PathBuf>> {
        let mut files: BTreeMap<PathBuf, Mapping> = BTreeMap::new();

        for (key, path, value) in tree::leaf_paths(data) {
            let relative = self
                .write
                .iter()
                .find_map(|route| route.path_for(&key, locale))
                .ok_or_else(|| {
                    Error::new(
                        ErrorCode::DataWriteError,
                        format!("No data.write route accepts key \"{}\"", key),
                    )
                    .with_suggestion(
                        "End data.write with a plain path such as config/locales/%{locale}.yml",
                    )
                })?;
            tree::set_path(
                files.entry(self.root.join(relative)).or_default(),
                &path,
                value.clone(),
            );
        }

        for path in self.read_paths(locale)? {
            files.entry(path).or_default();
        }

        let mut written = Vec::with_capacity(files.len());
        for (path, subtree) in files {
            let mut doc = Mapping::new();
            doc.insert(
                Value::String(locale.to_string()),
                Value::Mapping(tree::sort(subtree)),
            );
            let content = Format::from_path(&path).dump(&Value::Mapping(doc), &path)?;

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::data_write(parent, e))?;
            }
            std::fs::write(&path, content).map_err(|e| Error::data_write(&path, e))?;
            tracing::debug!(locale, path = %path.display(), "wrote translations");
            written.push(path);
        }

        Ok(written)
    }

    /// Locales that have at least one data file
    pub fn available_locales(&self) -> Result<Vec<String>> {
        let mut locales = BTreeSet::new();

        for pattern in &self.read {
            let extractor = locale_extractor(pattern)?;
            for path in self.glob(&pattern.replace(LOCALE_PLACEHOLDER, "*"))? {
                let Some(relative) = relative_path(&self.root, &path) else {
                    continue;
                };
                if let Some(caps) = extractor.captures(&relative) {
                    locales.insert(caps[1].to_string());
                }
            }
        }

        Ok(locales.into_iter().collect())
    }

    /// Path relative to the project root, for display
    pub fn display_path(&self, path: &Path) -> String {
        relative_path(&self.root, path).unwrap_or_else(|| path.display().to_string())
    }

    fn glob(&self, relative_pattern: &str) -> Result<Vec<PathBuf>> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let full = format!("{}/{}", root.trim_end_matches('/'), relative_pattern);

        let mut paths: Vec<PathBuf> = glob::glob(&full)?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();
        Ok(paths)
    }
}

/// Regex capturing the locale from a path matching a read pattern
fn locale_extractor(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split(LOCALE_PLACEHOLDER)
        .map(|part| {
            regex::escape(part)
                .replace(r"\*\*/", "(?:[^/]+/)*")
                .replace(r"\*", "[^/]*")
                .replace(r"\?", "[^/]")
        })
        .collect::<Vec<_>>()
        .join("([^/.]+)");
    Ok(Regex::new(&format!("^{}$", body))?)
}
