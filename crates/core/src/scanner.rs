//! Source scanning for translation key usages
//!
//! Finds calls such as `t("users.title")`, `I18n.t 'users.title'` or
//! `translate(:title)` line by line. Keys starting with `.` are relative to
//! the view they appear in; keys with interpolation (`#{…}`, `${…}`) or a
//! trailing `.` are expression keys that match a family of keys.

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::file_scanner::{relative_path, FileScanner};
use crate::key_pattern::KeyPattern;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default translation call pattern; group 1 is the key literal
pub const DEFAULT_PATTERN: &str = r#"\bt(?:ranslate)?[( ]\s*(:?".+?"|:?'.+?'|:\w+)"#;

static VALID_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[\w.?!-]|#\{[^}]*\}|\$\{[^}]*\})+$").unwrap()
});

static INTERPOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#$]\{[^}]*\}").unwrap());

/// A single place a key is referenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Path relative to the project root
    pub path: String,
    /// 1-based line number
    pub line_num: usize,
    /// Byte offset of the key literal within the line
    pub pos: usize,
    /// The source line, trimmed
    pub line: String,
}

/// A key referenced from source, with where it is referenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsedKey {
    pub key: String,
    pub usages: Vec<Occurrence>,
}

impl UsedKey {
    /// Whether the key is only known at runtime
    pub fn is_expression(&self) -> bool {
        is_expression_key(&self.key)
    }
}

/// Keys with interpolation or a trailing `.` are resolved at runtime
pub fn is_expression_key(key: &str) -> bool {
    key.contains("#{") || key.contains("${") || key.ends_with('.')
}

/// Key pattern matching every key an expression key can produce
///
/// `cats.#{cat}.name` becomes `cats.:.name` and `errors.` becomes `errors.*`.
pub fn expression_pattern(key: &str) -> Result<KeyPattern> {
    let mut pattern = INTERPOLATION.replace_all(key, ":").into_owned();
    if pattern.ends_with('.') {
        pattern.push('*');
    }
    KeyPattern::new(&pattern)
}

/// Scans source files with a key-capturing regex
pub struct PatternScanner {
    root: PathBuf,
    paths: Vec<String>,
    files: FileScanner,
    pattern: Regex,
    relative_roots: Vec<String>,
}

impl PatternScanner {
    /// Build a scanner for the project root
    pub fn new(root: impl Into<PathBuf>, config: &SearchConfig) -> Result<Self> {
        let root = root.into();
        let files = FileScanner::new(&root)
            .include(&config.include)?
            .exclude(&config.exclude)?;
        let pattern = Regex::new(config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN))?;

        Ok(Self {
            root,
            paths: config.paths.clone(),
            files,
            pattern,
            relative_roots: config
                .relative_roots
                .iter()
                .map(|r| r.trim_end_matches('/').to_string())
                .collect(),
        })
    }

    /// Every used key, sorted by key, optionally restricted to a key pattern
    pub fn keys(&self, filter: Option<&KeyPattern>) -> Result<Vec<UsedKey>> {
        let mut files: Vec<PathBuf> = Vec::new();
        for dir in &self.paths {
            for file in self.files.scan(dir)? {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        tracing::debug!(files = files.len(), "scanning sources");

        let found = files
            .par_iter()
            .map(|path| self.scan_file(path))
            .collect::<Result<Vec<_>>>()?;

        let mut by_key: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();
        for (key, occurrence) in found.into_iter().flatten() {
            if filter.is_some_and(|f| !f.matches(&key)) {
                continue;
            }
            by_key.entry(key).or_default().push(occurrence);
        }

        Ok(by_key
            .into_iter()
            .map(|(key, mut usages)| {
                usages.sort_by(|a, b| {
                    (&a.path, a.line_num, a.pos).cmp(&(&b.path, b.line_num, b.pos))
                });
                UsedKey { key, usages }
            })
            .collect())
    }

    fn scan_file(&self, path: &Path) -> Result<Vec<(String, Occurrence)>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::debug!(path = %path.display(), "skipping non UTF-8 file");
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::scan(path, e)),
        };

        let display =
            relative_path(&self.root, path).unwrap_or_else(|| path.display().to_string());
        let mut found = Vec::new();

        for (index, line) in content.lines().enumerate() {
            for caps in self.pattern.captures_iter(line) {
                let Some(m) = caps.get(1) else {
                    continue;
                };
                let raw = strip_literal(m.as_str());
                if !VALID_KEY.is_match(raw) {
                    continue;
                }

                let key = if raw.starts_with('.') {
                    self.absolutize(raw, &display)
                        .ok_or_else(|| Error::relative_key_outside_root(raw, path))?
                } else {
                    raw.to_string()
                };

                found.push((
                    key,
                    Occurrence {
                        path: display.clone(),
                        line_num: index + 1,
                        pos: m.start(),
                        line: line.trim().to_string(),
                    },
                ));
            }
        }

        Ok(found)
    }

    /// Resolve `.title` in `app/views/users/_form.html.erb` to `users.form.title`
    fn absolutize(&self, key: &str, path: &str) -> Option<String> {
        let within = self
            .relative_roots
            .iter()
            .find_map(|root| path.strip_prefix(root.as_str())?.strip_prefix('/'))?;

        let mut segments: Vec<&str> = within.split('/').collect();
        let file = segments.pop()?;
        let stem = file.split('.').next()?.trim_start_matches('_');
        segments.push(stem);

        Some(format!("{}{}", segments.join("."), key))
    }
}

fn strip_literal(literal: &str) -> &str {
    let literal = literal.strip_prefix(':').unwrap_or(literal);
    for quote in ['"', '\''] {
        if let Some(inner) = literal
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    literal
}
