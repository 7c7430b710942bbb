//! Unused translations

use super::I18nTask;
use crate::data::tree;
use crate::error::Result;
use crate::key_pattern::KeyPattern;
use crate::scanner::expression_pattern;
use serde::Serialize;
use std::collections::BTreeSet;

/// A base locale key no source file references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedKey {
    pub key: String,
    pub value: String,
}

/// Keys referenced from source, split into literal keys and expression patterns
struct Usage {
    literal: BTreeSet<String>,
    expressions: Vec<KeyPattern>,
}

impl Usage {
    fn covers(&self, key: &str) -> bool {
        if self.literal.contains(key) {
            return true;
        }
        // `t('users')` uses the whole subtree
        let mut prefix = key;
        while let Some((parent, _)) = prefix.rsplit_once('.') {
            if self.literal.contains(parent) {
                return true;
            }
            prefix = parent;
        }
        self.expressions.iter().any(|p| p.matches(key))
    }
}

impl I18nTask {
    fn usage(&self) -> Result<Usage> {
        let mut literal = BTreeSet::new();
        let mut expressions = Vec::new();
        for used in self.used_keys(None, false)? {
            if used.is_expression() {
                expressions.push(expression_pattern(&used.key)?);
            } else {
                literal.insert(used.key);
            }
        }
        Ok(Usage { literal, expressions })
    }

    /// Base locale keys that are never used, sorted by key
    pub fn unused_keys(&self) -> Result<Vec<UnusedKey>> {
        let usage = self.usage()?;
        let base_data = self.data(self.base_locale())?;

        let mut unused: Vec<UnusedKey> = tree::leaves(&base_data)
            .into_iter()
            .filter(|(key, _)| !usage.covers(key) && !self.ignore_unused.matches_any(key))
            .map(|(key, value)| UnusedKey {
                key,
                value: tree::value_to_string(value),
            })
            .collect();
        unused.sort_by(|a, b| a.key.cmp(&b.key));

        tracing::debug!(count = unused.len(), "computed unused keys");
        Ok(unused)
    }

    /// Remove the unused keys from each requested locale and write them back
    ///
    /// Returns the number of keys removed across all locales.
    pub fn remove_unused(&self, locales: &[String]) -> Result<usize> {
        let unused = self.unused_keys()?;
        if unused.is_empty() {
            return Ok(0);
        }
        self.remove_keys(&unused, locales)
    }

    fn remove_keys(&self, keys: &[UnusedKey], locales: &[String]) -> Result<usize> {
        let mut removed = 0;
        for locale in locales {
            let mut data = self.data(locale)?;
            let before = removed;
            for unused in keys {
                if tree::remove(&mut data, &unused.key).is_some() {
                    removed += 1;
                }
            }
            if removed > before {
                self.store.write(locale, &data)?;
                tracing::info!(locale = %locale, keys = removed - before, "removed unused keys");
            }
        }
        Ok(removed)
    }
}
