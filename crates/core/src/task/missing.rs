//! Missing translations

use super::I18nTask;
use crate::data::tree;
use crate::error::{Error, Result};
use crate::scanner::is_expression_key;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Why a key counts as missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MissingKind {
    /// Used in source but absent from the base locale
    #[serde(rename = "none")]
    Absent,
    /// Present in the base locale, absent or blank in this one
    #[serde(rename = "blank")]
    Blank,
    /// Same value as the base locale
    #[serde(rename = "eq_base")]
    EqBase,
}

impl MissingKind {
    pub const ALL: [MissingKind; 3] =
        [MissingKind::Absent, MissingKind::Blank, MissingKind::EqBase];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissingKind::Absent => "none",
            MissingKind::Blank => "blank",
            MissingKind::EqBase => "eq_base",
        }
    }
}

impl fmt::Display for MissingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MissingKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                Error::validation(format!("Unknown missing key type: {}", s))
                    .with_suggestion("Use one of: none, blank, eq_base")
            })
    }
}

/// A translation that needs attention
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingKey {
    pub locale: String,
    pub key: String,
    #[serde(rename = "type")]
    pub kind: MissingKind,
    /// Value in the base locale, when it has one
    pub base_value: Option<String>,
}

impl I18nTask {
    /// Missing keys of the requested kinds for the requested locales
    ///
    /// `Absent` keys are reported against the base locale and only when the
    /// base locale is requested. Results follow the order of `locales`, then
    /// the key.
    pub fn missing_keys(
        &self,
        locales: &[String],
        kinds: &[MissingKind],
    ) -> Result<Vec<MissingKey>> {
        let base = self.base_locale();
        let base_data = self.data(base)?;
        let base_leaves = tree::leaves(&base_data);
        let mut missing = Vec::new();

        for locale in locales {
            let mut found = Vec::new();

            if locale == base {
                if kinds.contains(&MissingKind::Absent) {
                    for used in self.used_keys(None, false)? {
                        if is_expression_key(&used.key)
                            || self.ignore_missing.matches_any(&used.key)
                        {
                            continue;
                        }
                        if tree::get(&base_data, &used.key).is_none_or(tree::is_blank) {
                            found.push(MissingKey {
                                locale: locale.clone(),
                                key: used.key,
                                kind: MissingKind::Absent,
                                base_value: None,
                            });
                        }
                    }
                }
            } else {
                let data = self.data(locale)?;
                for (key, base_value) in &base_leaves {
                    if tree::is_blank(base_value) || self.ignore_missing.matches_any(key) {
                        continue;
                    }
                    let base_text = tree::value_to_string(base_value);

                    match tree::get(&data, key) {
                        Some(value) if !tree::is_blank(value) => {
                            if kinds.contains(&MissingKind::EqBase)
                                && value.is_string()
                                && value == *base_value
                                && !self.is_eq_base_ignored(locale, key)
                            {
                                found.push(MissingKey {
                                    locale: locale.clone(),
                                    key: key.clone(),
                                    kind: MissingKind::EqBase,
                                    base_value: Some(base_text),
                                });
                            }
                        }
                        _ => {
                            if kinds.contains(&MissingKind::Blank) {
                                found.push(MissingKey {
                                    locale: locale.clone(),
                                    key: key.clone(),
                                    kind: MissingKind::Blank,
                                    base_value: Some(base_text),
                                });
                            }
                        }
                    }
                }
            }

            found.sort_by(|a, b| a.key.cmp(&b.key));
            missing.extend(found);
        }

        tracing::debug!(count = missing.len(), "computed missing keys");
        Ok(missing)
    }
}
