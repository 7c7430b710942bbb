//! JSON output types

use i18n_tasks_core::scanner::UsedKey;
use i18n_tasks_core::task::{MissingKey, UnusedKey};
use serde::Serialize;

/// JSON output for missing
#[derive(Debug, Serialize)]
pub struct JsonMissingOutput<'a> {
    pub total: usize,
    pub locales: &'a [String],
    pub missing: &'a [MissingKey],
}

/// JSON output for unused and remove_unused
#[derive(Debug, Serialize)]
pub struct JsonUnusedOutput<'a> {
    pub total: usize,
    pub base_locale: &'a str,
    pub unused: &'a [UnusedKey],
}

/// JSON output for usages
#[derive(Debug, Serialize)]
pub struct JsonUsagesOutput<'a> {
    pub total: usize,
    pub keys: &'a [UsedKey],
}

/// JSON output for commands that change locale files
#[derive(Debug, Serialize)]
pub struct JsonChangeOutput<'a> {
    pub action: &'static str,
    pub locales: &'a [String],
    pub count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}
