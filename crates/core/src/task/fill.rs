//! Filling missing translations

use super::{I18nTask, MissingKind};
use crate::data::tree;
use crate::error::{Error, Result};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

/// Where filled values come from, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillFrom {
    Value,
    BaseValue,
}

impl FillFrom {
    pub const NAMES: [&'static str; 2] = ["value", "base_value"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FillFrom::Value => "value",
            FillFrom::BaseValue => "base_value",
        }
    }
}

impl fmt::Display for FillFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillFrom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "value" => Ok(FillFrom::Value),
            "base_value" | "base-value" => Ok(FillFrom::BaseValue),
            other => Err(Error::unknown_fill_strategy(other, &FillFrom::NAMES)),
        }
    }
}

/// Text with `%{key}`, `%{human_key}` and `%{value}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTemplate(String);

impl ValueTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Template producing the humanized key
    pub fn human_key() -> Self {
        Self::new("%{human_key}")
    }

    /// Render for a key; `base_value` is empty when the base locale has none
    pub fn render(&self, key: &str, base_value: &str) -> String {
        self.0
            .replace("%{key}", key)
            .replace("%{human_key}", &humanize_key(key))
            .replace("%{value}", base_value)
    }
}

impl Default for ValueTemplate {
    fn default() -> Self {
        Self::human_key()
    }
}

/// A fill strategy and the data it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillStrategy {
    /// Set every absent or blank key to a rendered template
    Value(ValueTemplate),
    /// Copy the base locale value into other locales
    BaseValue,
}

impl FillStrategy {
    pub fn from_name(from: FillFrom, template: Option<ValueTemplate>) -> Self {
        match from {
            FillFrom::Value => FillStrategy::Value(template.unwrap_or_default()),
            FillFrom::BaseValue => FillStrategy::BaseValue,
        }
    }
}

impl I18nTask {
    /// Fill missing values in the given locales; returns the number of values written
    pub fn fill(&self, strategy: &FillStrategy, locales: &[String]) -> Result<usize> {
        match strategy {
            FillStrategy::Value(template) => self.fill_with_value(template, locales),
            FillStrategy::BaseValue => self.fill_with_base_values(locales),
        }
    }

    /// Absent keys of the base locale and blank keys elsewhere get the rendered template
    pub fn fill_with_value(&self, template: &ValueTemplate, locales: &[String]) -> Result<usize> {
        let mut filled = 0;
        for locale in locales {
            let missing = self.missing_keys(
                std::slice::from_ref(locale),
                &[MissingKind::Absent, MissingKind::Blank],
            )?;
            if missing.is_empty() {
                continue;
            }

            let mut data = self.data(locale)?;
            for m in &missing {
                let value = template.render(&m.key, m.base_value.as_deref().unwrap_or_default());
                tree::set(&mut data, &m.key, Value::String(value));
            }
            self.store.write(locale, &data)?;
            tracing::info!(locale = %locale, keys = missing.len(), "filled with value");
            filled += missing.len();
        }
        Ok(filled)
    }

    /// Blank keys of non-base locales get the base locale value
    pub fn fill_with_base_values(&self, locales: &[String]) -> Result<usize> {
        let base = self.base_locale();
        let base_data = self.data(base)?;
        let mut filled = 0;

        for locale in locales.iter().filter(|l| l.as_str() != base) {
            let missing = self.missing_keys(std::slice::from_ref(locale), &[MissingKind::Blank])?;
            if missing.is_empty() {
                continue;
            }

            let mut data = self.data(locale)?;
            for m in &missing {
                if let Some(value) = tree::get(&base_data, &m.key) {
                    tree::set(&mut data, &m.key, value.clone());
                }
            }
            self.store.write(locale, &data)?;
            tracing::info!(locale = %locale, keys = missing.len(), "filled with base values");
            filled += missing.len();
        }
        Ok(filled)
    }
}

/// `users.user_name` → `User name`, `post.author_id` → `Author`
pub fn humanize_key(key: &str) -> String {
    let last = key.rsplit('.').next().unwrap_or(key);
    let last = last.strip_suffix("_id").unwrap_or(last);
    let words = last
        .split('_')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("users.user_name"), "User name");
        assert_eq!(humanize_key("post.author_id"), "Author");
        assert_eq!(humanize_key("title"), "Title");
        assert_eq!(humanize_key("users.index.heading"), "Heading");
        assert_eq!(humanize_key("a.HTML_Title"), "Html title");
    }

    #[test]
    fn test_fill_from_parse() {
        assert_eq!("value".parse::<FillFrom>().unwrap(), FillFrom::Value);
        assert_eq!("base-value".parse::<FillFrom>().unwrap(), FillFrom::BaseValue);
        assert_eq!("base_value".parse::<FillFrom>().unwrap(), FillFrom::BaseValue);

        let err = "google_translate".parse::<FillFrom>().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::UnknownFillStrategy);
        assert!(err.message.contains("google_translate"));
    }

    #[test]
    fn test_template_render() {
        let template = ValueTemplate::new("TODO %{key} (%{human_key}): %{value}");
        assert_eq!(
            template.render("users.user_name", "Name"),
            "TODO users.user_name (User name): Name"
        );
        assert_eq!(ValueTemplate::default().render("a.b_c", ""), "B c");
    }

    #[test]
    fn test_fill_base_with_human_keys() {
        let dir = project();
        let task = task(dir.path());
        let filled = task
            .fill(&FillStrategy::Value(ValueTemplate::default()), &["en".to_string()])
            .unwrap();
        assert_eq!(filled, 1);

        let data = task.data("en").unwrap();
        assert_eq!(
            tree::get(&data, "users.index.heading"),
            Some(&Value::from("Heading"))
        );
        assert!(task.missing_keys(&["en".to_string()], &MissingKind::ALL).unwrap().is_empty());
    }

    #[test]
    fn test_fill_with_value_template() {
        let dir = project();
        let task = task(dir.path());
        let strategy =
            FillStrategy::from_name(FillFrom::Value, Some(ValueTemplate::new("ES %{value}")));
        let filled = task.fill(&strategy, &["es".to_string()]).unwrap();
        assert_eq!(filled, 2);

        let data = task.data("es").unwrap();
        assert_eq!(tree::get(&data, "users.name"), Some(&Value::from("ES Name")));
        assert_eq!(tree::get(&data, "users.old_label"), Some(&Value::from("ES Old")));
        assert_eq!(tree::get(&data, "users.title"), Some(&Value::from("Usuarios")));
    }

    #[test]
    fn test_fill_with_base_values_skips_base() {
        let dir = project();
        let task = task(dir.path());
        let before = read_file(dir.path(), "config/locales/en.yml");

        let filled = task.fill(&FillStrategy::BaseValue, task.locales()).unwrap();
        assert_eq!(filled, 2);
        assert_eq!(read_file(dir.path(), "config/locales/en.yml"), before);

        let data = task.data("es").unwrap();
        assert_eq!(tree::get(&data, "users.name"), Some(&Value::from("Name")));
        assert_eq!(tree::get(&data, "users.old_label"), Some(&Value::from("Old")));
    }

    #[test]
    fn test_fill_nothing_missing_writes_nothing() {
        let dir = project();
        write_file(
            dir.path(),
            "config/locales/es.yml",
            "es:\n  users:\n    title: Usuarios\n    name: Nombre\n    old_label: Viejo\n  common:\n    ok: Vale\n",
        );
        let task = task(dir.path());
        assert_eq!(task.fill(&FillStrategy::BaseValue, task.locales()).unwrap(), 0);
    }

    #[test]
    fn test_fill_base_values_under_numeric_keys() {
        let dir = project();
        write_file(
            dir.path(),
            "config/locales/en.yml",
            "en:\n  errors:\n    404: Not found\n    500: Server error\n",
        );
        write_file(
            dir.path(),
            "config/locales/es.yml",
            "es:\n  errors:\n    404: No encontrado\n    500: ''\n",
        );
        let task = task(dir.path());

        let filled = task.fill(&FillStrategy::BaseValue, &["es".to_string()]).unwrap();
        assert_eq!(filled, 1);
        assert_eq!(
            read_file(dir.path(), "config/locales/es.yml"),
            "es:\n  errors:\n    404: No encontrado\n    500: Server error\n"
        );
    }

    proptest! {
        #[test]
        fn humanized_keys_have_no_underscores_or_dots(key in "[a-z_]{1,12}(\\.[a-z_]{1,12}){0,3}") {
            let human = humanize_key(&key);
            prop_assert!(!human.contains('_'));
            prop_assert!(!human.contains('.'));
            prop_assert!(human.chars().skip(1).all(|c| !c.is_uppercase()));
        }
    }
}
