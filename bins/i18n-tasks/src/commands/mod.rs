//! CLI command implementations

pub mod config;
pub mod fill;
pub mod missing;
pub mod normalize;
pub mod remove_unused;
pub mod save_spreadsheet;
pub mod unused;
pub mod usages;

use anyhow::Result;
use clap::ValueEnum;
use i18n_tasks_cli::progress::spinner;
use i18n_tasks_core::task::I18nTask;
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Resolve a `--locales` argument against the project
pub fn locales_opt(task: &I18nTask, arg: Option<&str>) -> Vec<String> {
    parse_locales(arg, task.base_locale(), task.locales())
}

/// Absent or `all` means every locale; otherwise a list split on `,` `+` or `:`
/// where `base` stands for the base locale
fn parse_locales(arg: Option<&str>, base: &str, all: &[String]) -> Vec<String> {
    let arg = arg.map(str::trim).unwrap_or_default();
    if arg.is_empty() || arg == "all" {
        return all.to_vec();
    }

    let mut locales: Vec<String> = Vec::new();
    for part in arg.split([',', '+', ':']).map(str::trim).filter(|p| !p.is_empty()) {
        let locale = if part == "base" { base } else { part };
        if !locales.iter().any(|l| l == locale) {
            locales.push(locale.to_string());
        }
    }
    locales
}

/// Run a scan behind a spinner in text mode
fn scanning<T>(format: OutputFormat, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if format == OutputFormat::Json {
        return f();
    }
    let pb = spinner("Scanning sources...");
    let result = f();
    pb.finish_and_clear();
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<String> {
        vec!["en".to_string(), "es".to_string(), "fr".to_string()]
    }

    #[test]
    fn test_locales_default_to_all() {
        assert_eq!(parse_locales(None, "en", &all()), all());
        assert_eq!(parse_locales(Some("all"), "en", &all()), all());
        assert_eq!(parse_locales(Some("  "), "en", &all()), all());
    }

    #[test]
    fn test_locales_list_separators() {
        assert_eq!(parse_locales(Some("es, fr"), "en", &all()), vec!["es", "fr"]);
        assert_eq!(parse_locales(Some("es+fr"), "en", &all()), vec!["es", "fr"]);
        assert_eq!(parse_locales(Some("es:fr:"), "en", &all()), vec!["es", "fr"]);
    }

    #[test]
    fn test_locales_base_alias() {
        assert_eq!(parse_locales(Some("base"), "en", &all()), vec!["en"]);
        assert_eq!(parse_locales(Some("base+en,es"), "en", &all()), vec!["en", "es"]);
    }
}
