//! Fill commands - fill missing translations

use super::{locales_opt, print_json, OutputFormat};
use crate::types::JsonChangeOutput;
use anyhow::Result;
use i18n_tasks_cli::output::{format_count, Status};
use i18n_tasks_core::task::{FillFrom, FillStrategy, I18nTask, ValueTemplate};
use std::process::ExitCode;

/// Run fill_base: add keys missing from the base locale
pub fn run_base(task: &I18nTask, value: Option<String>, format: OutputFormat) -> Result<ExitCode> {
    let strategy = FillStrategy::Value(value.map(ValueTemplate::new).unwrap_or_default());
    let locales = vec![task.base_locale().to_string()];
    fill_locales(task, &strategy, &locales, format)
}

/// Run fill with a named strategy
pub fn run(
    task: &I18nTask,
    from: &str,
    value: Option<String>,
    locales: Option<&str>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let from: FillFrom = from.parse()?;
    let strategy = FillStrategy::from_name(from, value.map(ValueTemplate::new));
    let locales = locales_opt(task, locales);
    fill_locales(task, &strategy, &locales, format)
}

fn fill_locales(
    task: &I18nTask,
    strategy: &FillStrategy,
    locales: &[String],
    format: OutputFormat,
) -> Result<ExitCode> {
    let filled = task.fill(strategy, locales)?;

    match format {
        OutputFormat::Json => print_json(&JsonChangeOutput {
            action: "fill",
            locales,
            count: filled,
            files: Vec::new(),
        })?,
        OutputFormat::Text if filled == 0 => Status::info("Nothing to fill"),
        OutputFormat::Text => Status::success(&format!(
            "Filled {} in {}",
            format_count(filled, "value", "values"),
            locales.join(", ")
        )),
    }
    Ok(ExitCode::SUCCESS)
}
