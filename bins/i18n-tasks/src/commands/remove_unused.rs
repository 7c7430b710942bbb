//! Remove unused command - delete keys no source file references

use super::{locales_opt, print_json, scanning, OutputFormat};
use crate::reports::TerminalReport;
use crate::types::JsonUnusedOutput;
use anyhow::Result;
use i18n_tasks_cli::confirm::confirm;
use i18n_tasks_core::task::I18nTask;
use owo_colors::OwoColorize;
use std::process::ExitCode;

/// Environment variable that skips the confirmation prompt when set
pub const CONFIRM_VAR: &str = "CONFIRM";

/// Run remove_unused command
///
/// Exits with failure when the user declines the prompt.
pub fn run(task: &I18nTask, locales: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let locales = locales_opt(task, locales);
    let unused = scanning(format, || Ok(task.unused_keys()?))?;

    if unused.is_empty() {
        eprintln!("{}", "No unused keys to remove".green().bold());
        return Ok(ExitCode::SUCCESS);
    }

    match format {
        OutputFormat::Json => print_json(&JsonUnusedOutput {
            total: unused.len(),
            base_locale: task.base_locale(),
            unused: &unused,
        })?,
        OutputFormat::Text => print!("{}", TerminalReport::new(task).unused_keys(&unused)),
    }

    if std::env::var_os(CONFIRM_VAR).is_none() {
        let prompt = format!(
            "All these translations will be removed in {}. Continue? (yes/no)",
            locales.join(", ")
        );
        if !confirm(&prompt)? {
            tracing::debug!("removal declined");
            return Ok(ExitCode::FAILURE);
        }
    }

    let removed = task.remove_unused(&locales)?;
    tracing::debug!(removed, locales = locales.len(), "removed keys across locales");
    eprintln!("Removed {} keys", unused.len());
    Ok(ExitCode::SUCCESS)
}
