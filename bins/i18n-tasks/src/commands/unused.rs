//! Unused command - show translations no source file references

use super::{print_json, scanning, OutputFormat};
use crate::reports::TerminalReport;
use crate::types::JsonUnusedOutput;
use anyhow::Result;
use i18n_tasks_core::task::I18nTask;
use std::process::ExitCode;

/// Run unused command
pub fn run(task: &I18nTask, format: OutputFormat) -> Result<ExitCode> {
    let unused = scanning(format, || Ok(task.unused_keys()?))?;

    match format {
        OutputFormat::Json => print_json(&JsonUnusedOutput {
            total: unused.len(),
            base_locale: task.base_locale(),
            unused: &unused,
        })?,
        OutputFormat::Text => print!("{}", TerminalReport::new(task).unused_keys(&unused)),
    }
    Ok(ExitCode::SUCCESS)
}
