//! Normalize command - sort keys and move them to their routed files

use super::{locales_opt, print_json, OutputFormat};
use crate::types::JsonChangeOutput;
use anyhow::Result;
use i18n_tasks_cli::output::{format_count, Status};
use i18n_tasks_core::task::I18nTask;
use std::process::ExitCode;

/// Run normalize command
pub fn run(task: &I18nTask, locales: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let locales = locales_opt(task, locales);
    let written = task.normalize_store(&locales)?;
    let files: Vec<String> = written.iter().map(|p| task.store().display_path(p)).collect();

    match format {
        OutputFormat::Json => print_json(&JsonChangeOutput {
            action: "normalize",
            locales: &locales,
            count: files.len(),
            files,
        })?,
        OutputFormat::Text => {
            Status::success(&format!(
                "Normalized {} in {}",
                format_count(files.len(), "file", "files"),
                locales.join(", ")
            ));
        }
    }
    Ok(ExitCode::SUCCESS)
}
