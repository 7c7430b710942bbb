//! Missing command - show missing translations

use super::{locales_opt, print_json, scanning, OutputFormat};
use crate::reports::TerminalReport;
use crate::types::JsonMissingOutput;
use anyhow::Result;
use i18n_tasks_core::task::{I18nTask, MissingKind};
use std::process::ExitCode;

/// Run missing command
pub fn run(
    task: &I18nTask,
    locales: Option<&str>,
    types: &[String],
    format: OutputFormat,
) -> Result<ExitCode> {
    let locales = locales_opt(task, locales);
    let kinds = if types.is_empty() {
        MissingKind::ALL.to_vec()
    } else {
        types
            .iter()
            .map(|t| t.parse::<MissingKind>())
            .collect::<Result<Vec<_>, _>>()?
    };

    let missing = scanning(format, || Ok(task.missing_keys(&locales, &kinds)?))?;

    match format {
        OutputFormat::Json => print_json(&JsonMissingOutput {
            total: missing.len(),
            locales: &locales,
            missing: &missing,
        })?,
        OutputFormat::Text => print!("{}", TerminalReport::new(task).missing_keys(&missing)),
    }
    Ok(ExitCode::SUCCESS)
}
