//! Usages command - show where keys are used in the code

use super::{print_json, scanning, OutputFormat};
use crate::reports::TerminalReport;
use crate::types::JsonUsagesOutput;
use anyhow::Result;
use i18n_tasks_core::key_pattern::KeyPattern;
use i18n_tasks_core::task::I18nTask;
use std::process::ExitCode;

/// Run usages command
///
/// `+` in the filter stands for `,` so `{users+admin}.*` needs no shell quoting.
pub fn run(task: &I18nTask, filter: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let filter = filter
        .map(|f| KeyPattern::new(&f.replace('+', ",")))
        .transpose()?;

    let used = scanning(format, || Ok(task.used_keys(filter.as_ref(), true)?))?;

    match format {
        OutputFormat::Json => print_json(&JsonUsagesOutput {
            total: used.len(),
            keys: &used,
        })?,
        OutputFormat::Text => print!("{}", TerminalReport::new(task).used_keys(&used)),
    }
    Ok(ExitCode::SUCCESS)
}
