//! Save spreadsheet command - export missing and unused keys to .xlsx

use anyhow::Result;
use i18n_tasks_core::task::I18nTask;
use std::path::Path;
use std::process::ExitCode;

/// Where the workbook goes when `--path` is not given
pub const DEFAULT_PATH: &str = "tmp/i18n-report.xlsx";

/// Run save_spreadsheet command
#[cfg(feature = "spreadsheet")]
pub fn run(task: &I18nTask, path: &Path) -> Result<ExitCode> {
    use crate::reports::spreadsheet;
    use i18n_tasks_cli::output::Status;
    use i18n_tasks_core::task::MissingKind;

    let missing = task.missing_keys(task.locales(), &MissingKind::ALL)?;
    let unused = task.unused_keys()?;
    let path = task.root().join(path);

    spreadsheet::save_report(&path, task.base_locale(), &missing, &unused)?;
    Status::success(&format!("Saved {}", task.store().display_path(&path)));
    Ok(ExitCode::SUCCESS)
}

/// Run save_spreadsheet command
///
/// This build has no spreadsheet writer, so the command only explains how
/// to get one.
#[cfg(not(feature = "spreadsheet"))]
pub fn run(_task: &I18nTask, _path: &Path) -> Result<ExitCode> {
    use i18n_tasks_cli::output::Status;

    Status::error(
        "For spreadsheet report please build i18n-tasks with the spreadsheet feature:\n  \
         cargo install i18n-tasks --features spreadsheet",
    );
    Ok(ExitCode::FAILURE)
}
