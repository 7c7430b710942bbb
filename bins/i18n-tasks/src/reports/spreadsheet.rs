//! Spreadsheet report

use anyhow::{Context, Result};
use i18n_tasks_core::task::{MissingKey, UnusedKey};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Write a workbook with a `Missing` and an `Unused` sheet
pub fn save_report(
    path: &Path,
    base_locale: &str,
    missing: &[MissingKey],
    unused: &[UnusedKey],
) -> Result<()> {
    let header = Format::new().set_bold();
    let base_header = format!("Base value ({})", base_locale);
    let mut workbook = Workbook::new();

    {
        let sheet = workbook.add_worksheet().set_name("Missing")?;
        write_header(sheet, &["Locale", "Type", "i18n Key", base_header.as_str()], &header)?;
        for (i, m) in missing.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &m.locale)?;
            sheet.write_string(row, 1, m.kind.as_str())?;
            sheet.write_string(row, 2, &m.key)?;
            sheet.write_string(row, 3, m.base_value.as_deref().unwrap_or_default())?;
        }
    }

    {
        let sheet = workbook.add_worksheet().set_name("Unused")?;
        write_header(sheet, &["i18n Key", base_header.as_str()], &header)?;
        for (i, u) in unused.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &u.key)?;
            sheet.write_string(row, 1, &u.value)?;
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        missing = missing.len(),
        unused = unused.len(),
        "saved spreadsheet"
    );
    Ok(())
}

fn write_header(sheet: &mut Worksheet, titles: &[&str], format: &Format) -> Result<()> {
    for (col, title) in titles.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, format)?;
        sheet.set_column_width(col, if col == 0 { 12 } else { 30 })?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}
