//! Config command - display the effective configuration

use super::{print_json, OutputFormat};
use anyhow::Result;
use i18n_tasks_core::task::I18nTask;
use std::process::ExitCode;

/// Run config command
pub fn run(task: &I18nTask, format: OutputFormat) -> Result<ExitCode> {
    let config = task.config_for_inspect()?;

    match format {
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Text => print!("{}", to_yaml(&config)?),
    }
    Ok(ExitCode::SUCCESS)
}

/// YAML without the leading `---` document marker
fn to_yaml(value: &serde_yaml::Value) -> Result<String> {
    let yaml = serde_yaml::to_string(value)?;
    Ok(yaml.strip_prefix("---\n").unwrap_or(&yaml).to_string())
}
