//! i18n-tasks - find and manage missing and unused translations
//!
//! Scans the project sources for translation calls and compares them with
//! the locale data files.

use anyhow::Context;
use clap::{Parser, Subcommand};
use i18n_tasks_core::config::Config;
use i18n_tasks_core::task::I18nTask;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod reports;
mod types;

use commands::{
    config, fill, missing, normalize, remove_unused, save_spreadsheet, unused, usages, OutputFormat,
};

/// Manage translation keys: find missing and unused ones, fill and normalize
#[derive(Parser)]
#[command(name = "i18n-tasks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (default: config/i18n-tasks.yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show missing translations
    Missing {
        /// Locales to check: all (default), base, or a list such as es,fr
        #[arg(short, long)]
        locales: Option<String>,

        /// Only these kinds: none, blank, eq_base
        #[arg(short, long, value_delimiter = ',')]
        types: Vec<String>,
    },

    /// Show unused translations
    Unused,

    /// Add missing keys to the base locale (default value: humanized key)
    #[command(name = "fill_base", alias = "fill-base")]
    FillBase {
        /// Value template; %{key}, %{human_key} and %{value} are substituted
        #[arg(long)]
        value: Option<String>,
    },

    /// Remove unused keys
    #[command(name = "remove_unused", alias = "remove-unused")]
    RemoveUnused {
        /// Locales to remove from: all (default), base, or a list
        #[arg(short, long)]
        locales: Option<String>,
    },

    /// Show where the keys are used in the code
    Usages {
        /// Key pattern such as 'users.*' or '{users+admin}.*'
        #[arg(long)]
        filter: Option<String>,
    },

    /// Normalize translation data: sort and move to the right files
    Normalize {
        /// Locales to normalize: all (default), base, or a list
        #[arg(short, long)]
        locales: Option<String>,
    },

    /// Fill missing translations with values
    Fill {
        /// Where values come from: value or base_value
        #[arg(long, default_value = "base_value")]
        from: String,

        /// Value template for --from value
        #[arg(long)]
        value: Option<String>,

        /// Locales to fill: all (default), base, or a list
        #[arg(short, long)]
        locales: Option<String>,
    },

    /// Display the effective configuration
    Config,

    /// Save missing and unused translations to an Excel file
    #[command(name = "save_spreadsheet", alias = "save-spreadsheet")]
    SaveSpreadsheet {
        /// Output path
        #[arg(short, long, default_value = save_spreadsheet::DEFAULT_PATH)]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.format;

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e, format);
            ExitCode::FAILURE
        }
    }
}

/// Structured report for engine errors in JSON mode, the error chain otherwise
fn report_error(e: &anyhow::Error, format: OutputFormat) {
    if format == OutputFormat::Json {
        if let Some(err) = e.downcast_ref::<i18n_tasks_core::Error>() {
            if let Ok(json) = serde_json::to_string_pretty(&err.to_report()) {
                eprintln!("{}", json);
                return;
            }
        }
    }
    eprintln!("{} {:#}", "Error:".red().bold(), e);
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "i18n_tasks=debug,i18n_tasks_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let root = std::env::current_dir().context("Cannot determine the working directory")?;
    let config = Config::load(&root, cli.config.as_deref())?;
    let task = I18nTask::new(config, root)?;
    let format = cli.format;

    match cli.command {
        Commands::Missing { locales, types } => {
            missing::run(&task, locales.as_deref(), &types, format)
        }
        Commands::Unused => unused::run(&task, format),
        Commands::FillBase { value } => fill::run_base(&task, value, format),
        Commands::RemoveUnused { locales } => remove_unused::run(&task, locales.as_deref(), format),
        Commands::Usages { filter } => usages::run(&task, filter.as_deref(), format),
        Commands::Normalize { locales } => normalize::run(&task, locales.as_deref(), format),
        Commands::Fill { from, value, locales } => {
            fill::run(&task, &from, value, locales.as_deref(), format)
        }
        Commands::Config => config::run(&task, format),
        Commands::SaveSpreadsheet { path } => save_spreadsheet::run(&task, &path),
    }
}
