//! Core engine for i18n-tasks
//!
//! This crate provides everything the CLI works on:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: YAML/TOML project configuration with validation
//! - **Key patterns**: `*`, `:` and `{a, b}` globs over dotted keys
//! - **Data**: Locale files read, merged, routed and written back
//! - **Scanning**: Translation calls found in source files
//! - **Tasks**: Missing, unused, fill, and normalize over one project
//!
//! # Example
//!
//! ```rust,no_run
//! use i18n_tasks_core::prelude::*;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("."), None)?;
//! let task = I18nTask::new(config, ".")?;
//!
//! for unused in task.unused_keys()? {
//!     println!("{} = {}", unused.key, unused.value);
//! }
//! # Ok::<(), i18n_tasks_core::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod data;
pub mod error;
pub mod file_scanner;
pub mod key_pattern;
pub mod scanner;
pub mod task;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::key_pattern::KeyPattern;
    pub use crate::task::{FillFrom, FillStrategy, I18nTask, MissingKind, ValueTemplate};
}
