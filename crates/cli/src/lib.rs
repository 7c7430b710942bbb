//! CLI utilities for i18n-tasks
//!
//! Provides shared CLI functionality:
//! - Status messages and tables
//! - Progress spinners
//! - Confirmation prompts

#![warn(missing_docs)]

pub mod confirm;
pub mod output;
pub mod progress;
