//! Report rendering

#[cfg(feature = "spreadsheet")]
pub mod spreadsheet;
pub mod terminal;

pub use terminal::TerminalReport;
