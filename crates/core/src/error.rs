//! Structured error handling with context and recovery suggestions
//!
//! Every failure carries:
//! - An error code for programmatic handling
//! - Optional context describing what was being done
//! - Optional recovery suggestion for the user
//! - A serializable report form for `--format json`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,
    InvalidPath = 2003,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,

    // Translation data errors (4xxx)
    DataParseError = 4001,
    DataWriteError = 4002,

    // Source scanning errors (5xxx)
    ScanError = 5000,
    RelativeKeyOutsideRoot = 5001,

    // Validation errors (6xxx)
    ValidationError = 6000,
    InvalidKeyPattern = 6001,
    UnknownFillStrategy = 6002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            3 => "Configuration",
            4 => "Data",
            5 => "Scanner",
            6 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create config/i18n-tasks.yml or pass --config with an existing path")
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    pub fn data_parse(path: impl AsRef<Path>, message: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::DataParseError,
            format!("Failed to parse {}: {}", path.as_ref().display(), message),
        )
        .with_suggestion("Fix the syntax of the translation file and run the command again")
    }

    pub fn data_write(path: impl AsRef<Path>, message: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::DataWriteError,
            format!("Failed to write {}: {}", path.as_ref().display(), message),
        )
    }

    pub fn scan(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::new(
            ErrorCode::ScanError,
            format!("Failed to scan {}: {}", path.as_ref().display(), source),
        )
        .with_source(source)
    }

    pub fn relative_key_outside_root(key: &str, path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::RelativeKeyOutsideRoot,
            format!(
                "Cannot resolve relative key \"{}\" used in {}",
                key,
                path.as_ref().display()
            ),
        )
        .with_suggestion("Add the file's directory to search.relative_roots or use an absolute key")
    }

    pub fn invalid_key_pattern(pattern: &str, message: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidKeyPattern,
            format!("Invalid key pattern \"{}\": {}", pattern, message),
        )
    }

    pub fn unknown_fill_strategy(name: &str, valid: &[&str]) -> Self {
        Self::new(
            ErrorCode::UnknownFillStrategy,
            format!("Unknown fill strategy: {}", name),
        )
        .with_suggestion(format!("Use one of: {}", valid.join(", ")))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

/// Serializable error report for logging and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::DataParseError, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::new(ErrorCode::DataParseError, format!("YAML error: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::new(ErrorCode::ConfigValidationError, format!("Regex error: {}", err))
            .with_source(err)
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::new(ErrorCode::InvalidPath, format!("Glob pattern error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::DataParseError.to_string(), "E4001");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::RelativeKeyOutsideRoot.category(), "Scanner");
        assert_eq!(ErrorCode::UnknownFillStrategy.category(), "Validation");
    }

    #[test]
    fn test_scan_error_names_file() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::scan("app/views/index.html.erb", io);
        assert_eq!(err.code, ErrorCode::ScanError);
        assert_eq!(err.code.category(), "Scanner");
        assert!(err.message.contains("app/views/index.html.erb"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::config_not_found("/path/to/i18n-tasks.yml")
            .with_context("While loading configuration");

        assert_eq!(err.code, ErrorCode::ConfigNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_unknown_fill_strategy_lists_choices() {
        let err = Error::unknown_fill_strategy("magic", &["value", "base_value"]);
        let text = err.to_string();
        assert!(text.contains("E6002"));
        assert!(text.contains("value, base_value"));
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::data_parse("config/locales/en.yml", "bad indentation")
            .with_context("While reading locale en");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E4001"));
        assert!(json.contains("Data"));
    }
}
