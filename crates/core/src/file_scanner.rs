//! File scanning utilities
//!
//! Discovers source files under a directory with include/exclude globs.
//! Globs without a `/` match the file name, globs with one match the path
//! relative to the project root.

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File scanner with configurable filters
pub struct FileScanner {
    root: PathBuf,
    include: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
}

impl FileScanner {
    /// Create a new file scanner; `root` is the project root globs are relative to
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Only keep files matching one of these globs (e.g. "*.rb", "*.erb")
    pub fn include<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        self.include = compile(patterns)?;
        Ok(self)
    }

    /// Skip files matching any of these globs
    pub fn exclude<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        self.exclude = compile(patterns)?;
        Ok(self)
    }

    /// Scan a directory (relative to the root) and return matching files, sorted
    pub fn scan(&self, dir: &str) -> Result<Vec<PathBuf>> {
        let start = self.root.join(dir);
        if !start.exists() {
            tracing::debug!(path = %start.display(), "search path does not exist");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&start)
            .into_iter()
            .filter_entry(|e| !is_hidden(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            if !self.include.is_empty() && !self.include.iter().any(|p| self.matches(p, path)) {
                continue;
            }

            if self.exclude.iter().any(|p| self.matches(p, path)) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn matches(&self, pattern: &glob::Pattern, path: &Path) -> bool {
        if pattern.as_str().contains('/') {
            path.strip_prefix(&self.root)
                .map(|relative| pattern.matches_path(relative))
                .unwrap_or(false)
        } else {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| pattern.matches(n))
                .unwrap_or(false)
        }
    }
}

/// Path relative to `root` with `/` separators
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p.as_ref()).map_err(Into::into))
        .collect()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.') && n != "." && n != "..")
        .unwrap_or(false)
}
