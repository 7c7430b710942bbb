//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Status lines go to stderr
//! so reports on stdout stay clean for piping.

use console::{measure_text_width, pad_str, Alignment};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".green(), message.green());
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message.red().bold());
    }

    /// Print an info message
    pub fn info(message: &str) {
        eprintln!("{} {}", "ℹ".blue(), message);
    }
}

/// Report title with a count, e.g. `Unused keys (3)`, underlined
pub fn heading(title: &str, count: usize) -> String {
    let line = format!("{} ({})", title, count);
    format!("{}\n{}\n", line.bold(), "─".repeat(measure_text_width(&line)).dimmed())
}

/// Left-aligned text table; cells may carry ANSI colors
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headers
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Number of rows, not counting the header
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render to a string, one line per row, columns separated by ` | `
    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                std::iter::once(&self.headers[col])
                    .chain(self.rows.iter().filter_map(|r| r.get(col)))
                    .map(|cell| measure_text_width(cell))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let render_row = |cells: &[String], dim: bool| {
            // trailing empty cells are not padded out
            let shown = cells
                .iter()
                .rposition(|c| !c.is_empty())
                .map_or(0, |i| i + 1)
                .min(widths.len());
            let line = cells[..shown]
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(col, (cell, width))| {
                    if col + 1 == shown {
                        cell.clone()
                    } else {
                        pad_str(cell, *width, Alignment::Left, None).into_owned()
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            if dim { line.dimmed().to_string() } else { line }
        };

        let mut out = String::new();
        out.push_str(&render_row(&self.headers, true));
        out.push('\n');
        let rule_width: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        out.push_str(&"─".repeat(rule_width).dimmed().to_string());
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render_row(row, false));
            out.push('\n');
        }
        out
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "key", "keys"), "1 key");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(5, "key", "keys"), "5 keys");
        assert_eq!(format_count(0, "key", "keys"), "0 keys");
    }

    #[test]
    fn test_heading() {
        let plain = console::strip_ansi_codes(&heading("Unused keys", 3)).to_string();
        assert_eq!(plain, "Unused keys (3)\n───────────────\n");
    }

    #[test]
    fn test_table_aligns_columns() {
        let mut table = Table::new(&["Locale", "Key"]);
        table.row(vec!["en".to_string(), "users.title".to_string()]);
        table.row(vec!["pt-BR".to_string(), "a".to_string()]);
        assert_eq!(table.len(), 2);

        let plain = console::strip_ansi_codes(&table.render()).to_string();
        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines[0], "Locale | Key");
        assert_eq!(lines[2], "en     | users.title");
        assert_eq!(lines[3], "pt-BR  | a");
    }

    #[test]
    fn test_table_trailing_empty_cell() {
        let mut table = Table::new(&["Key", "Value"]);
        table.row(vec!["users.title".to_string(), String::new()]);
        let plain = console::strip_ansi_codes(&table.render()).to_string();
        assert!(plain.lines().any(|l| l == "users.title"));
    }

    #[test]
    fn test_table_measures_colored_cells() {
        let mut table = Table::new(&["A", "B"]);
        table.row(vec!["red".red().to_string(), "x".to_string()]);
        let plain = console::strip_ansi_codes(&table.render()).to_string();
        assert!(plain.lines().any(|l| l == "red | x"));
    }
}
