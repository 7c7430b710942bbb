//! Terminal reports

use i18n_tasks_cli::output::{heading, Table};
use i18n_tasks_core::scanner::UsedKey;
use i18n_tasks_core::task::{I18nTask, MissingKey, MissingKind, UnusedKey};
use owo_colors::OwoColorize;

/// Renders task results as colored text
pub struct TerminalReport {
    base_locale: String,
}

impl TerminalReport {
    pub fn new(task: &I18nTask) -> Self {
        Self::for_base(task.base_locale())
    }

    fn for_base(base_locale: &str) -> Self {
        Self {
            base_locale: base_locale.to_string(),
        }
    }

    pub fn missing_keys(&self, missing: &[MissingKey]) -> String {
        let mut out = heading("Missing translations", missing.len());
        if missing.is_empty() {
            out.push_str(&format!("{}\n", "Good job! No translations are missing.".green().bold()));
            return out;
        }

        let mut table = Table::new(&[
            "Locale".to_string(),
            "Type".to_string(),
            "i18n Key".to_string(),
            format!("Base value ({})", self.base_locale),
        ]);
        for m in missing {
            table.row(vec![
                m.locale.cyan().to_string(),
                kind_label(m.kind),
                m.key.magenta().to_string(),
                single_line(m.base_value.as_deref().unwrap_or_default()),
            ]);
        }
        out.push_str(&table.render());
        out
    }

    pub fn unused_keys(&self, unused: &[UnusedKey]) -> String {
        let mut out = heading("Unused keys", unused.len());
        if unused.is_empty() {
            out.push_str(&format!("{}\n", "Good job! Every translation is used!".green().bold()));
            return out;
        }

        let mut table = Table::new(&[
            "i18n Key".to_string(),
            format!("Base value ({})", self.base_locale),
        ]);
        for u in unused {
            table.row(vec![u.key.magenta().to_string(), single_line(&u.value)]);
        }
        out.push_str(&table.render());
        out
    }

    pub fn used_keys(&self, used: &[UsedKey]) -> String {
        let mut out = heading("Used keys", used.len());
        if used.is_empty() {
            out.push_str(&format!("{}\n", "No key usages found.".yellow()));
            return out;
        }

        for key in used {
            out.push_str(&format!("{} ({})\n", key.key.bold(), key.usages.len()));
            for usage in &key.usages {
                let location = format!("{}:{}", usage.path, usage.line_num);
                out.push_str(&format!("  {}  {}\n", location.green(), usage.line.dimmed()));
            }
        }
        out
    }
}

fn kind_label(kind: MissingKind) -> String {
    match kind {
        MissingKind::Absent => kind.as_str().red().to_string(),
        MissingKind::Blank => kind.as_str().yellow().to_string(),
        MissingKind::EqBase => kind.as_str().cyan().to_string(),
    }
}

fn single_line(value: &str) -> String {
    value.replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use i18n_tasks_core::scanner::Occurrence;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).to_string()
    }

    #[test]
    fn test_missing_report() {
        let report = TerminalReport::for_base("en");
        let text = plain(&report.missing_keys(&[
            MissingKey {
                locale: "en".to_string(),
                key: "users.heading".to_string(),
                kind: MissingKind::Absent,
                base_value: None,
            },
            MissingKey {
                locale: "es".to_string(),
                key: "users.name".to_string(),
                kind: MissingKind::Blank,
                base_value: Some("Name\nand more".to_string()),
            },
        ]));

        assert!(text.starts_with("Missing translations (2)\n"));
        assert!(text.contains("Locale | Type  | i18n Key      | Base value (en)"));
        assert!(text.contains("es     | blank | users.name    | Name\\nand more"));
        assert!(text.contains("en     | none  | users.heading\n"));
    }

    #[test]
    fn test_empty_reports() {
        let report = TerminalReport::for_base("en");
        assert!(
            plain(&report.missing_keys(&[])).contains("Good job! No translations are missing.")
        );
        assert!(plain(&report.unused_keys(&[])).contains("Good job! Every translation is used!"));
        assert!(plain(&report.used_keys(&[])).contains("No key usages found."));
    }

    #[test]
    fn test_usages_report() {
        let report = TerminalReport::for_base("en");
        let text = plain(&report.used_keys(&[UsedKey {
            key: "users.title".to_string(),
            usages: vec![Occurrence {
                path: "app/views/users/index.html.erb".to_string(),
                line_num: 2,
                pos: 6,
                line: "<%= t 'users.title' %>".to_string(),
            }],
        }]));

        assert!(text.contains("users.title (1)\n"));
        assert!(text.contains("  app/views/users/index.html.erb:2  <%= t 'users.title' %>\n"));
    }
}
