//! Yes/no confirmation prompts

use console::Term;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, IsTerminal};

/// Ask a yes/no question on stderr and read the answer
///
/// Reads from the terminal when stdin is one, otherwise a line from stdin.
/// End of input counts as "no".
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let term = Term::stderr();
    term.write_line(&prompt.red().to_string())?;

    let answer = if io::stdin().is_terminal() {
        term.read_line()?
    } else {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        line
    };
    Ok(is_yes(&answer))
}

/// `y` and `yes`, any case, surrounding whitespace ignored
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
