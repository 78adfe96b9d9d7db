//! Console output for status lines.

use crate::notify::{Event, Sink};
use crate::types::Level;
use colored::Colorize;
use std::io::IsTerminal;

/// Prints one tagged line per event to stdout.
///
/// Potential confusion warnings are always shown; everything else only in
/// verbose mode.
pub struct ConsoleOutput {
    verbose: bool,
    color: bool,
}

impl ConsoleOutput {
    /// Create a console sink. Tags are colored only when stdout is a terminal.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            color: std::io::stdout().is_terminal(),
        }
    }

    /// Render the line for `event`, or `None` if it is filtered out.
    pub fn format_line(&self, event: &Event) -> Option<String> {
        let level = event.level();
        if level != Level::Warning && !self.verbose {
            return None;
        }

        let tag = if self.color {
            match level {
                Level::Info => level.tag().bright_blue().to_string(),
                Level::Warning => level.tag().yellow().bold().to_string(),
                Level::Error => level.tag().red().to_string(),
            }
        } else {
            level.tag().to_string()
        };

        Some(format!("{} {}", tag, event))
    }
}

impl Sink for ConsoleOutput {
    fn emit(&self, event: &Event) {
        if let Some(line) = self.format_line(event) {
            println!("{}", line);
        }
    }
}
