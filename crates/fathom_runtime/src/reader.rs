//! Line reader abstraction for the REPL.
//!
//! The default implementation wraps rustyline; tests use
//! [`ScriptedReader`] to feed a fixed list of lines.

use fathom_foundation::{Error, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

/// Result of reading a line.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A line was read.
    Line(String),
    /// End of input (Ctrl+D or script exhausted).
    Eof,
    /// The user interrupted (Ctrl+C).
    Interrupted,
}

/// Abstraction over line input.
pub trait LineReader {
    /// Reads one line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Adds a line to history, where supported.
    fn add_history(&mut self, line: &str);
}

/// Line reader backed by rustyline.
pub struct RustylineReader {
    editor: Editor<(), DefaultHistory>,
}

impl RustylineReader {
    /// Creates a rustyline-backed reader.
    ///
    /// # Errors
    ///
    /// Returns an error when rustyline fails to initialize.
    pub fn new() -> Result<Self> {
        let editor =
            Editor::new().map_err(|e| Error::internal(format!("editor init failed: {e}")))?;
        Ok(Self { editor })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(e) => Err(Error::internal(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

/// Scripted reader for tests: yields fixed lines, then EOF.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: Vec<String>,
    next: usize,
}

impl ScriptedReader {
    /// Creates a reader that yields these lines in order.
    #[must_use]
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            next: 0,
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome> {
        match self.lines.get(self.next) {
            Some(line) => {
                self.next += 1;
                Ok(ReadOutcome::Line(line.clone()))
            }
            None => Ok(ReadOutcome::Eof),
        }
    }

    fn add_history(&mut self, _line: &str) {}
}
