//! The interactive loop.

use std::io::{self, Write as _};
use std::path::Path;

use fathom_engine::Game;
use fathom_foundation::Result;

use crate::reader::{LineReader, ReadOutcome, RustylineReader};
use crate::serialize;

/// The interactive REPL: reads a line, feeds it to the engine, prints
/// the transcript, repeats.
pub struct Repl<R: LineReader = RustylineReader> {
    reader: R,
    game: Game,
    prompt: String,
    show_banner: bool,
}

impl Repl<RustylineReader> {
    /// Creates a REPL over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error when the line editor fails to initialize.
    pub fn new(game: Game) -> Result<Self> {
        Ok(Self::with_reader(RustylineReader::new()?, game))
    }
}

impl<R: LineReader> Repl<R> {
    /// Creates a REPL with the given reader.
    pub fn with_reader(reader: R, game: Game) -> Self {
        Self {
            reader,
            game,
            prompt: "> ".to_string(),
            show_banner: true,
        }
    }

    /// Disables the banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Access to the game, for inspection after a scripted run.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access to the game.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Runs the loop until EOF or `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error when reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            println!("Fathom. Type 'help' for commands, 'quit' to leave.\n");
        }

        self.game.start()?;
        self.flush_output();

        loop {
            let line = match self.reader.read_line(&self.prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof => break,
                ReadOutcome::Interrupted => continue,
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.reader.add_history(trimmed);

            if self.meta_command(trimmed)? {
                if trimmed == "quit" || trimmed == "q" {
                    break;
                }
                continue;
            }

            self.game.submit(trimmed);
            self.flush_output();
        }

        println!("\nGoodbye.");
        Ok(())
    }

    /// Handles the out-of-world commands. Returns true when the line
    /// was one of them.
    fn meta_command(&mut self, line: &str) -> Result<bool> {
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["quit" | "q"] => Ok(true),
            ["save", path] => {
                serialize::save_to_file(&self.game.world.data, Path::new(path))?;
                println!("Saved to {path}.");
                Ok(true)
            }
            ["restore", path] => {
                let data = serialize::load_from_file(Path::new(path))?;
                self.game.world.data = data;
                println!("Restored from {path}.");
                self.game.start()?;
                self.flush_output();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn flush_output(&mut self) {
        let text = self.game.take_output();
        if !text.is_empty() {
            println!("{}", text.trim_end());
            println!();
        }
        let _ = io::stdout().flush();
    }
}
