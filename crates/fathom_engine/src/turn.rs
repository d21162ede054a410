//! The turn loop.
//!
//! The engine is a cooperative producer with a single suspension point:
//! awaiting an input line. [`Game::submit`] is that resume. Each call
//! runs at most one turn; errors inside a turn are caught here,
//! reported, and the loop state stays good for the next line.

use fathom_foundation::{ErrorKind, Result, Value};
use fathom_parser::{Action, Parser};
use fathom_text::TextSink;
use fathom_world::queries;

use crate::describe;
use crate::disambig::{self, Choice};
use crate::game::Game;
use crate::pipeline;

impl Game {
    /// Begins play: positions backdrops and renders the opening scene.
    ///
    /// # Errors
    ///
    /// Propagates rule faults from the initial rendering.
    pub fn start(&mut self) -> Result<()> {
        self.world.run_activity("move_backdrops", vec![])?;
        self.render_scene(true)
    }

    /// Processes one input line.
    ///
    /// An internal fault is reported as such and the loop continues;
    /// every expected failure (parse errors, refusals, aborts) has
    /// already produced its own prose.
    pub fn submit(&mut self, line: &str) {
        if let Err(e) = self.turn(line) {
            let sink = self.world.sink();
            sink.borrow_mut().write_text("[Internal error]");
            drop(sink);
            self.world.para();
            let _ = e;
        }
    }

    fn turn(&mut self, line: &str) -> Result<()> {
        let line = line.trim();

        // A pending menu consumes a number; anything else falls through
        // as a fresh command.
        if let Some(menu) = self.pending_menu.take() {
            if let Ok(n) = line.parse::<usize>() {
                if (1..=menu.options.len()).contains(&n) {
                    let action = menu.options[n - 1].1.clone();
                    return self.execute(action);
                }
                self.world.write("That wasn't one of the choices.")?;
                self.world.para();
                return Ok(());
            }
        }

        if line.is_empty() {
            return Ok(());
        }

        let mut parser = Parser::new(&mut self.world, &self.grammar, line)?;
        let matches = parser.parse_command(&mut self.world)?;

        if matches.is_empty() {
            let known = parser.known_words();
            let unknown = parser
                .tokens()
                .iter()
                .find(|t| t.is_word() && !known.contains(&t.text))
                .map(|t| t.text.clone());
            drop(parser);
            match unknown {
                Some(word) => {
                    self.world
                        .write(&format!("I don't know what you mean by '{word}'."))?;
                }
                None => {
                    self.world.write("I don't understand what you mean.")?;
                }
            }
            self.world.para();
            return Ok(());
        }
        drop(parser);

        match disambig::choose(self, matches)? {
            Choice::Run(action) => self.execute(action),
            Choice::Ask(menu) => {
                self.world.write("Which do you mean?")?;
                self.world.para();
                for (i, (label, _)) in menu.options.iter().enumerate() {
                    self.world.write(&format!("{}) {label}", i + 1))?;
                    self.world.para();
                }
                self.pending_menu = Some(menu);
                Ok(())
            }
            Choice::TooMany => {
                self.world
                    .write("You could mean too many different things by that.")?;
                self.world.para();
                Ok(())
            }
        }
    }

    /// Runs one chosen action and, on success, the turn hooks.
    pub(crate) fn execute(&mut self, action: Action) -> Result<()> {
        match pipeline::perform(self, action, false) {
            Ok(true) => self.step_turn(),
            Ok(false) => Ok(()),
            Err(e) => {
                if let ErrorKind::AbortAction { reason } = &e.kind {
                    if let Some(template) = reason {
                        self.world.write(template)?;
                        self.world.para();
                    }
                    Ok(())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// The after-action hook: reposition backdrops, then re-render the
    /// scene when the actor's visible container or its light changed.
    fn step_turn(&mut self) -> Result<()> {
        self.world.run_activity("move_backdrops", vec![])?;

        let actor = self.world.actor();
        let scene = queries::visible_container(&mut self.world, &actor)?;
        let lit = queries::contains_light(&mut self.world, &scene)?;
        if self.last_scene.as_ref() == Some(&(scene, lit)) {
            return Ok(());
        }
        self.render_scene(true)
    }

    /// Renders the scene (or darkness) and records it; `set_visited`
    /// marks a lit room visited by the actor.
    pub(crate) fn render_scene(&mut self, set_visited: bool) -> Result<()> {
        let actor = self.world.actor();
        let scene = queries::visible_container(&mut self.world, &actor)?;
        let lit = queries::contains_light(&mut self.world, &scene)?;

        describe::describe_location(&mut self.world)?;
        if set_visited && lit && self.world.is_a(&scene, "room") {
            self.world.set(
                "visited",
                &[Value::Id(scene.clone()), Value::Id(actor)],
                true,
            );
        }
        self.last_scene = Some((scene, lit));
        Ok(())
    }
}
