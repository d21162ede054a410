//! The five-phase action pipeline.
//!
//! `verify → try_before → before → carry_out → report`. A rule in the
//! first three phases may raise the abort signal (unwinding to the turn
//! loop with no further mutation) or the redirect signal (replacing the
//! action and replanning from the top). `carry_out` is the only phase
//! that mutates the world, and it must not fail.

use fathom_foundation::{Error, ErrorKind, Result};
use fathom_parser::Action;

use crate::game::Game;
use crate::score::Verdict;

/// Raises the abort signal with a reason template.
#[must_use]
pub fn abort_action(reason: &str) -> Error {
    Error::abort_with(reason)
}

/// Raises the redirect signal: replace the current action.
#[must_use]
pub fn do_instead(action: &Action, quiet: bool) -> Error {
    Error::do_instead(action.to_value(), quiet)
}

/// Runs the verify phase for an action.
///
/// # Errors
///
/// Propagates rule faults.
pub fn verify(game: &mut Game, action: &Action) -> Result<Verdict> {
    let book = game.phases.verify.clone();
    book.call(game, action)
}

fn try_before(game: &mut Game, action: &Action) -> Result<()> {
    let book = game.phases.try_before.clone();
    book.call(game, action)
}

fn before(game: &mut Game, action: &Action) -> Result<()> {
    let book = game.phases.before.clone();
    book.call(game, action)
}

fn carry_out(game: &mut Game, action: &Action) -> Result<()> {
    let book = game.phases.carry_out.clone();
    book.call(game, action)
}

fn report(game: &mut Game, action: &Action) -> Result<()> {
    let book = game.phases.report.clone();
    book.call(game, action)
}

/// Executes one action through the pipeline.
///
/// Returns `Ok(true)` when `carry_out` completed, `Ok(false)` when the
/// action refused at verify (the reason has been shown). A redirect
/// replans from the top for the replacement action, printing
/// `(doing X instead)` unless suppressed.
///
/// # Errors
///
/// The abort signal and internal faults propagate to the caller.
pub fn perform(game: &mut Game, action: Action, silent: bool) -> Result<bool> {
    let mut action = action;
    loop {
        let verdict = verify(game, &action)?;
        if !verdict.is_reasonable() {
            match verdict.reason {
                Some(reason) => reason.show(&mut game.world)?,
                None => game.world.write("{We} can't do that.")?,
            }
            game.world.para();
            return Ok(false);
        }

        let outcome = try_before(game, &action).and_then(|()| before(game, &action));
        match outcome {
            Ok(()) => {}
            Err(e) => {
                if let ErrorKind::DoInstead {
                    action: replacement,
                    quiet,
                } = &e.kind
                {
                    let replacement = Action::from_value(replacement)?;
                    if !quiet {
                        let label = game.action_label(&replacement)?;
                        game.world.write(&format!("(doing {label} instead)"))?;
                        game.world.para();
                    }
                    action = replacement;
                    continue;
                }
                return Err(e);
            }
        }

        carry_out(game, &action)?;
        if !silent {
            report(game, &action)?;
        }
        return Ok(true);
    }
}

/// Runs an implicit prerequisite action with a `(first ...)` notice and
/// a silenced report.
///
/// # Errors
///
/// Raises the abort signal when the sub-action refuses (its reason has
/// already been shown), and propagates aborts from the sub-action
/// itself, unwinding the outer action too.
pub fn do_first(game: &mut Game, action: Action) -> Result<()> {
    let label = game.action_label(&action)?;
    game.world.write(&format!("(first {label})"))?;
    game.world.para();
    if perform(game, action, true)? {
        Ok(())
    } else {
        Err(Error::abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_foundation::Value;

    fn record(game: &mut Game, tag: &str) {
        let log = game
            .world
            .global("phase-log")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();
        game.world
            .set_global("phase-log", format!("{log}{tag},"));
    }

    fn logged(game: &Game) -> String {
        game.world
            .global("phase-log")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn phases_run_in_order() {
        let mut game = Game::bare();
        game.try_before_rule("hum", "log", |g, _| {
            record(g, "try_before");
            Ok(())
        });
        game.before_rule("hum", "log", |g, _| {
            record(g, "before");
            Ok(())
        });
        game.carry_out_rule("hum", "log", |g, _| {
            record(g, "carry_out");
            Ok(())
        });
        game.report_rule("hum", "log", |g, _| {
            record(g, "report");
            Ok(())
        });

        let done = perform(&mut game, Action::new("hum"), false).unwrap();
        assert!(done);
        assert_eq!(logged(&game), "try_before,before,carry_out,report,");
    }

    #[test]
    fn silent_skips_report() {
        let mut game = Game::bare();
        game.report_rule("hum", "log", |g, _| {
            record(g, "report");
            Ok(())
        });

        let done = perform(&mut game, Action::new("hum"), true).unwrap();
        assert!(done);
        assert_eq!(logged(&game), "");
    }

    #[test]
    fn failing_verify_refuses_with_reason() {
        let mut game = Game::bare();
        game.verify_rule("hum", "no-humming", |_, _| {
            Ok(Verdict::new(crate::score::ILLOGICAL, "No humming here."))
        });
        game.carry_out_rule("hum", "log", |g, _| {
            record(g, "carry_out");
            Ok(())
        });

        let done = perform(&mut game, Action::new("hum"), false).unwrap();
        assert!(!done);
        assert_eq!(logged(&game), "");
        assert!(game.take_output().contains("No humming here."));
    }

    #[test]
    fn abort_in_before_skips_carry_out() {
        let mut game = Game::bare();
        game.before_rule("hum", "refuse", |_, _| Err(abort_action("Not now.")));
        game.carry_out_rule("hum", "log", |g, _| {
            record(g, "carry_out");
            Ok(())
        });

        let err = perform(&mut game, Action::new("hum"), false).unwrap_err();
        assert!(err.is_abort());
        assert_eq!(logged(&game), "");
    }

    #[test]
    fn redirect_replans_and_notices() {
        let mut game = Game::bare();
        game.verb("sing", "singing");
        game.before_rule("hum", "prefer-singing", |_, _| {
            Err(do_instead(&Action::new("sing"), false))
        });
        game.carry_out_rule("sing", "log", |g, _| {
            record(g, "sing");
            Ok(())
        });

        let done = perform(&mut game, Action::new("hum"), false).unwrap();
        assert!(done);
        assert_eq!(logged(&game), "sing,");
        assert!(game.take_output().contains("(doing singing instead)"));
    }

    #[test]
    fn quiet_redirect_prints_nothing() {
        let mut game = Game::bare();
        game.before_rule("hum", "prefer-singing", |_, _| {
            Err(do_instead(&Action::new("sing"), true))
        });

        perform(&mut game, Action::new("hum"), false).unwrap();
        assert!(!game.take_output().contains("instead"));
    }

    #[test]
    fn do_first_notices_and_silences() {
        let mut game = Game::bare();
        game.verb("take", "taking");
        game.world.create("red-ball", "thing").unwrap();
        game.carry_out_rule("take", "log", |g, _| {
            record(g, "take");
            Ok(())
        });
        game.report_rule("take", "log", |g, _| {
            record(g, "take-report");
            Ok(())
        });

        do_first(&mut game, Action::new("take").with_dobj("red-ball")).unwrap();
        assert_eq!(logged(&game), "take,");
        assert!(game.take_output().contains("(first taking the red ball)"));
    }
}
