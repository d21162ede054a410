//! The standard verb library.
//!
//! The core defines the verbs; game content adds rooms, things, and its
//! own verbs on top through the same registration API. Patterns,
//! verify adornments, and phase rules for each verb live in the
//! submodules.

use fathom_foundation::Result;

use crate::game::Game;
use crate::score::Verdict;

mod looking;
mod manipulation;
mod movement;
mod social;

/// Installs every standard verb into a game.
pub fn install(game: &mut Game) {
    install_all(game).expect("standard verb grammar compiles");
}

fn install_all(game: &mut Game) -> Result<()> {
    looking::install(game)?;
    manipulation::install(game)?;
    movement::install(game)?;
    social::install(game)?;
    mistakes(game);
    Ok(())
}

/// The `making_mistake` verb behind `understand_mistake`: it dominates
/// disambiguation and its report is the registered message.
fn mistakes(game: &mut Game) {
    game.verb("making_mistake", "blundering");
    game.verify_rule("making_mistake", "mistakes-dominate", |_, _| {
        Ok(Verdict::very_logical())
    });
    game.report_rule("making_mistake", "report", |game, action| {
        if let Some(message) = &action.text {
            game.world.write(message)?;
            game.world.para();
        }
        Ok(())
    });
}
