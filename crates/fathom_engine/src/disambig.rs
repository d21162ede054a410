//! Choosing one action among the candidate parses.

use fathom_foundation::Result;
use fathom_parser::{Action, ActionMatch};

use crate::game::{Game, Menu};
use crate::pipeline::verify;
use crate::score::{Verdict, ILLOGICAL_NOT_VISIBLE};

/// The most alternatives a menu will offer.
pub const MENU_LIMIT: usize = 6;

/// What the disambiguator decided.
#[derive(Clone, Debug)]
pub enum Choice {
    /// One winner; run it (it may still refuse at verify).
    Run(Action),
    /// Several equally good readings; ask the player.
    Ask(Menu),
    /// More equally good readings than a menu can carry.
    TooMany,
}

/// Picks among candidate parses.
///
/// Candidates flagged not-visible are dropped (unless that empties the
/// pool, in which case they stay so the refusal can explain itself).
/// Author-registered mistakes dominate everything. If no candidate is
/// reasonable the worst one is chosen so the player sees a concrete
/// refusal; otherwise the best verify score, then the best grammar
/// score, narrows the pool.
///
/// # Errors
///
/// Propagates verify rule faults.
pub fn choose(game: &mut Game, matches: Vec<ActionMatch>) -> Result<Choice> {
    let mut candidates: Vec<(ActionMatch, Verdict)> = Vec::with_capacity(matches.len());
    for m in matches {
        let verdict = verify(game, &m.action)?;
        candidates.push((m, verdict));
    }

    let sighted: Vec<(ActionMatch, Verdict)> = candidates
        .iter()
        .filter(|(_, v)| v.score > ILLOGICAL_NOT_VISIBLE)
        .cloned()
        .collect();
    if !sighted.is_empty() {
        candidates = sighted;
    }

    // Explicit mistakes dominate ordinary readings.
    let mistakes: Vec<(ActionMatch, Verdict)> = candidates
        .iter()
        .filter(|(m, _)| m.action.is("making_mistake"))
        .cloned()
        .collect();
    if !mistakes.is_empty() {
        candidates = mistakes;
    }

    if !candidates.iter().any(|(_, v)| v.is_reasonable()) {
        // Nothing viable: run the worst so its refusal is concrete.
        let worst = candidates
            .into_iter()
            .min_by_key(|(_, v)| v.score)
            .expect("parser produced at least one match");
        return Ok(Choice::Run(worst.0.action));
    }

    candidates.retain(|(_, v)| v.is_reasonable());

    let best_logic = candidates.iter().map(|(_, v)| v.score).max().unwrap_or(0);
    candidates.retain(|(_, v)| v.score == best_logic);

    let best_grammar = candidates.iter().map(|(m, _)| m.score).max().unwrap_or(0);
    candidates.retain(|(m, _)| m.score == best_grammar);

    // Distinct parses can build the same action; those are one choice.
    let mut actions: Vec<Action> = Vec::new();
    for (m, _) in candidates {
        if !actions.contains(&m.action) {
            actions.push(m.action);
        }
    }

    if actions.len() == 1 {
        return Ok(Choice::Run(actions.remove(0)));
    }
    if actions.len() > MENU_LIMIT {
        return Ok(Choice::TooMany);
    }

    let mut options = Vec::with_capacity(actions.len());
    for action in actions {
        let label = game.action_label(&action)?;
        options.push((label, action));
    }
    Ok(Choice::Ask(Menu { options }))
}
