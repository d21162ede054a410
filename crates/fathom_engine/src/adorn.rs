//! Reusable verify adornments.
//!
//! Verbs compose these onto their verify and try_before chains instead
//! of restating the same accessibility checks. Each failure message
//! names the exact failure mode: out of sight, out of reach, behind a
//! closed container, not held.

use fathom_foundation::{Id, Result};
use fathom_parser::Action;
use fathom_world::{queries, World};

use crate::game::Game;
use crate::pipeline::do_first;
use crate::score::{Verdict, ILLOGICAL, ILLOGICAL_INACCESSIBLE, ILLOGICAL_NOT_VISIBLE, NON_OBVIOUS};

/// Options for the held-object requirement.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeldOpts {
    /// Score the miss as merely non-obvious, trusting an auto-take
    /// try_before rule to fix it up.
    pub only_hint: bool,
    /// Accept objects inside something held.
    pub transitive: bool,
}

/// True if the actor holds the object (worn or carried), optionally
/// through held containers.
#[must_use]
pub fn is_held(world: &World, o: &Id, actor: &Id, transitive: bool) -> bool {
    let mut current = o.clone();
    loop {
        match world.location(&current) {
            Some((dest, tag)) if tag.is_carried() && dest == actor => return true,
            Some((dest, _)) if transitive => current = dest.clone(),
            _ => return false,
        }
    }
}

fn slot<'a>(action: &'a Action, iobj: bool) -> Option<&'a Id> {
    if iobj {
        action.iobj.as_ref()
    } else {
        action.dobj.as_ref()
    }
}

fn visibility_verdict(game: &mut Game, o: &Id) -> Result<Option<Verdict>> {
    let actor = game.world.actor();
    if queries::visible_to(&mut game.world, o, &actor)? {
        Ok(None)
    } else {
        Ok(Some(Verdict::new(
            ILLOGICAL_NOT_VISIBLE,
            "{We} can't see any such thing.",
        )))
    }
}

fn accessibility_verdict(game: &mut Game, o: &Id) -> Result<Option<Verdict>> {
    if let Some(bad) = visibility_verdict(game, o)? {
        return Ok(Some(bad));
    }
    let actor = game.world.actor();
    if queries::accessible_to(&mut game.world, o, &actor)? {
        return Ok(None);
    }
    // Visible but out of reach; name the barrier when it is a closed
    // container.
    let scope = queries::effective_container(&mut game.world, o)?;
    let reason = if game.world.is_a(&scope, "container") {
        "That seems to be shut inside [the-scope]."
            .replace("[the-scope]", &scope_phrase(game, &scope)?)
    } else {
        "{We} can't get to that.".to_string()
    };
    Ok(Some(Verdict::new(ILLOGICAL_INACCESSIBLE, reason)))
}

fn scope_phrase(game: &mut Game, scope: &Id) -> Result<String> {
    Ok(format!(
        "the closed {}",
        fathom_world::prose::display_name(&mut game.world, scope)?
    ))
}

fn register_requirement(
    game: &mut Game,
    verb: &str,
    name: &str,
    iobj: bool,
    check: fn(&mut Game, &Id) -> Result<Option<Verdict>>,
) {
    game.verify_rule(verb, name, move |game, action| {
        let Some(o) = slot(action, iobj).cloned() else {
            return Ok(Verdict::logical());
        };
        match check(game, &o)? {
            Some(bad) => Ok(bad),
            None => Ok(Verdict::logical()),
        }
    });
}

/// The direct object must be visible.
pub fn require_dobj_visible(game: &mut Game, verb: &str) {
    register_requirement(game, verb, "dobj-visible", false, visibility_verdict);
}

/// The indirect object must be visible.
pub fn require_iobj_visible(game: &mut Game, verb: &str) {
    register_requirement(game, verb, "iobj-visible", true, visibility_verdict);
}

/// The direct object must be accessible.
pub fn require_dobj_accessible(game: &mut Game, verb: &str) {
    register_requirement(game, verb, "dobj-accessible", false, accessibility_verdict);
}

/// The indirect object must be accessible.
pub fn require_iobj_accessible(game: &mut Game, verb: &str) {
    register_requirement(game, verb, "iobj-accessible", true, accessibility_verdict);
}

fn register_held(game: &mut Game, verb: &str, name: &str, iobj: bool, opts: HeldOpts) {
    game.verify_rule(verb, name, move |game, action| {
        let Some(o) = slot(action, iobj).cloned() else {
            return Ok(Verdict::logical());
        };
        let actor = game.world.actor();
        if is_held(&game.world, &o, &actor, opts.transitive) {
            Ok(Verdict::logical())
        } else if opts.only_hint {
            Ok(Verdict {
                score: NON_OBVIOUS,
                reason: None,
            })
        } else {
            Ok(Verdict::new(ILLOGICAL, "{We} {aren't|bob} holding that."))
        }
    });
}

/// The direct object must be held.
pub fn require_dobj_held(game: &mut Game, verb: &str, opts: HeldOpts) {
    register_held(game, verb, "dobj-held", false, opts);
}

/// The indirect object must be held.
pub fn require_iobj_held(game: &mut Game, verb: &str, opts: HeldOpts) {
    register_held(game, verb, "iobj-held", true, opts);
}

fn register_auto_take(game: &mut Game, verb: &str, name: &str, iobj: bool) {
    game.try_before_rule(verb, name, move |game, action| {
        let Some(o) = slot(action, iobj).cloned() else {
            return Ok(());
        };
        let actor = game.world.actor();
        if o != actor && !is_held(&game.world, &o, &actor, true) {
            do_first(game, Action::new("take").with_dobj(o))?;
        }
        Ok(())
    });
}

/// Auto-takes the direct object when it is not held.
pub fn hint_dobj_not_held(game: &mut Game, verb: &str) {
    register_auto_take(game, verb, "auto-take-dobj", false);
}

/// Auto-takes the indirect object when it is not held.
pub fn hint_iobj_not_held(game: &mut Game, verb: &str) {
    register_auto_take(game, verb, "auto-take-iobj", true);
}
