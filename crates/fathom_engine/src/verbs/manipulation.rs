//! take, drop, put in/on, open, close, lock, unlock, wear, remove,
//! switch on/off, use, eat.

use fathom_foundation::{Id, Result, Value};
use fathom_parser::Action;
use fathom_world::{queries, LocTag};

use crate::adorn::{self, HeldOpts};
use crate::game::Game;
use crate::pipeline::{abort_action, do_first};
use crate::score::{Verdict, ILLOGICAL, ILLOGICAL_ALREADY};

pub(super) fn install(game: &mut Game) -> Result<()> {
    take(game)?;
    drop_verb(game)?;
    put_in(game)?;
    put_on(game)?;
    open(game)?;
    close(game)?;
    lock(game)?;
    unlock(game)?;
    wear(game)?;
    remove(game)?;
    switching(game)?;
    use_verb(game)?;
    eat(game)?;
    Ok(())
}

fn dobj(action: &Action) -> Id {
    action.dobj.clone().expect("grammar captured a direct object")
}

fn iobj(action: &Action) -> Id {
    action.iobj.clone().expect("grammar captured an indirect object")
}

fn report(game: &mut Game, template: &str) -> Result<()> {
    game.world.write(template)?;
    game.world.para();
    Ok(())
}

/// `{template} [the dobj]{tail}` with proper object references.
fn report_dobj(game: &mut Game, action: &Action, template: &str, tail: &str) -> Result<()> {
    game.world.write(template)?;
    let o = dobj(action);
    fathom_world::prose::the(&mut game.world, &o)?;
    game.world.write(tail)?;
    game.world.para();
    Ok(())
}

fn take(game: &mut Game) -> Result<()> {
    game.verb("take", "taking");
    game.understand("take/get [something o]", |caps| {
        Action::new("take").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("pick up [something o]", |caps| {
        Action::new("take").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "take");
    game.verify_rule("take", "takeable", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        if o == actor {
            return Ok(Verdict::new(ILLOGICAL, "There's no picking {ourselves} up."));
        }
        if adorn::is_held(&game.world, &o, &actor, false) {
            return Ok(Verdict::new(
                ILLOGICAL_ALREADY,
                "{We} already {have|bob} that.",
            ));
        }
        if game.world.is_a(&o, "person") {
            return Ok(Verdict::new(ILLOGICAL, "That would be taking liberties."));
        }
        if game.world.bool_prop("fixed_in_place", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That seems to be fixed in place."));
        }
        Ok(Verdict::logical())
    });

    game.carry_out_rule("take", "move-to-actor", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        game.world.relate(&o, &actor, LocTag::OwnedBy)
    });
    game.report_rule("take", "report", |game, _| report(game, "Taken."));
    Ok(())
}

fn drop_verb(game: &mut Game) -> Result<()> {
    game.verb("drop", "dropping");
    game.understand("drop [something o]", |caps| {
        Action::new("drop").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("put down [something o]", |caps| {
        Action::new("drop").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_visible(game, "drop");
    adorn::require_dobj_held(
        game,
        "drop",
        HeldOpts {
            only_hint: true,
            transitive: false,
        },
    );
    adorn::hint_dobj_not_held(game, "drop");

    game.before_rule("drop", "must-hold", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        if adorn::is_held(&game.world, &o, &actor, false) {
            Ok(())
        } else {
            Err(abort_action("{We} {aren't|bob} holding that."))
        }
    });

    game.carry_out_rule("drop", "move-to-floor", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        let Some((dest, tag)) = game.world.location(&actor) else {
            return Ok(());
        };
        let dest = dest.clone();
        let tag = if tag == LocTag::SupportedBy {
            LocTag::SupportedBy
        } else {
            LocTag::ContainedBy
        };
        game.world.relate(&o, &dest, tag)
    });
    game.report_rule("drop", "report", |game, _| report(game, "Dropped."));
    Ok(())
}

fn put_in(game: &mut Game) -> Result<()> {
    game.verb_with_prep("put_in", "putting", "into");
    for pattern in [
        "put [something o] in/into [something c]",
        "insert [something o] in/into [something c]",
    ] {
        game.understand(pattern, |caps| {
            Action::new("put_in")
                .with_dobj(caps.obj("o").expect("captured o"))
                .with_iobj(caps.obj("c").expect("captured c"))
        })?;
    }

    adorn::require_dobj_visible(game, "put_in");
    adorn::require_iobj_accessible(game, "put_in");
    game.verify_rule("put_in", "container-sense", |game, action| {
        let o = dobj(action);
        let c = iobj(action);
        if o == c {
            return Ok(Verdict::new(ILLOGICAL, "{We} can't put a thing into itself."));
        }
        if !game.world.is_a(&c, "container") {
            return Ok(Verdict::new(ILLOGICAL, "That can't contain things."));
        }
        Ok(Verdict::logical())
    });

    // Ordering matters: the open runs first, the take second, so the
    // notices come out in that order.
    adorn::hint_dobj_not_held(game, "put_in");
    game.try_before_rule("put_in", "auto-open", |game, action| {
        let c = iobj(action);
        if game.world.bool_prop("openable", &c)? && !game.world.bool_prop("open", &c)? {
            do_first(game, Action::new("open").with_dobj(c))?;
        }
        Ok(())
    });

    game.before_rule("put_in", "checks", |game, action| {
        let o = dobj(action);
        let c = iobj(action);
        let actor = game.world.actor();
        if game.world.bool_prop("openable", &c)? && !game.world.bool_prop("open", &c)? {
            return Err(abort_action("It's closed."));
        }
        if queries::contains(&game.world, &o, &c) {
            return Err(abort_action(
                "{We} can't put a thing inside something it contains.",
            ));
        }
        if !adorn::is_held(&game.world, &o, &actor, false) {
            return Err(abort_action("{We} {aren't|bob} holding that."));
        }
        Ok(())
    });

    game.carry_out_rule("put_in", "move-inside", |game, action| {
        let o = dobj(action);
        let c = iobj(action);
        game.world.relate(&o, &c, LocTag::ContainedBy)
    });
    game.report_rule("put_in", "report", |game, action| {
        game.world.write("{We} {put|bob} ")?;
        let o = dobj(action);
        fathom_world::prose::the(&mut game.world, &o)?;
        game.world.write(" into ")?;
        let c = iobj(action);
        fathom_world::prose::the(&mut game.world, &c)?;
        game.world.write(".")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn put_on(game: &mut Game) -> Result<()> {
    game.verb_with_prep("put_on", "putting", "onto");
    game.understand("put [something o] on/onto [something s]", |caps| {
        Action::new("put_on")
            .with_dobj(caps.obj("o").expect("captured o"))
            .with_iobj(caps.obj("s").expect("captured s"))
    })?;

    adorn::require_dobj_visible(game, "put_on");
    adorn::require_iobj_accessible(game, "put_on");
    game.verify_rule("put_on", "supporter-sense", |game, action| {
        let o = dobj(action);
        let s = iobj(action);
        if o == s {
            return Ok(Verdict::new(ILLOGICAL, "{We} can't balance a thing on itself."));
        }
        if !game.world.is_a(&s, "supporter") {
            return Ok(Verdict::new(ILLOGICAL, "There's no room on top of that."));
        }
        Ok(Verdict::logical())
    });
    adorn::hint_dobj_not_held(game, "put_on");

    game.before_rule("put_on", "checks", |game, action| {
        let o = dobj(action);
        let s = iobj(action);
        let actor = game.world.actor();
        if queries::contains(&game.world, &o, &s) {
            return Err(abort_action(
                "{We} can't put a thing on something it contains.",
            ));
        }
        if !adorn::is_held(&game.world, &o, &actor, false) {
            return Err(abort_action("{We} {aren't|bob} holding that."));
        }
        Ok(())
    });

    game.carry_out_rule("put_on", "move-onto", |game, action| {
        let o = dobj(action);
        let s = iobj(action);
        game.world.relate(&o, &s, LocTag::SupportedBy)
    });
    game.report_rule("put_on", "report", |game, action| {
        game.world.write("{We} {put|bob} ")?;
        let o = dobj(action);
        fathom_world::prose::the(&mut game.world, &o)?;
        game.world.write(" on ")?;
        let s = iobj(action);
        fathom_world::prose::the(&mut game.world, &s)?;
        game.world.write(".")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn open(game: &mut Game) -> Result<()> {
    game.verb("open", "opening");
    game.understand("open [something o]", |caps| {
        Action::new("open").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "open");
    game.verify_rule("open", "openable", |game, action| {
        let o = dobj(action);
        if !game.world.bool_prop("openable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That's not something {we} can open."));
        }
        if game.world.bool_prop("open", &o)? {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "It's already open."));
        }
        Ok(Verdict::logical())
    });

    game.before_rule("open", "not-locked", |game, action| {
        let o = dobj(action);
        if game.world.bool_prop("locked", &o)? {
            return Err(abort_action("It seems to be locked."));
        }
        Ok(())
    });

    game.carry_out_rule("open", "set-open", |game, action| {
        let o = dobj(action);
        game.world.set("open", &[Value::Id(o)], true);
        Ok(())
    });
    game.report_rule("open", "report", |game, _| report(game, "Opened."));
    Ok(())
}

fn close(game: &mut Game) -> Result<()> {
    game.verb("close", "closing");
    game.understand("close/shut [something o]", |caps| {
        Action::new("close").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "close");
    game.verify_rule("close", "closeable", |game, action| {
        let o = dobj(action);
        if !game.world.bool_prop("openable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That's not something {we} can close."));
        }
        if !game.world.bool_prop("open", &o)? {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "It's already closed."));
        }
        Ok(Verdict::logical())
    });

    game.carry_out_rule("close", "set-closed", |game, action| {
        let o = dobj(action);
        game.world.set("open", &[Value::Id(o)], false);
        Ok(())
    });
    game.report_rule("close", "report", |game, _| report(game, "Closed."));
    Ok(())
}

fn lock(game: &mut Game) -> Result<()> {
    game.verb_with_prep("lock", "locking", "with");
    game.understand("lock [something o] with [something k]", |caps| {
        Action::new("lock")
            .with_dobj(caps.obj("o").expect("captured o"))
            .with_iobj(caps.obj("k").expect("captured k"))
    })?;
    game.understand("lock [something o]", |caps| {
        Action::new("lock").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "lock");
    adorn::require_iobj_held(
        game,
        "lock",
        HeldOpts {
            only_hint: true,
            transitive: false,
        },
    );
    adorn::hint_iobj_not_held(game, "lock");
    game.verify_rule("lock", "lockable", |game, action| {
        let o = dobj(action);
        if !game.world.bool_prop("lockable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That doesn't seem to lock."));
        }
        if game.world.bool_prop("locked", &o)? {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "It's already locked."));
        }
        Ok(Verdict::logical())
    });

    game.before_rule("lock", "key-fits", |game, action| {
        let o = dobj(action);
        let Some(key) = action.iobj.clone() else {
            return Err(abort_action("{We} {need|bob} something to lock it with."));
        };
        if game.world.id_prop("matching_key", &o)? != Some(key) {
            return Err(abort_action("It doesn't fit."));
        }
        if game.world.bool_prop("open", &o)? {
            return Err(abort_action("It would have to be closed first."));
        }
        Ok(())
    });

    game.carry_out_rule("lock", "set-locked", |game, action| {
        let o = dobj(action);
        game.world.set("locked", &[Value::Id(o)], true);
        Ok(())
    });
    game.report_rule("lock", "report", |game, _| report(game, "Locked."));
    Ok(())
}

fn unlock(game: &mut Game) -> Result<()> {
    game.verb_with_prep("unlock", "unlocking", "with");
    game.understand("unlock [something o] with [something k]", |caps| {
        Action::new("unlock")
            .with_dobj(caps.obj("o").expect("captured o"))
            .with_iobj(caps.obj("k").expect("captured k"))
    })?;
    game.understand("unlock [something o]", |caps| {
        Action::new("unlock").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "unlock");
    adorn::require_iobj_held(
        game,
        "unlock",
        HeldOpts {
            only_hint: true,
            transitive: false,
        },
    );
    adorn::hint_iobj_not_held(game, "unlock");
    game.verify_rule("unlock", "locked", |game, action| {
        let o = dobj(action);
        if !game.world.bool_prop("lockable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That doesn't seem to lock."));
        }
        if !game.world.bool_prop("locked", &o)? {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "It's already unlocked."));
        }
        Ok(Verdict::logical())
    });

    game.before_rule("unlock", "key-fits", |game, action| {
        let o = dobj(action);
        let Some(key) = action.iobj.clone() else {
            return Err(abort_action("{We} {need|bob} something to unlock it with."));
        };
        if game.world.id_prop("matching_key", &o)? != Some(key) {
            return Err(abort_action("It doesn't fit."));
        }
        Ok(())
    });

    game.carry_out_rule("unlock", "set-unlocked", |game, action| {
        let o = dobj(action);
        game.world.set("locked", &[Value::Id(o)], false);
        Ok(())
    });
    game.report_rule("unlock", "report", |game, _| report(game, "Unlocked."));
    Ok(())
}

fn wear(game: &mut Game) -> Result<()> {
    game.verb("wear", "wearing");
    game.understand("wear [something o]", |caps| {
        Action::new("wear").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("put on [something o]", |caps| {
        Action::new("wear").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "wear");
    game.verify_rule("wear", "wearable", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        if !game.world.bool_prop("wearable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "{We} can't wear that."));
        }
        if matches!(game.world.location(&o), Some((dest, LocTag::WornBy)) if dest == &actor) {
            return Ok(Verdict::new(
                ILLOGICAL_ALREADY,
                "{We} {are|bob} already wearing that.",
            ));
        }
        Ok(Verdict::logical())
    });
    adorn::hint_dobj_not_held(game, "wear");

    game.before_rule("wear", "must-hold", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        if adorn::is_held(&game.world, &o, &actor, false) {
            Ok(())
        } else {
            Err(abort_action("{We} {aren't|bob} holding that."))
        }
    });

    game.carry_out_rule("wear", "don", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        game.world.relate(&o, &actor, LocTag::WornBy)
    });
    game.report_rule("wear", "report", |game, action| {
        report_dobj(game, action, "{We} {put|bob} on ", ".")
    });
    Ok(())
}

fn remove(game: &mut Game) -> Result<()> {
    game.verb("remove", "taking off");
    game.understand("remove [something o]", |caps| {
        Action::new("remove").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("take off [something o]", |caps| {
        Action::new("remove").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("take [something o] off", |caps| {
        Action::new("remove").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    game.verify_rule("remove", "worn", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        if matches!(game.world.location(&o), Some((dest, LocTag::WornBy)) if dest == &actor) {
            Ok(Verdict::logical())
        } else {
            Ok(Verdict::new(
                ILLOGICAL_ALREADY,
                "{We} {aren't|bob} wearing that.",
            ))
        }
    });

    game.carry_out_rule("remove", "doff", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        game.world.relate(&o, &actor, LocTag::OwnedBy)
    });
    game.report_rule("remove", "report", |game, action| {
        report_dobj(game, action, "{We} {take|bob} off ", ".")
    });
    Ok(())
}

fn switching(game: &mut Game) -> Result<()> {
    game.verb("switch_on", "switching on");
    game.verb("switch_off", "switching off");
    for pattern in [
        "switch/turn on [something o]",
        "switch/turn [something o] on",
    ] {
        game.understand(pattern, |caps| {
            Action::new("switch_on").with_dobj(caps.obj("o").expect("captured o"))
        })?;
    }
    for pattern in [
        "switch/turn off [something o]",
        "switch/turn [something o] off",
    ] {
        game.understand(pattern, |caps| {
            Action::new("switch_off").with_dobj(caps.obj("o").expect("captured o"))
        })?;
    }

    for verb in ["switch_on", "switch_off"] {
        adorn::require_dobj_accessible(game, verb);
    }
    game.verify_rule("switch_on", "switchable", |game, action| {
        let o = dobj(action);
        if !game.world.bool_prop("switchable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That isn't something {we} can switch."));
        }
        if game.world.bool_prop("switched_on", &o)? {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "It's already on."));
        }
        Ok(Verdict::logical())
    });
    game.verify_rule("switch_off", "switchable", |game, action| {
        let o = dobj(action);
        if !game.world.bool_prop("switchable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That isn't something {we} can switch."));
        }
        if !game.world.bool_prop("switched_on", &o)? {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "It's already off."));
        }
        Ok(Verdict::logical())
    });

    game.carry_out_rule("switch_on", "set-on", |game, action| {
        let o = dobj(action);
        game.world.set("switched_on", &[Value::Id(o)], true);
        Ok(())
    });
    game.carry_out_rule("switch_off", "set-off", |game, action| {
        let o = dobj(action);
        game.world.set("switched_on", &[Value::Id(o)], false);
        Ok(())
    });
    game.report_rule("switch_on", "report", |game, action| {
        report_dobj(game, action, "{We} {switch|bob} ", " on.")
    });
    game.report_rule("switch_off", "report", |game, action| {
        report_dobj(game, action, "{We} {switch|bob} ", " off.")
    });
    Ok(())
}

fn use_verb(game: &mut Game) -> Result<()> {
    game.verb("use", "using");
    game.understand("use [something o]", |caps| {
        Action::new("use").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    adorn::require_dobj_visible(game, "use");
    game.report_rule("use", "report", |game, _| {
        report(game, "{We}'ll have to say how.")
    });
    Ok(())
}

fn eat(game: &mut Game) -> Result<()> {
    game.verb("eat", "eating");
    game.understand("eat [something o]", |caps| {
        Action::new("eat").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "eat");
    game.verify_rule("eat", "edible", |game, action| {
        let o = dobj(action);
        if game.world.bool_prop("edible", &o)? {
            Ok(Verdict::logical())
        } else {
            Ok(Verdict::new(ILLOGICAL, "That's plainly inedible."))
        }
    });
    adorn::hint_dobj_not_held(game, "eat");

    game.before_rule("eat", "must-hold", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        if adorn::is_held(&game.world, &o, &actor, false) {
            Ok(())
        } else {
            Err(abort_action("{We} {aren't|bob} holding that."))
        }
    });

    game.carry_out_rule("eat", "consume", |game, action| {
        let o = dobj(action);
        game.world.remove_obj(&o);
        Ok(())
    });
    game.report_rule("eat", "report", |game, action| {
        report_dobj(game, action, "{We} {eat|bob} ", ". Not bad.")
    });
    Ok(())
}
