//! go, go to, enter, exit, get off, climb.

use std::collections::{HashSet, VecDeque};

use fathom_foundation::{Id, Result};
use fathom_parser::Action;
use fathom_world::{queries, Direction, LocTag, World};

use crate::adorn;
use crate::game::Game;
use crate::pipeline::{abort_action, do_first, perform};
use crate::score::{Verdict, ILLOGICAL, ILLOGICAL_ALREADY};

pub(super) fn install(game: &mut Game) -> Result<()> {
    go(game)?;
    go_to(game)?;
    enter(game)?;
    exit_verb(game)?;
    get_off(game)?;
    climb(game)?;
    Ok(())
}

fn dobj(action: &Action) -> Id {
    action.dobj.clone().expect("grammar captured a direct object")
}

/// The door (if any) and the destination room of an exit.
fn resolve_exit(world: &World, room: &Id, dir: Direction) -> Option<(Option<Id>, Id)> {
    let target = world.exit(room, dir)?.clone();
    if world.is_a(&target, "door") {
        let dest = world.data.exits.door_other_side_from(&target, room)?.clone();
        Some((Some(target), dest))
    } else {
        Some((None, target))
    }
}

fn go(game: &mut Game) -> Result<()> {
    game.verb("go", "going");
    game.understand("go/walk [direction d]", |caps| {
        let mut action = Action::new("go");
        if let Some(dir) = caps.direction("d") {
            action = action.with_direction(dir);
        }
        action
    })?;
    game.understand("[direction d]", |caps| {
        let mut action = Action::new("go");
        if let Some(dir) = caps.direction("d") {
            action = action.with_direction(dir);
        }
        action
    })?;

    game.verify_rule("go", "way-exists", |game, action| {
        let Some(dir) = action.direction else {
            return Ok(Verdict::new(ILLOGICAL, "Which way?"));
        };
        let actor = game.world.actor();
        let Some(room) = queries::room_of(&game.world, &actor) else {
            return Ok(Verdict::new(ILLOGICAL, "{We}'ll have to get out first."));
        };
        if queries::effective_container(&mut game.world, &actor)? != room {
            return Ok(Verdict::new(ILLOGICAL, "{We}'ll have to get out first."));
        }
        if game.world.exit(&room, dir).is_none() {
            return Ok(Verdict::new(ILLOGICAL, "{We} can't go that way."));
        }
        Ok(Verdict::logical())
    });

    game.try_before_rule("go", "auto-open-door", |game, action| {
        let Some(dir) = action.direction else {
            return Ok(());
        };
        let actor = game.world.actor();
        let Some(room) = queries::room_of(&game.world, &actor) else {
            return Ok(());
        };
        if let Some((Some(door), _)) = resolve_exit(&game.world, &room, dir) {
            if game.world.bool_prop("openable", &door)? && !game.world.bool_prop("open", &door)? {
                do_first(game, Action::new("open").with_dobj(door))?;
            }
        }
        Ok(())
    });

    game.before_rule("go", "door-open", |game, action| {
        let Some(dir) = action.direction else {
            return Ok(());
        };
        let actor = game.world.actor();
        let Some(room) = queries::room_of(&game.world, &actor) else {
            return Ok(());
        };
        if let Some((Some(door), _)) = resolve_exit(&game.world, &room, dir) {
            if game.world.bool_prop("openable", &door)? && !game.world.bool_prop("open", &door)? {
                return Err(abort_action("The way is shut."));
            }
        }
        Ok(())
    });

    game.carry_out_rule("go", "move", |game, action| {
        let Some(dir) = action.direction else {
            return Ok(());
        };
        let actor = game.world.actor();
        let Some(room) = queries::room_of(&game.world, &actor) else {
            return Ok(());
        };
        if let Some((_, dest)) = resolve_exit(&game.world, &room, dir) {
            game.world.relate(&actor, &dest, LocTag::ContainedBy)?;
        }
        Ok(())
    });
    // No report: the turn hook re-renders the scene on arrival.
    Ok(())
}

/// Breadth-first route over the exit relation, doors collapsed to
/// their far rooms.
fn find_path(world: &World, from: &Id, to: &Id) -> Option<Vec<Direction>> {
    let mut seen: HashSet<Id> = HashSet::new();
    let mut queue: VecDeque<(Id, Vec<Direction>)> = VecDeque::new();
    seen.insert(from.clone());
    queue.push_back((from.clone(), Vec::new()));

    while let Some((room, path)) = queue.pop_front() {
        if &room == to {
            return Some(path);
        }
        for exit in world.exits(&room) {
            let Some((_, dest)) = resolve_exit(world, &room, exit.dir) else {
                continue;
            };
            if seen.insert(dest.clone()) {
                let mut next = path.clone();
                next.push(exit.dir);
                queue.push_back((dest, next));
            }
        }
    }
    None
}

fn go_to(game: &mut Game) -> Result<()> {
    game.verb("go_to", "going");
    game.understand("go to [somewhere r]", |caps| {
        let mut action = Action::new("go_to");
        if let Some(room) = caps.obj("r") {
            action = action.with_room(room);
        }
        action
    })?;

    game.verify_rule("go_to", "somewhere-else", |game, action| {
        let Some(target) = action.room.clone() else {
            return Ok(Verdict::new(ILLOGICAL, "Where exactly?"));
        };
        let actor = game.world.actor();
        if queries::room_of(&game.world, &actor).as_ref() == Some(&target) {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "{We} {are|bob} already there."));
        }
        Ok(Verdict::logical())
    });

    game.try_before_rule("go_to", "walk-the-route", |game, action| {
        let Some(target) = action.room.clone() else {
            return Ok(());
        };
        let actor = game.world.actor();
        let Some(start) = queries::room_of(&game.world, &actor) else {
            return Err(abort_action("{We}'ll have to get out first."));
        };
        let Some(path) = find_path(&game.world, &start, &target) else {
            return Err(abort_action("{We} {know|bob} no way there."));
        };
        for dir in path {
            // Each leg is a full go action, silently: doors still open
            // themselves through go's own try_before.
            if !perform(game, Action::new("go").with_direction(dir), true)? {
                return Err(abort_action("The way seems blocked."));
            }
        }
        Ok(())
    });

    game.before_rule("go_to", "arrived", |game, action| {
        let Some(target) = action.room.clone() else {
            return Ok(());
        };
        let actor = game.world.actor();
        if queries::room_of(&game.world, &actor).as_ref() == Some(&target) {
            Ok(())
        } else {
            Err(abort_action("{We} can't find the way."))
        }
    });
    // carry_out and report stay empty: movement already happened and
    // the turn hook renders the destination.
    Ok(())
}

fn enter(game: &mut Game) -> Result<()> {
    game.verb("enter", "entering");
    game.understand("enter [something o]", |caps| {
        Action::new("enter").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("get/sit in/into/on/onto [something o]", |caps| {
        Action::new("enter").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "enter");
    game.verify_rule("enter", "enterable", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        if !game.world.bool_prop("enterable", &o)? {
            return Ok(Verdict::new(ILLOGICAL, "That's not something {we} can get into."));
        }
        if matches!(game.world.location(&actor), Some((dest, _)) if dest == &o) {
            return Ok(Verdict::new(ILLOGICAL_ALREADY, "{We} {are|bob} already in it."));
        }
        Ok(Verdict::logical())
    });

    game.try_before_rule("enter", "auto-open", |game, action| {
        let o = dobj(action);
        if game.world.is_a(&o, "container")
            && game.world.bool_prop("openable", &o)?
            && !game.world.bool_prop("open", &o)?
        {
            do_first(game, Action::new("open").with_dobj(o))?;
        }
        Ok(())
    });

    game.carry_out_rule("enter", "climb-in", |game, action| {
        let o = dobj(action);
        let actor = game.world.actor();
        let tag = if game.world.is_a(&o, "supporter") {
            LocTag::SupportedBy
        } else {
            LocTag::ContainedBy
        };
        game.world.relate(&actor, &o, tag)
    });
    game.report_rule("enter", "report", |game, action| {
        let o = dobj(action);
        let preposition = if game.world.is_a(&o, "supporter") {
            " onto "
        } else {
            " into "
        };
        game.world.write("{We} {get|bob}")?;
        game.world.write(preposition)?;
        fathom_world::prose::the(&mut game.world, &o)?;
        game.world.write(".")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn exit_verb(game: &mut Game) -> Result<()> {
    game.verb("exit", "getting out");
    game.understand("exit/leave", |_| Action::new("exit"))?;
    game.understand("get out", |_| Action::new("exit"))?;

    game.verify_rule("exit", "inside-something", |game, _| {
        let actor = game.world.actor();
        match game.world.location(&actor) {
            Some((dest, _)) if !game.world.is_a(dest, "room") => Ok(Verdict::logical()),
            _ => Ok(Verdict::new(ILLOGICAL, "But {we} {aren't|bob} in anything.")),
        }
    });

    game.try_before_rule("exit", "auto-open", |game, _| {
        let actor = game.world.actor();
        let Some((enclosure, _)) = game.world.location(&actor) else {
            return Ok(());
        };
        let enclosure = enclosure.clone();
        if game.world.is_a(&enclosure, "container")
            && game.world.bool_prop("openable", &enclosure)?
            && !game.world.bool_prop("open", &enclosure)?
        {
            do_first(game, Action::new("open").with_dobj(enclosure))?;
        }
        Ok(())
    });

    game.carry_out_rule("exit", "climb-out", |game, _| {
        let actor = game.world.actor();
        let Some((enclosure, _)) = game.world.location(&actor) else {
            return Ok(());
        };
        let enclosure = enclosure.clone();
        match game.world.location(&enclosure) {
            Some((dest, tag)) => {
                let dest = dest.clone();
                let tag = if tag == LocTag::SupportedBy {
                    LocTag::SupportedBy
                } else {
                    LocTag::ContainedBy
                };
                game.world.relate(&actor, &dest, tag)
            }
            None => Ok(()),
        }
    });
    game.report_rule("exit", "report", |game, _| {
        game.world.write("{We} {get|bob} out.")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn get_off(game: &mut Game) -> Result<()> {
    game.verb("get_off", "getting off");
    game.understand("get off", |_| Action::new("get_off"))?;
    game.understand("get off [something o]", |caps| {
        Action::new("get_off").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    game.verify_rule("get_off", "on-something", |game, _| {
        let actor = game.world.actor();
        match game.world.location(&actor) {
            Some((_, LocTag::SupportedBy)) => Ok(Verdict::logical()),
            _ => Ok(Verdict::new(ILLOGICAL, "But {we} {aren't|bob} on anything.")),
        }
    });

    game.carry_out_rule("get_off", "climb-down", |game, _| {
        let actor = game.world.actor();
        let Some((perch, _)) = game.world.location(&actor) else {
            return Ok(());
        };
        let perch = perch.clone();
        match game.world.location(&perch) {
            Some((dest, _)) => {
                let dest = dest.clone();
                game.world.relate(&actor, &dest, LocTag::ContainedBy)
            }
            None => Ok(()),
        }
    });
    game.report_rule("get_off", "report", |game, _| {
        game.world.write("{We} {get|bob} down.")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn climb(game: &mut Game) -> Result<()> {
    game.verb("climb", "climbing");
    game.understand("climb [something o]", |caps| {
        Action::new("climb").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    adorn::require_dobj_visible(game, "climb");
    game.report_rule("climb", "report", |game, _| {
        game.world
            .write("Little is to be gained by climbing that.")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}
