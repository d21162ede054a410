//! look, look <direction>, examine, inventory, help.

use fathom_foundation::{Result, Value};
use fathom_parser::Action;
use fathom_world::{prose, queries};

use crate::adorn;
use crate::game::Game;

pub(super) fn install(game: &mut Game) -> Result<()> {
    look(game)?;
    look_direction(game)?;
    examine(game)?;
    inventory(game)?;
    help(game)?;
    Ok(())
}

fn look(game: &mut Game) -> Result<()> {
    game.verb("look", "looking");
    game.understand("look/l", |_| Action::new("look"))?;

    game.carry_out_rule("look", "mark-visited", |game, _| {
        let actor = game.world.actor();
        let scene = queries::visible_container(&mut game.world, &actor)?;
        if game.world.is_a(&scene, "room") && queries::contains_light(&mut game.world, &scene)? {
            game.world
                .set("visited", &[Value::Id(scene), Value::Id(actor)], true);
        }
        Ok(())
    });
    game.report_rule("look", "report", |game, _| {
        // In darkness this renders the Darkness scene and leaves
        // `visited` untouched.
        game.render_scene(false)
    });
    Ok(())
}

fn look_direction(game: &mut Game) -> Result<()> {
    game.verb("look_dir", "looking");
    game.understand("look [direction d]", |caps| {
        let mut action = Action::new("look_dir");
        if let Some(dir) = caps.direction("d") {
            action = action.with_direction(dir);
        }
        action
    })?;

    game.report_rule("look_dir", "report", |game, action| {
        let Some(dir) = action.direction else {
            return Ok(());
        };
        let actor = game.world.actor();
        let Some(room) = queries::room_of(&game.world, &actor) else {
            game.world.write("{We} {see|bob} very little from in here.")?;
            game.world.para();
            return Ok(());
        };
        match game.world.exit(&room, dir).cloned() {
            Some(target) if game.world.is_a(&target, "door") => {
                world_sentence(game, "That way is ", &target)
            }
            Some(target) => {
                let known = game.world.bool_prop2("known", &target, &actor)?;
                if known {
                    world_sentence(game, "That way lies ", &target)
                } else {
                    plain(game, "{We} can't make out what lies that way.")
                }
            }
            None => plain(game, "There is no way in that direction."),
        }
    });
    Ok(())
}

fn world_sentence(game: &mut Game, intro: &str, o: &fathom_foundation::Id) -> Result<()> {
    game.world.write(intro)?;
    prose::the(&mut game.world, o)?;
    game.world.write(".")?;
    game.world.para();
    Ok(())
}

fn plain(game: &mut Game, template: &str) -> Result<()> {
    game.world.write(template)?;
    game.world.para();
    Ok(())
}

fn examine(game: &mut Game) -> Result<()> {
    game.verb("examine", "examining");
    game.understand("examine/x [something o]", |caps| {
        Action::new("examine").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("look at [something o]", |caps| {
        Action::new("examine").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    adorn::require_dobj_visible(game, "examine");

    game.report_rule("examine", "report", |game, action| {
        let Some(dobj) = action.dobj.clone() else {
            return Ok(());
        };
        game.world
            .run_activity("describe_object", vec![Value::Id(dobj)])?;
        Ok(())
    });
    Ok(())
}

fn inventory(game: &mut Game) -> Result<()> {
    game.verb("inventory", "taking inventory");
    game.understand("inventory/i/inv", |_| Action::new("inventory"))?;

    game.report_rule("inventory", "report", |game, _| {
        game.world.run_activity("describe_inventory", vec![])?;
        Ok(())
    });
    Ok(())
}

fn help(game: &mut Game) -> Result<()> {
    game.verb("help", "asking for help");
    game.understand("help", |_| Action::new("help"))?;

    game.report_rule("help", "report", |game, _| {
        plain(
            game,
            "Commands are plain English: look, examine something, take and \
             drop things, put them in or on other things, open and close, \
             lock and unlock with keys, wear and remove, switch things on \
             and off, and go by compass direction (n, s, e, w and friends). \
             'i' shows what you carry.",
        )
    });
    Ok(())
}
