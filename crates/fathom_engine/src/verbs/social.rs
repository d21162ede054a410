//! wait, jump, sing, laugh, greet, ask about, attack.

use fathom_foundation::{Id, Result};
use fathom_parser::Action;
use fathom_world::prose;

use crate::adorn;
use crate::game::Game;
use crate::score::{Verdict, ILLOGICAL};

pub(super) fn install(game: &mut Game) -> Result<()> {
    canned(game, "wait", "waiting", "wait/z", "Time passes.")?;
    canned(game, "jump", "jumping", "jump", "{We} {jump|bob} on the spot.")?;
    canned(game, "sing", "singing", "sing", "{We} {sing|bob} a few notes.")?;
    canned(game, "laugh", "laughing", "laugh", "{We} {laugh|bob}.")?;
    greet(game)?;
    ask_about(game)?;
    attack(game)?;
    Ok(())
}

fn canned(
    game: &mut Game,
    verb: &str,
    gerund: &str,
    pattern: &str,
    message: &'static str,
) -> Result<()> {
    game.verb(verb, gerund);
    let verb_owned = verb.to_string();
    game.understand(pattern, move |_| Action::new(verb_owned.as_str()))?;
    game.report_rule(verb, "report", move |game, _| {
        game.world.write(message)?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn dobj(action: &Action) -> Id {
    action.dobj.clone().expect("grammar captured a direct object")
}

fn require_person(game: &mut Game, verb: &str) {
    game.verify_rule(verb, "person-only", |game, action| {
        let o = dobj(action);
        if game.world.is_a(&o, "person") {
            Ok(Verdict::logical())
        } else {
            Ok(Verdict::new(
                ILLOGICAL,
                "Talking to that would get {us} nowhere.",
            ))
        }
    });
}

fn greet(game: &mut Game) -> Result<()> {
    game.verb("greet", "greeting");
    game.understand("greet/hello [something o]", |caps| {
        Action::new("greet").with_dobj(caps.obj("o").expect("captured o"))
    })?;
    game.understand("say hello to [something o]", |caps| {
        Action::new("greet").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_visible(game, "greet");
    require_person(game, "greet");

    game.report_rule("greet", "report", |game, action| {
        let o = dobj(action);
        prose::the_cap(&mut game.world, &o)?;
        game.world.write(" nods politely.")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn ask_about(game: &mut Game) -> Result<()> {
    game.verb("ask_about", "asking");
    game.understand("ask [something o] about [text topic]", |caps| {
        let mut action = Action::new("ask_about").with_dobj(caps.obj("o").expect("captured o"));
        if let Some(topic) = caps.text("topic") {
            action = action.with_text(topic);
        }
        action
    })?;

    adorn::require_dobj_visible(game, "ask_about");
    require_person(game, "ask_about");

    game.report_rule("ask_about", "report", |game, action| {
        let o = dobj(action);
        prose::the_cap(&mut game.world, &o)?;
        game.world.write(" has nothing to say about that.")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}

fn attack(game: &mut Game) -> Result<()> {
    game.verb("attack", "attacking");
    game.understand("attack/hit/kill [something o]", |caps| {
        Action::new("attack").with_dobj(caps.obj("o").expect("captured o"))
    })?;

    adorn::require_dobj_accessible(game, "attack");
    game.report_rule("attack", "report", |game, _| {
        game.world.write("Violence isn't the answer to this one.")?;
        game.world.para();
        Ok(())
    });
    Ok(())
}
