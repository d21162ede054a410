//! Disambiguation behavior driven through full turns.

use fathom_foundation::Id;
use fathom_world::LocTag;

use crate::{lobby_game, obj};

fn add_ball(game: &mut fathom_engine::Game, id: &str, name: &str) {
    game.world.create(id, "thing").unwrap();
    game.world.set("name", &[obj(id)], name);
    game.world
        .relate(&Id::from(id), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();
}

#[test]
fn exact_name_beats_partial_match() {
    let mut game = lobby_game();
    game.world.set("name", &[obj("ball")], "red ball");
    add_ball(&mut game, "big-ball", "big red ball");

    // "red ball" names the first ball exactly; the bonus point breaks
    // the tie without a menu.
    game.submit("take red ball");
    assert!(game.take_output().contains("Taken."));
    assert_eq!(
        game.world.location(&Id::from("ball")).map(|(d, _)| d.clone()),
        Some(Id::from("player"))
    );
}

#[test]
fn worse_verify_score_loses_silently() {
    let mut game = lobby_game();
    game.world.set("name", &[obj("ball")], "red ball");
    add_ball(&mut game, "held-ball", "red marble");
    game.world
        .relate(&Id::from("held-ball"), &Id::from("player"), LocTag::OwnedBy)
        .unwrap();

    // Both answer to "red", but taking the held one is illogical, so
    // the floor ball wins without a question.
    game.submit("take red");
    assert!(game.take_output().contains("Taken."));
    assert_eq!(
        game.world.location(&Id::from("ball")).map(|(d, _)| d.clone()),
        Some(Id::from("player"))
    );
}

#[test]
fn all_unreasonable_shows_the_worst_reason() {
    let mut game = lobby_game();
    game.submit("take ball");
    game.take_output();

    // Only reading: taking what is already carried.
    game.submit("take ball");
    assert!(game.take_output().contains("You already have that."));
}

#[test]
fn menu_overflow_reports_and_continues() {
    let mut game = lobby_game();
    game.world.set("reported", &[obj("ball")], false);
    for i in 0..7 {
        add_ball(&mut game, &format!("marble-{i}"), "glass marble");
    }

    game.submit("take glass marble");
    let out = game.take_output();
    assert!(out.contains("too many"), "{out}");
    assert!(game.pending_menu().is_none());

    game.submit("wait");
    assert!(game.take_output().contains("Time passes."));
}

#[test]
fn invalid_menu_number_reprompts() {
    let mut game = lobby_game();
    game.world.set("name", &[obj("ball")], "red ball");
    add_ball(&mut game, "big-ball", "big red ball");

    game.submit("take red");
    game.take_output();
    assert!(game.pending_menu().is_some());

    game.submit("9");
    assert!(game.take_output().contains("That wasn't one of the choices."));
    assert!(game.pending_menu().is_none());
}

#[test]
fn author_mistake_beats_standard_parse() {
    let mut game = lobby_game();
    game.understand_mistake("take ball", "Better not; it bites.")
        .unwrap();

    game.submit("take ball");
    let out = game.take_output();
    assert!(out.contains("Better not; it bites."));
    assert!(!out.contains("Taken."));
    assert!(game.world.location(&Id::from("ball")).is_some());
}
