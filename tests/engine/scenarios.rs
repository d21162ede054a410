//! The core play scenarios, input line to observable effect.

use fathom_dispatch::Method;
use fathom_foundation::{Id, Value};
use fathom_world::{Direction, LocTag, World};

use crate::{lobby_game, obj, place_of};

#[test]
fn take_ball() {
    let mut game = lobby_game();
    game.submit("take ball");

    assert!(game.take_output().contains("Taken."));
    assert_eq!(
        place_of(&game, "ball"),
        Some((Id::from("player"), LocTag::OwnedBy))
    );
}

#[test]
fn take_then_drop_ball() {
    let mut game = lobby_game();
    game.submit("take ball");
    game.take_output();

    game.submit("drop ball");
    assert!(game.take_output().contains("Dropped."));
    assert_eq!(
        place_of(&game, "ball"),
        Some((Id::from("lobby"), LocTag::ContainedBy))
    );
}

#[test]
fn put_ball_in_closed_box_opens_and_takes_first() {
    let mut game = lobby_game();
    game.world.create("cardboard-box", "container").unwrap();
    game.world.set("openable", &[obj("cardboard-box")], true);
    game.world
        .relate(
            &Id::from("cardboard-box"),
            &Id::from("lobby"),
            LocTag::ContainedBy,
        )
        .unwrap();

    game.submit("put ball in box");
    let out = game.take_output();

    let open_at = out
        .find("(first opening the cardboard box)")
        .expect("implicit open");
    let take_at = out.find("(first taking the ball)").expect("implicit take");
    assert!(open_at < take_at, "open comes before take:\n{out}");
    assert!(out.contains("You put the ball into the cardboard box."));

    assert_eq!(
        place_of(&game, "ball"),
        Some((Id::from("cardboard-box"), LocTag::ContainedBy))
    );
    assert!(game
        .world
        .bool_prop("open", &Id::from("cardboard-box"))
        .unwrap());
}

#[test]
fn two_red_balls_ask_a_menu() {
    let mut game = lobby_game();
    game.world.set("name", &[obj("ball")], "small red ball");
    game.world.create("big-ball", "thing").unwrap();
    game.world.set("name", &[obj("big-ball")], "big red ball");
    game.world
        .relate(&Id::from("big-ball"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();

    game.submit("take red ball");
    let out = game.take_output();

    let menu = game.pending_menu().expect("a menu is pending");
    assert_eq!(menu.options.len(), 2);
    assert!(out.contains("1)"));
    assert!(out.contains("2)"));

    // Picking by number resolves it.
    game.submit("1");
    assert!(game.take_output().contains("Taken."));
    assert!(game.pending_menu().is_none());
}

#[test]
fn menu_line_can_be_a_fresh_command() {
    let mut game = lobby_game();
    game.world.set("name", &[obj("ball")], "small red ball");
    game.world.create("big-ball", "thing").unwrap();
    game.world.set("name", &[obj("big-ball")], "big red ball");
    game.world
        .relate(&Id::from("big-ball"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();

    game.submit("take red ball");
    game.take_output();

    game.submit("wait");
    assert!(game.take_output().contains("Time passes."));
    assert!(game.pending_menu().is_none());
}

#[test]
fn going_north_through_closed_door() {
    let mut game = lobby_game();
    let w = &mut game.world;
    w.create("hall", "room").unwrap();
    w.set("makes_light", &[obj("hall")], true);
    w.create("plain-door", "door").unwrap();
    w.set("openable", &[obj("plain-door")], true);
    w.place_door(
        &Id::from("plain-door"),
        &Id::from("lobby"),
        Direction::North,
        &Id::from("hall"),
    )
    .unwrap();

    game.submit("n");
    let out = game.take_output();

    assert!(out.contains("(first opening the plain door)"), "{out}");
    assert!(out.contains("Hall"), "arrival renders the hall:\n{out}");
    assert_eq!(
        place_of(&game, "player"),
        Some((Id::from("hall"), LocTag::ContainedBy))
    );
    assert!(game
        .world
        .bool_prop2("visited", &Id::from("hall"), &Id::from("player"))
        .unwrap());
}

#[test]
fn look_in_the_dark() {
    let mut game = fathom_engine::Game::new();
    let w = &mut game.world;
    w.create("hall", "room").unwrap();
    w.create("player", "person").unwrap();
    w.set_player(&Id::from("player"));
    w.relate(&Id::from("player"), &Id::from("hall"), LocTag::ContainedBy)
        .unwrap();

    game.submit("l");
    let out = game.take_output();

    assert!(out.contains("Darkness"));
    assert!(out.contains("pitch dark"));
    assert!(!game
        .world
        .bool_prop2("visited", &Id::from("hall"), &Id::from("player"))
        .unwrap());
}

#[test]
fn switching_off_the_only_light_darkens_the_scene() {
    let mut game = lobby_game();
    game.world.set("makes_light", &[obj("lobby")], false);
    game.world.create("lamp", "thing").unwrap();
    game.world.set("switchable", &[obj("lamp")], true);
    game.world.set("switched_on", &[obj("lamp")], true);
    // The lamp sheds light while switched on.
    game.world.add_prop_rule(
        "makes_light",
        Method::guarded(
            "lamp-glows",
            |_: &World, args: &Vec<Value>| args.first() == Some(&Value::Id(Id::from("lamp"))),
            |w: &mut World, _, _| Ok(Value::Bool(w.bool_prop("switched_on", &Id::from("lamp"))?)),
        ),
    );
    game.world
        .relate(&Id::from("lamp"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();

    game.submit("turn off lamp");
    let out = game.take_output();
    assert!(out.contains("You switch the lamp off."), "{out}");
    assert!(out.contains("Darkness"), "scene change renders darkness:\n{out}");

    game.submit("l");
    assert!(game.take_output().contains("pitch dark"));
}

#[test]
fn same_action_same_mutations_on_a_fresh_clone() {
    let build = || {
        let mut game = lobby_game();
        game.world.create("chest", "container").unwrap();
        game.world.set("openable", &[obj("chest")], true);
        game.world
            .relate(&Id::from("chest"), &Id::from("lobby"), LocTag::ContainedBy)
            .unwrap();
        game
    };

    let mut first = build();
    first.submit("put ball in chest");
    let after_first = first.world.data.clone();

    let mut second = build();
    second.submit("put ball in chest");

    assert_eq!(after_first, second.world.data);
}

#[test]
fn unknown_word_is_named() {
    let mut game = lobby_game();
    game.submit("take quux");
    assert!(game
        .take_output()
        .contains("I don't know what you mean by 'quux'."));
}

#[test]
fn known_words_in_no_order_get_the_generic_reply() {
    let mut game = lobby_game();
    game.submit("ball take");
    assert!(game.take_output().contains("I don't understand what you mean."));
}

#[test]
fn internal_faults_are_contained() {
    let mut game = lobby_game();
    game.understand("crash", |_| fathom_parser::Action::new("crash"))
        .unwrap();
    game.carry_out_rule("crash", "boom", |_, _| {
        Err(fathom_foundation::Error::internal("deliberate"))
    });

    game.submit("crash");
    assert!(game.take_output().contains("[Internal error]"));

    // The loop survives.
    game.submit("take ball");
    assert!(game.take_output().contains("Taken."));
}
