//! Boundary cases around the pipeline and world queries.

use fathom_foundation::Id;
use fathom_world::{queries, LocTag};

use crate::{lobby_game, obj, place_of};

#[test]
fn taking_what_is_already_carried() {
    let mut game = lobby_game();
    game.submit("take ball");
    game.take_output();

    game.submit("take ball");
    assert!(game.take_output().contains("You already have that."));
    assert_eq!(
        place_of(&game, "ball"),
        Some((Id::from("player"), LocTag::OwnedBy))
    );
}

#[test]
fn opening_a_locked_chest() {
    let mut game = lobby_game();
    game.world.create("chest", "container").unwrap();
    game.world.set("openable", &[obj("chest")], true);
    game.world.set("lockable", &[obj("chest")], true);
    game.world.set("locked", &[obj("chest")], true);
    game.world
        .relate(&Id::from("chest"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();

    game.submit("open chest");
    assert!(game.take_output().contains("It seems to be locked."));
    assert!(!game.world.bool_prop("open", &Id::from("chest")).unwrap());
}

#[test]
fn unlocking_with_the_wrong_key() {
    let mut game = lobby_game();
    let w = &mut game.world;
    w.create("chest", "container").unwrap();
    w.set("openable", &[obj("chest")], true);
    w.set("lockable", &[obj("chest")], true);
    w.set("locked", &[obj("chest")], true);
    w.set("matching_key", &[obj("chest")], Id::from("iron-key"));
    w.create("iron-key", "thing").unwrap();
    w.create("bent-key", "thing").unwrap();
    w.relate(&Id::from("chest"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();
    w.relate(&Id::from("bent-key"), &Id::from("player"), LocTag::OwnedBy)
        .unwrap();
    w.relate(&Id::from("iron-key"), &Id::from("player"), LocTag::OwnedBy)
        .unwrap();

    game.submit("unlock chest with bent key");
    assert!(game.take_output().contains("It doesn't fit."));
    assert!(game.world.bool_prop("locked", &Id::from("chest")).unwrap());

    game.submit("unlock chest with iron key");
    assert!(game.take_output().contains("Unlocked."));
    assert!(!game.world.bool_prop("locked", &Id::from("chest")).unwrap());
}

#[test]
fn closed_container_contents_out_of_sight() {
    let mut game = lobby_game();
    let w = &mut game.world;
    w.create("crate", "container").unwrap();
    w.set("openable", &[obj("crate")], true);
    w.set("enterable", &[obj("crate")], true);
    w.relate(&Id::from("crate"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();
    w.create("coin", "thing").unwrap();
    w.relate(&Id::from("coin"), &Id::from("crate"), LocTag::ContainedBy)
        .unwrap();

    let player = Id::from("player");
    let coin = Id::from("coin");
    assert!(!queries::visible_to(&mut game.world, &coin, &player).unwrap());

    game.submit("look");
    let out = game.take_output();
    assert!(out.contains("a crate (which is closed)"));
    assert!(!out.contains("coin"));
}

#[test]
fn wear_and_remove_round_trip() {
    let mut game = lobby_game();
    game.world.create("wool-cloak", "thing").unwrap();
    game.world.set("wearable", &[obj("wool-cloak")], true);
    game.world
        .relate(&Id::from("wool-cloak"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();

    game.submit("wear cloak");
    let out = game.take_output();
    assert!(out.contains("(first taking the wool cloak)"));
    assert!(out.contains("You put on the wool cloak."));
    assert_eq!(
        place_of(&game, "wool-cloak"),
        Some((Id::from("player"), LocTag::WornBy))
    );

    game.submit("remove cloak");
    assert!(game.take_output().contains("You take off the wool cloak."));
    assert_eq!(
        place_of(&game, "wool-cloak"),
        Some((Id::from("player"), LocTag::OwnedBy))
    );
}

#[test]
fn eating_consumes() {
    let mut game = lobby_game();
    game.world.create("seed-cake", "thing").unwrap();
    game.world.set("edible", &[obj("seed-cake")], true);
    game.world
        .relate(&Id::from("seed-cake"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();

    game.submit("eat cake");
    let out = game.take_output();
    assert!(out.contains("You eat the seed cake."));
    assert_eq!(place_of(&game, "seed-cake"), None);
    // The id persists for re-placement.
    assert!(game.world.exists(&Id::from("seed-cake")));
}

#[test]
fn enter_and_exit_a_crate() {
    let mut game = lobby_game();
    game.world.create("crate", "container").unwrap();
    game.world.set("enterable", &[obj("crate")], true);
    game.world.set("opaque", &[obj("crate")], false);
    game.world
        .relate(&Id::from("crate"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();

    game.submit("enter crate");
    assert!(game.take_output().contains("You get into the crate."));
    assert_eq!(
        place_of(&game, "player"),
        Some((Id::from("crate"), LocTag::ContainedBy))
    );

    game.submit("exit");
    assert!(game.take_output().contains("You get out."));
    assert_eq!(
        place_of(&game, "player"),
        Some((Id::from("lobby"), LocTag::ContainedBy))
    );
}

#[test]
fn cannot_nest_a_container_in_its_contents() {
    let mut game = lobby_game();
    let w = &mut game.world;
    w.create("crate", "container").unwrap();
    w.create("pouch", "container").unwrap();
    w.set("opaque", &[obj("crate")], false);
    w.set("opaque", &[obj("pouch")], false);
    w.relate(&Id::from("crate"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();
    w.relate(&Id::from("pouch"), &Id::from("crate"), LocTag::ContainedBy)
        .unwrap();

    game.submit("put crate in pouch");
    let out = game.take_output();
    assert!(out.contains("can't put a thing inside something it contains"));
    assert_eq!(
        place_of(&game, "pouch"),
        Some((Id::from("crate"), LocTag::ContainedBy))
    );
}

#[test]
fn go_to_walks_a_route() {
    let mut game = lobby_game();
    let w = &mut game.world;
    w.create("hall", "room").unwrap();
    w.create("study", "room").unwrap();
    w.set("makes_light", &[obj("hall")], true);
    w.set("makes_light", &[obj("study")], true);
    w.set("visited", &[obj("study"), obj("player")], true);
    w.connect_rooms(
        &Id::from("lobby"),
        fathom_world::Direction::North,
        &Id::from("hall"),
    );
    w.connect_rooms(
        &Id::from("hall"),
        fathom_world::Direction::East,
        &Id::from("study"),
    );

    game.submit("go to study");
    let out = game.take_output();
    assert!(out.contains("Study"), "arrival renders the study:\n{out}");
    assert_eq!(
        place_of(&game, "player"),
        Some((Id::from("study"), LocTag::ContainedBy))
    );
}
