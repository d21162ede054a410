//! End-to-end tests for the engine: full turns through the parser,
//! disambiguator, pipeline, and turn hooks.

mod boundaries;
mod disambiguation_tests;
mod scenarios;

use fathom_engine::Game;
use fathom_foundation::{Id, Value};
use fathom_world::LocTag;

pub fn obj(s: &str) -> Value {
    Value::Id(Id::from(s))
}

/// A lit lobby with the player and a red ball on the floor.
pub fn lobby_game() -> Game {
    let mut game = Game::new();
    let w = &mut game.world;
    w.create("lobby", "room").unwrap();
    w.create("player", "person").unwrap();
    w.create("ball", "thing").unwrap();
    w.set_player(&Id::from("player"));
    w.set("makes_light", &[obj("lobby")], true);
    w.relate(&Id::from("player"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();
    w.relate(&Id::from("ball"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();
    game.start().unwrap();
    game.take_output();
    game
}

/// Where an entity is, as `(destination, tag)`.
pub fn place_of(game: &Game, id: &str) -> Option<(Id, LocTag)> {
    game.world
        .location(&Id::from(id))
        .map(|(dest, tag)| (dest.clone(), tag))
}
