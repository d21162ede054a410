//! Integration tests for the parser:
//! - tokenization and byte spans
//! - grammar matching and scoring
//! - noun-phrase narrowing and the standard grammar surface

mod grammar_tests;
mod noun_tests;
mod tokenizer_tests;

use fathom_foundation::{Id, Value};
use fathom_parser::{Action, Grammar};
use fathom_world::{LocTag, World};

/// A lit room with the player and a handful of props.
pub fn small_world() -> World {
    let mut world = World::new();
    world.create("lobby", "room").unwrap();
    world.create("player", "person").unwrap();
    world.create("red-ball", "thing").unwrap();
    world.create("brass-lamp", "thing").unwrap();
    world.set_player(&Id::from("player"));
    world.set("makes_light", &[Value::Id(Id::from("lobby"))], true);
    for thing in ["player", "red-ball", "brass-lamp"] {
        world
            .relate(&Id::from(thing), &Id::from("lobby"), LocTag::ContainedBy)
            .unwrap();
    }
    world
}

/// take/drop/examine grammar used across the suite.
pub fn small_grammar() -> Grammar {
    let mut grammar = Grammar::new();
    grammar
        .understand(
            "action",
            "take/get [something o]",
            |caps| Action::new("take").with_dobj(caps.obj("o").expect("captured o")),
            None,
        )
        .unwrap();
    grammar
        .understand(
            "action",
            "drop [something o]",
            |caps| Action::new("drop").with_dobj(caps.obj("o").expect("captured o")),
            None,
        )
        .unwrap();
    grammar
        .understand(
            "action",
            "examine/x [something o]",
            |caps| Action::new("examine").with_dobj(caps.obj("o").expect("captured o")),
            None,
        )
        .unwrap();
    grammar
}
