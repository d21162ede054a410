use fathom_foundation::{Id, Value};
use fathom_parser::Parser;
use fathom_world::LocTag;

use crate::{small_grammar, small_world};

fn obj(s: &str) -> Value {
    Value::Id(Id::from(s))
}

#[test]
fn articles_consumed_silently() {
    let mut world = small_world();
    let grammar = small_grammar();

    for line in ["take ball", "take the ball", "take a ball", "take some ball"] {
        let mut parser = Parser::new(&mut world, &grammar, line).unwrap();
        let matches = parser.parse_command(&mut world).unwrap();
        assert_eq!(matches.len(), 1, "{line} should parse");
    }
}

#[test]
fn successive_words_intersect_candidates() {
    let mut world = small_world();
    world.create("red-key", "thing").unwrap();
    world
        .relate(&Id::from("red-key"), &Id::from("lobby"), LocTag::ContainedBy)
        .unwrap();
    let grammar = small_grammar();

    // "red" alone is ambiguous between ball and key...
    let mut parser = Parser::new(&mut world, &grammar, "take red").unwrap();
    assert_eq!(parser.parse_command(&mut world).unwrap().len(), 2);

    // ...but "red key" narrows to one.
    let mut parser = Parser::new(&mut world, &grammar, "take red key").unwrap();
    let matches = parser.parse_command(&mut world).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].action.dobj, Some(Id::from("red-key")));
}

#[test]
fn explicit_words_override_derived_vocabulary() {
    let mut world = small_world();
    world.set(
        "words",
        &[obj("red-ball")],
        vec!["crimson", "@sphere"],
    );
    let grammar = small_grammar();

    let mut parser = Parser::new(&mut world, &grammar, "take crimson sphere").unwrap();
    assert_eq!(parser.parse_command(&mut world).unwrap().len(), 1);

    // The derived words are gone once explicit ones are set.
    let mut parser = Parser::new(&mut world, &grammar, "take red ball").unwrap();
    assert!(parser.parse_command(&mut world).unwrap().is_empty());
}

#[test]
fn something_excludes_the_unseen() {
    let mut world = small_world();
    world.create("cellar", "room").unwrap();
    world.create("onion", "thing").unwrap();
    world
        .relate(&Id::from("onion"), &Id::from("cellar"), LocTag::ContainedBy)
        .unwrap();
    let grammar = small_grammar();

    let mut parser = Parser::new(&mut world, &grammar, "take onion").unwrap();
    assert!(parser.parse_command(&mut world).unwrap().is_empty());
}

#[test]
fn mixed_up_word_order_fails() {
    let mut world = small_world();
    let grammar = small_grammar();

    let mut parser = Parser::new(&mut world, &grammar, "ball take").unwrap();
    assert!(parser.parse_command(&mut world).unwrap().is_empty());
}

#[test]
fn standard_game_grammar_covers_the_surface() {
    // The full verb library parses its documented command shapes.
    let mut game = fathom_engine::Game::new();
    let w = &mut game.world;
    w.create("lobby", "room").unwrap();
    w.create("hall", "room").unwrap();
    w.create("player", "person").unwrap();
    w.create("red-ball", "thing").unwrap();
    w.create("cardboard-box", "container").unwrap();
    w.set_player(&Id::from("player"));
    w.set("makes_light", &[obj("lobby")], true);
    w.set("visited", &[obj("hall"), obj("player")], true);
    w.connect_rooms(
        &Id::from("lobby"),
        fathom_world::Direction::North,
        &Id::from("hall"),
    );
    for thing in ["player", "red-ball", "cardboard-box"] {
        w.relate(&Id::from(thing), &Id::from("lobby"), LocTag::ContainedBy)
            .unwrap();
    }

    let lines = [
        "look",
        "l",
        "look north",
        "x ball",
        "examine the cardboard box",
        "i",
        "take ball",
        "drop ball",
        "put ball in box",
        "open box",
        "close box",
        "n",
        "go north",
        "go to hall",
        "wear ball",
        "switch on ball",
        "wait",
        "z",
        "jump",
        "help",
    ];
    for line in lines {
        let mut parser = Parser::new(&mut game.world, &game.grammar, line).unwrap();
        let matches = parser.parse_command(&mut game.world).unwrap();
        assert!(!matches.is_empty(), "{line:?} failed to parse");
    }
}
