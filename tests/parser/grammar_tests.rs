use fathom_foundation::Id;
use fathom_parser::{Action, Parser};
use fathom_world::Direction;

use crate::{small_grammar, small_world};

#[test]
fn literal_alternation_matches_either_word() {
    let mut world = small_world();
    let grammar = small_grammar();

    for line in ["take ball", "get ball"] {
        let mut parser = Parser::new(&mut world, &grammar, line).unwrap();
        let matches = parser.parse_command(&mut world).unwrap();
        assert_eq!(matches.len(), 1, "{line} should parse once");
        assert!(matches[0].action.is("take"));
    }
}

#[test]
fn literal_words_score_nothing() {
    let mut world = small_world();
    let grammar = small_grammar();

    let mut parser = Parser::new(&mut world, &grammar, "take ball").unwrap();
    let matches = parser.parse_command(&mut world).unwrap();
    // Only the noun contributes: 2 points, no exact-name bonus.
    assert_eq!(matches[0].score, 2);
}

#[test]
fn adjective_noun_and_bonus_scoring() {
    let mut world = small_world();
    let grammar = small_grammar();

    let mut parser = Parser::new(&mut world, &grammar, "take the brass lamp").unwrap();
    let matches = parser.parse_command(&mut world).unwrap();
    assert_eq!(matches.len(), 1);
    // adjective + noun + exact display name.
    assert_eq!(matches[0].score, 4);
    assert_eq!(matches[0].action.dobj, Some(Id::from("brass-lamp")));
}

#[test]
fn when_gate_disables_a_pattern() {
    let mut world = small_world();
    let mut grammar = small_grammar();
    grammar
        .understand(
            "action",
            "xyzzy",
            |_| Action::new("magic"),
            Some(std::rc::Rc::new(|_: &mut fathom_world::World| false)),
        )
        .unwrap();

    let mut parser = Parser::new(&mut world, &grammar, "xyzzy").unwrap();
    assert!(parser.parse_command(&mut world).unwrap().is_empty());
}

#[test]
fn direction_and_text_slots() {
    let mut world = small_world();
    let mut grammar = small_grammar();
    grammar
        .understand(
            "action",
            "go [direction d]",
            |caps| {
                let mut action = Action::new("go");
                if let Some(d) = caps.direction("d") {
                    action = action.with_direction(d);
                }
                action
            },
            None,
        )
        .unwrap();
    grammar
        .understand(
            "action",
            "say [text words]",
            |caps| {
                let mut action = Action::new("say");
                if let Some(words) = caps.text("words") {
                    action = action.with_text(words);
                }
                action
            },
            None,
        )
        .unwrap();

    let mut parser = Parser::new(&mut world, &grammar, "go ne").unwrap();
    let matches = parser.parse_command(&mut world).unwrap();
    assert_eq!(matches[0].action.direction, Some(Direction::Northeast));

    let mut parser = Parser::new(&mut world, &grammar, "say Hello There").unwrap();
    let matches = parser.parse_command(&mut world).unwrap();
    // The text slot returns the original substring, case intact.
    assert_eq!(matches[0].action.text.as_deref(), Some("Hello There"));
}

#[test]
fn recursive_action_slot() {
    let mut world = small_world();
    let mut grammar = small_grammar();
    grammar
        .understand(
            "action",
            "please [action a]",
            |caps| caps.action("a").expect("captured a"),
            None,
        )
        .unwrap();

    let mut parser = Parser::new(&mut world, &grammar, "please take ball").unwrap();
    let matches = parser.parse_command(&mut world).unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].action.is("take"));
    assert_eq!(matches[0].action.dobj, Some(Id::from("red-ball")));
}

#[test]
fn obj_slot_matches_only_its_target() {
    let mut world = small_world();
    let mut grammar = small_grammar();
    grammar
        .understand(
            "action",
            "polish [obj brass-lamp]",
            |_| Action::new("polish").with_dobj("brass-lamp"),
            None,
        )
        .unwrap();

    let mut parser = Parser::new(&mut world, &grammar, "polish lamp").unwrap();
    assert_eq!(parser.parse_command(&mut world).unwrap().len(), 1);

    let mut parser = Parser::new(&mut world, &grammar, "polish ball").unwrap();
    assert!(parser.parse_command(&mut world).unwrap().is_empty());
}
