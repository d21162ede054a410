//! Prose rendering: bracket templates executed against the world.
//!
//! `write` expands a template through the sink. Object references
//! (`[the x]`, `[a x]`, and the pronoun stems) are wrapped in an action
//! link whose embedded command is `examine <id>`, so a clicking sink
//! can re-submit it; the transcript sink just renders the text.

use fathom_foundation::{Error, Id, Result};
use fathom_text::reword::{self, Person, PronounStem};
use fathom_text::template::{self, Segment};
use fathom_text::TextSink;

use crate::world::World;

/// Which article an object reference carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Article {
    /// `the x`
    Definite,
    /// `a x` / `an x`
    Indefinite,
    /// bare name
    None,
}

/// Expands a bracket template into the world's sink.
///
/// # Errors
///
/// Propagates template scan faults, unknown commands, and property
/// rule faults.
pub fn write(world: &mut World, template: &str) -> Result<()> {
    for segment in template::scan(template)? {
        match segment {
            Segment::Literal(text) => world.sink().borrow_mut().write_text(&text),
            Segment::Command { name, args } => run_command(world, &name, &args)?,
        }
    }
    Ok(())
}

fn run_command(world: &mut World, name: &str, args: &[String]) -> Result<()> {
    match name {
        "the" | "The" => object_ref(world, args, Article::Definite, name == "The"),
        "a" | "A" => object_ref(world, args, Article::Indefinite, name == "A"),
        "name" => object_ref(world, args, Article::None, false),
        "reword" => {
            let (word, flags) = args
                .split_first()
                .ok_or_else(|| Error::internal("reword needs a word"))?;
            run_reword(world, word, flags)
        }
        "para" => {
            world.para();
            Ok(())
        }
        other => Err(Error::unknown_operation(format!("prose command {other}"))),
    }
}

fn object_ref(world: &mut World, args: &[String], article: Article, cap: bool) -> Result<()> {
    let arg = args
        .first()
        .ok_or_else(|| Error::internal("object reference needs an id"))?;
    let id = Id::from(arg.as_str());
    write_object_ref(world, &id, article, cap)
}

/// Writes one object reference, article and link included.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn write_object_ref(world: &mut World, o: &Id, article: Article, cap: bool) -> Result<()> {
    let name = display_name(world, o)?;
    let proper = world.bool_prop("proper_named", o)?;

    let text = match article {
        Article::None => name,
        _ if proper => name,
        Article::Definite => format!("the {name}"),
        Article::Indefinite => {
            let art = world
                .str_prop("indefinite_article", o)?
                .unwrap_or_else(|| "a".to_string());
            format!("{art} {name}")
        }
    };
    let text = if cap {
        capitalize(&text)
    } else {
        text
    };

    let sink = world.sink();
    let mut sink = sink.borrow_mut();
    sink.begin_action_link(&format!("examine {o}"));
    sink.write_text(&text);
    sink.end_action_link();
    Ok(())
}

/// The object's display name: the `name` property, falling back to the
/// id text.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn display_name(world: &mut World, o: &Id) -> Result<String> {
    Ok(world
        .str_prop("name", o)?
        .unwrap_or_else(|| o.as_str().replace(['-', '_'], " ")))
}

fn run_reword(world: &mut World, word: &str, flags: &[String]) -> Result<()> {
    let person = if world.actor() == world.player() {
        Person::Second
    } else {
        Person::Third
    };
    let object_case = flags.iter().any(|f| f == "obj");

    if let Some(stem) = PronounStem::parse(word) {
        return write_pronoun(world, word, stem, person, object_case);
    }

    let rendered = reword::conjugate(word, person);
    world.sink().borrow_mut().write_text(&rendered);
    Ok(())
}

fn write_pronoun(
    world: &mut World,
    template_word: &str,
    stem: PronounStem,
    person: Person,
    object_case: bool,
) -> Result<()> {
    if person == Person::Second {
        let rendered = reword::match_case(template_word, stem.second_person());
        world.sink().borrow_mut().write_text(&rendered);
        return Ok(());
    }

    // Third person: the narrator names the actor.
    let actor = world.actor();
    match stem {
        PronounStem::We | PronounStem::Us => {
            let _ = object_case; // name renders the same in both cases
            write_object_ref(
                world,
                &actor,
                Article::Definite,
                template_word.chars().next().is_some_and(char::is_uppercase),
            )
        }
        PronounStem::Our | PronounStem::Ours | PronounStem::Bobs => {
            write_object_ref(
                world,
                &actor,
                Article::Definite,
                template_word.chars().next().is_some_and(char::is_uppercase),
            )?;
            world.sink().borrow_mut().write_text("'s");
            Ok(())
        }
        PronounStem::Ourself => {
            let pronoun = world
                .str_prop("pronoun", &actor)?
                .unwrap_or_else(|| "they".to_string());
            let reflexive = match pronoun.as_str() {
                "it" => "itself",
                "he" => "himself",
                "she" => "herself",
                _ => "themself",
            };
            let rendered = reword::match_case(template_word, reflexive);
            world.sink().borrow_mut().write_text(&rendered);
            Ok(())
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Writes `the <name>` for an object.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn the(world: &mut World, o: &Id) -> Result<()> {
    write_object_ref(world, o, Article::Definite, false)
}

/// Writes `The <name>` for an object.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn the_cap(world: &mut World, o: &Id) -> Result<()> {
    write_object_ref(world, o, Article::Definite, true)
}

/// Writes `a <name>` for an object.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn a(world: &mut World, o: &Id) -> Result<()> {
    write_object_ref(world, o, Article::Indefinite, false)
}

/// Writes `A <name>` for an object.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn a_cap(world: &mut World, o: &Id) -> Result<()> {
    write_object_ref(world, o, Article::Indefinite, true)
}
