//! Second/third-person conjugation.
//!
//! Templates are written as if a third-person narrator named "Bob" were
//! acting: `{We} {take|bob} the lamp.` At render time, when the actor
//! is the player the bracketed words come out in second person ("You
//! take"); otherwise they stay third person and the verb receives its
//! `-s`/`-ies` suffix, with a small exception table for the irregulars.
//!
//! The reserved pronoun stems (`we`, `us`, `our`, `ours`, `ourself`,
//! `ourselves`, `bobs`) are recognized here; rendering them for a
//! non-player actor needs the world (the actor's name), so that side is
//! handled by the caller.

/// The grammatical person a rewording targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Person {
    /// The actor is the player: rewrite to second person.
    Second,
    /// Someone else is acting: stay in third person.
    Third,
}

/// Reserved stems that render as pronouns rather than verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PronounStem {
    /// Subject: we -> you / the actor.
    We,
    /// Object: us -> you / the actor.
    Us,
    /// Possessive determiner: our -> your / the actor's.
    Our,
    /// Possessive: ours -> yours / the actor's.
    Ours,
    /// Reflexive: ourself/ourselves -> yourself / themself.
    Ourself,
    /// Possessive of the narrator's name: bobs -> your / the actor's.
    Bobs,
}

impl PronounStem {
    /// Recognizes a reserved stem, case-insensitively.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "we" => Some(Self::We),
            "us" => Some(Self::Us),
            "our" => Some(Self::Our),
            "ours" => Some(Self::Ours),
            "ourself" | "ourselves" => Some(Self::Ourself),
            "bobs" => Some(Self::Bobs),
            _ => None,
        }
    }

    /// The second-person rendering of this stem.
    #[must_use]
    pub const fn second_person(self) -> &'static str {
        match self {
            Self::We => "you",
            Self::Us => "you",
            Self::Our | Self::Bobs => "your",
            Self::Ours => "yours",
            Self::Ourself => "yourself",
        }
    }
}

/// Irregular verbs whose third-person form is not suffix-derived.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("are", "is"),
    ("have", "has"),
    ("do", "does"),
    ("can", "can"),
    ("go", "goes"),
    ("don't", "doesn't"),
    ("can't", "can't"),
    ("aren't", "isn't"),
];

/// Conjugates a verb stem for the given person.
///
/// Second person returns the stem unchanged; third person consults the
/// exception table, then applies `-ies` after a consonant + `y`, `-es`
/// after a sibilant, and `-s` otherwise. Case of the first letter is
/// preserved.
#[must_use]
pub fn conjugate(stem: &str, person: Person) -> String {
    if person == Person::Second {
        return stem.to_string();
    }

    let lower = stem.to_lowercase();
    let conjugated = EXCEPTIONS
        .iter()
        .find(|(base, _)| *base == lower)
        .map_or_else(|| suffixed(&lower), |(_, third)| (*third).to_string());

    match_case(stem, &conjugated)
}

fn suffixed(lower: &str) -> String {
    let mut chars = lower.chars().rev();
    let last = chars.next();
    let second_last = chars.next();

    match last {
        Some('y') => {
            // try -> tries, but play -> plays
            if second_last.is_some_and(|c| !"aeiou".contains(c)) {
                format!("{}ies", &lower[..lower.len() - 1])
            } else {
                format!("{lower}s")
            }
        }
        Some('s' | 'x' | 'z') => format!("{lower}es"),
        Some('h') if matches!(second_last, Some('s' | 'c')) => format!("{lower}es"),
        Some('o') => format!("{lower}es"),
        _ => format!("{lower}s"),
    }
}

/// Copies the capitalization of the template word onto the rendering.
#[must_use]
pub fn match_case(template: &str, word: &str) -> String {
    if template.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        word.to_string()
    }
}
