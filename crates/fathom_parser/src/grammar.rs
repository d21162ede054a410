//! Grammar registration.
//!
//! Authors call [`Grammar::understand`] against a named nonterminal
//! with a pattern string mixing literal words (`go/walk` alternation)
//! and `[frontend name]` slots. Patterns compile to element sequences
//! the matcher enumerates.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use fathom_foundation::{Error, Id, Result};
use fathom_world::{Direction, World};

use crate::action::Action;

/// A slot's resolution strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frontend {
    /// A thing visible to the actor.
    Something,
    /// Any thing at all.
    Anything,
    /// A room the actor knows.
    Somewhere,
    /// Any room at all.
    Anywhere,
    /// One specific entity.
    Obj(Id),
    /// A direction word or alias.
    Direction,
    /// A run of tokens, returned as the original substring.
    Text,
    /// A recursive parse of the `action` nonterminal.
    Action,
}

/// One element of a compiled pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Elem {
    /// A literal word with its alternates; contributes no score.
    Literal(Vec<String>),
    /// A named slot.
    Slot {
        /// The capture name the build function reads.
        name: String,
        /// How the slot resolves.
        frontend: Frontend,
    },
}

/// A slot's captured value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotValue {
    /// An entity.
    Obj(Id),
    /// A direction.
    Dir(Direction),
    /// The original text of a token run.
    Text(String),
    /// A sub-action.
    Act(Action),
}

/// Captured slot values, by name.
#[derive(Clone, Debug, Default)]
pub struct Captures(Vec<(String, SlotValue)>);

impl Captures {
    /// Adds a capture.
    pub fn push(&mut self, name: &str, value: SlotValue) {
        self.0.push((name.to_string(), value));
    }

    /// Returns these captures with one more at the front.
    #[must_use]
    pub fn prepended(mut self, name: &str, value: SlotValue) -> Self {
        self.0.insert(0, (name.to_string(), value));
        self
    }

    fn get(&self, name: &str) -> Option<&SlotValue> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The entity captured under a name.
    #[must_use]
    pub fn obj(&self, name: &str) -> Option<Id> {
        match self.get(name) {
            Some(SlotValue::Obj(id)) => Some(id.clone()),
            _ => None,
        }
    }

    /// The direction captured under a name.
    #[must_use]
    pub fn direction(&self, name: &str) -> Option<Direction> {
        match self.get(name) {
            Some(SlotValue::Dir(dir)) => Some(*dir),
            _ => None,
        }
    }

    /// The text captured under a name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(SlotValue::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }

    /// The sub-action captured under a name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<Action> {
        match self.get(name) {
            Some(SlotValue::Act(action)) => Some(action.clone()),
            _ => None,
        }
    }
}

/// Builds an action from a pattern's captures.
pub type BuildFn = Rc<dyn Fn(&Captures) -> Action>;

/// Gates a pattern on world state.
pub type WhenFn = Rc<dyn Fn(&mut World) -> bool>;

/// One registered pattern under a nonterminal.
#[derive(Clone)]
pub struct GrammarRule {
    /// The compiled elements.
    pub elems: Vec<Elem>,
    /// Builds the action from the captures.
    pub build: BuildFn,
    /// Optional gate; an inapplicable rule is skipped entirely.
    pub when: Option<WhenFn>,
}

/// Grammar rules by nonterminal, plus the literal-word vocabulary.
#[derive(Clone, Default)]
pub struct Grammar {
    rules: HashMap<String, Vec<GrammarRule>>,
    literals: HashSet<String>,
}

impl Grammar {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pattern under a nonterminal.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable pattern.
    pub fn understand(
        &mut self,
        nonterminal: &str,
        pattern: &str,
        build: impl Fn(&Captures) -> Action + 'static,
        when: Option<WhenFn>,
    ) -> Result<()> {
        let elems = compile_pattern(pattern)?;
        for elem in &elems {
            if let Elem::Literal(alts) = elem {
                for alt in alts {
                    self.literals.insert(alt.clone());
                }
            }
        }
        self.rules
            .entry(nonterminal.to_string())
            .or_default()
            .push(GrammarRule {
                elems,
                build: Rc::new(build),
                when,
            });
        Ok(())
    }

    /// The rules registered under a nonterminal, in registration order.
    #[must_use]
    pub fn rules(&self, nonterminal: &str) -> &[GrammarRule] {
        self.rules.get(nonterminal).map_or(&[], Vec::as_slice)
    }

    /// Every literal word any pattern mentions.
    #[must_use]
    pub fn literal_words(&self) -> &HashSet<String> {
        &self.literals
    }
}

fn compile_pattern(pattern: &str) -> Result<Vec<Elem>> {
    let mut elems = Vec::new();
    let mut rest = pattern.trim();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let close = after
                .find(']')
                .ok_or_else(|| Error::internal(format!("unterminated slot in {pattern:?}")))?;
            let inside = &after[..close];
            elems.push(compile_slot(inside, pattern)?);
            rest = after[close + 1..].trim_start();
        } else {
            let end = rest.find([' ', '[']).unwrap_or(rest.len());
            let word = &rest[..end];
            if !word.is_empty() {
                let alts = word.split('/').map(str::to_lowercase).collect();
                elems.push(Elem::Literal(alts));
            }
            rest = rest[end..].trim_start();
        }
    }

    if elems.is_empty() {
        return Err(Error::internal(format!("empty pattern: {pattern:?}")));
    }
    Ok(elems)
}

fn compile_slot(inside: &str, pattern: &str) -> Result<Elem> {
    let mut parts = inside.split_whitespace();
    let kind = parts
        .next()
        .ok_or_else(|| Error::internal(format!("empty slot in {pattern:?}")))?;

    let frontend = match kind {
        "something" => Frontend::Something,
        "anything" => Frontend::Anything,
        "somewhere" => Frontend::Somewhere,
        "anywhere" => Frontend::Anywhere,
        "direction" => Frontend::Direction,
        "text" => Frontend::Text,
        "action" => Frontend::Action,
        "obj" => {
            let id = parts
                .next()
                .ok_or_else(|| Error::internal(format!("obj slot needs an id in {pattern:?}")))?;
            return Ok(Elem::Slot {
                name: parts.next().unwrap_or(id).to_string(),
                frontend: Frontend::Obj(Id::from(id)),
            });
        }
        other => {
            return Err(Error::internal(format!(
                "unknown frontend {other:?} in {pattern:?}"
            )));
        }
    };

    let name = parts
        .next()
        .ok_or_else(|| Error::internal(format!("slot needs a name in {pattern:?}")))?;
    Ok(Elem::Slot {
        name: name.to_string(),
        frontend,
    })
}
