//! Per-kind noun dictionaries.
//!
//! Every entity of the dictionary's kind contributes its `words` list:
//! plain entries are adjectives, `@`-prefixed entries are nouns. The
//! dictionary maps each lower-cased word to the set of entities that
//! carry it, which is what the intersection step of noun-phrase
//! resolution narrows.

use std::collections::HashMap;

use fathom_foundation::{Id, Result};
use fathom_world::World;

/// How a word relates to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordRole {
    /// An adjective: worth one point.
    Adjective,
    /// A noun: worth two points.
    Noun,
}

impl WordRole {
    /// The grammar-score contribution of a word in this role.
    #[must_use]
    pub const fn points(self) -> i32 {
        match self {
            Self::Adjective => 1,
            Self::Noun => 2,
        }
    }
}

/// Word → candidate entities for one kind.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: HashMap<String, Vec<(Id, WordRole)>>,
    names: HashMap<Id, String>,
}

impl Dictionary {
    /// Builds the dictionary for every entity satisfying `is_a(_, kind)`.
    ///
    /// # Errors
    ///
    /// Propagates property rule faults from `words` and `name`.
    pub fn build(world: &mut World, kind: &str) -> Result<Self> {
        let mut dict = Self::default();
        for id in world.entities_of_kind(kind) {
            let words = world.list_prop("words", &id)?;
            for word in words.iter().filter_map(|v| v.as_str()) {
                let (text, role) = match word.strip_prefix('@') {
                    Some(noun) => (noun, WordRole::Noun),
                    None => (word, WordRole::Adjective),
                };
                let text = text.to_lowercase();
                let entry = dict.entries.entry(text).or_default();
                match entry.iter_mut().find(|(eid, _)| eid == &id) {
                    // A word listed both ways counts as the noun.
                    Some(slot) => {
                        if role == WordRole::Noun {
                            slot.1 = WordRole::Noun;
                        }
                    }
                    None => entry.push((id.clone(), role)),
                }
            }
            let name = fathom_world::prose::display_name(world, &id)?;
            dict.names.insert(id, name.to_lowercase());
        }
        Ok(dict)
    }

    /// Candidates carrying a word.
    #[must_use]
    pub fn lookup(&self, word: &str) -> &[(Id, WordRole)] {
        self.entries.get(word).map_or(&[], Vec::as_slice)
    }

    /// True if any entity carries the word.
    #[must_use]
    pub fn knows(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// The lower-cased display name of a candidate, for the exact-name
    /// bonus.
    #[must_use]
    pub fn name_of(&self, id: &Id) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Iterates all known words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
