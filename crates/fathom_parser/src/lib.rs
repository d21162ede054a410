//! The Fathom parser.
//!
//! A line of player input becomes tokens, the tokens are matched
//! against author-registered grammar patterns, and noun phrases resolve
//! to entity ids through per-kind word dictionaries. Parsing is a
//! memoized top-down enumeration that yields every candidate action
//! with a grammar score; choosing among them is the disambiguator's
//! job, one layer up.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod dictionary;
pub mod grammar;
pub mod matcher;
pub mod token;

pub use action::Action;
pub use grammar::{Captures, Elem, Frontend, Grammar, GrammarRule, SlotValue};
pub use matcher::{ActionMatch, Parser};
pub use token::{tokenize, Token};

/// Articles consumed silently in front of noun phrases.
pub const ARTICLES: &[&str] = &["a", "an", "the", "some"];
