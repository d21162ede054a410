//! Generic dispatch for the Fathom engine.
//!
//! A [`Rulebook`] is an ordered, openly extensible list of methods for
//! one operation. Properties, activities, and every action phase are
//! rulebooks; this one mechanism is the substrate for all author-facing
//! extension. Registration order IS dispatch order, and authors rely on
//! it: the most recently registered method wins unless it defers to the
//! rest of the chain with [`Next::call`].

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod rulebook;

pub use rulebook::{Method, Next, Rulebook};
