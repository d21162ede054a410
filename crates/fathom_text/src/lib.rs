//! Text output for the Fathom engine.
//!
//! Prose is built by issuing calls against a [`TextSink`], never by
//! string concatenation in game rules. This crate provides the sink
//! trait, a plain-text [`TranscriptSink`] implementation, the bracket
//! template scanner, and the second/third-person reword tables. The
//! world-aware template commands (`the`, `a`, pronouns) are layered on
//! top of these primitives by `fathom_world::prose`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod reword;
pub mod sink;
pub mod template;

pub use sink::{TextSink, TranscriptSink};
pub use template::Segment;
