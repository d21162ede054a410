//! The Fathom runtime: a line-oriented REPL driving the engine, and
//! world serialization.
//!
//! The engine is a cooperative producer whose single suspension point
//! is awaiting an input line; the REPL is the event source that resumes
//! it. The line reader sits behind a trait so tests drive the loop with
//! a scripted reader instead of a terminal.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod reader;
pub mod repl;
pub mod serialize;

pub use reader::{LineReader, ReadOutcome, RustylineReader, ScriptedReader};
pub use repl::Repl;
