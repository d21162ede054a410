//! Fathom - a turn-based interactive-fiction engine
//!
//! This crate re-exports all layers of the Fathom system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: fathom_runtime    — REPL, CLI, serialization
//! Layer 4: fathom_engine     — action pipeline, disambiguation, turn loop, verbs
//! Layer 3: fathom_parser     — tokenizer, grammar, noun resolution
//! Layer 2: fathom_world      — entities, kinds, relations, derived queries
//! Layer 1: fathom_text       — text sink, templates, reword conjugation
//!          fathom_dispatch   — generic rulebooks with `next` chaining
//! Layer 0: fathom_foundation — core types (Id, Value, Error)
//! ```

pub use fathom_dispatch as dispatch;
pub use fathom_engine as engine;
pub use fathom_foundation as foundation;
pub use fathom_parser as parser;
pub use fathom_runtime as runtime;
pub use fathom_text as text;
pub use fathom_world as world;
