//! Core types for the Fathom interactive-fiction engine.
//!
//! This crate provides:
//! - [`Id`] - Stable string identifiers for entities, kinds, and verbs
//! - [`Value`] - The tagged union stored in property tables and globals
//! - [`Error`] - Error types, including the action-control signals
//!
//! Everything above this layer refers to entities by [`Id`]; no owning
//! pointers between entities exist anywhere in the system.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod value;

pub use error::{Error, ErrorKind};
pub use id::Id;
pub use value::Value;

/// Persistent list used by [`Value::List`].
pub type List = im::Vector<Value>;

/// Persistent map used by [`Value::Map`].
pub type ValueMap = im::HashMap<Value, Value>;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
