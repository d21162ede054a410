//! The Fathom world model.
//!
//! Entities are stable string ids; all state about an entity lives in
//! external property tables keyed by id, never in the entity itself,
//! which is what keeps the whole world serializable as one blob. On top
//! of the raw tables this crate provides the kind tree, the tagged
//! location and exit relations with their reverse indexes, the derived
//! containment/visibility/light/accessibility queries, and the prose
//! layer that renders object references through the text sink.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod direction;
pub mod kind;
pub mod property;
pub mod prose;
pub mod queries;
pub mod relation;
pub mod stock;
pub mod world;

pub use direction::Direction;
pub use kind::KindStore;
pub use property::PropertyTable;
pub use relation::{Exit, ExitTable, LocTag, LocationTable};
pub use world::{World, WorldData};

/// Rulebook over the world: the instantiation used for properties and
/// activities.
pub type WorldRules = fathom_dispatch::Rulebook<World, Vec<fathom_foundation::Value>, fathom_foundation::Value>;

/// Method over the world, for property and activity rule chains.
pub type WorldMethod = fathom_dispatch::Method<World, Vec<fathom_foundation::Value>, fathom_foundation::Value>;
