//! Integration tests for the world model:
//! - kind tree invariants
//! - location and exit relation indexes
//! - containment, visibility, light, and accessibility queries

mod kinds;
mod queries;
mod relations;
