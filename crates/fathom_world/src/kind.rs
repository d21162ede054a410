//! The kind tree and entity kind edges.
//!
//! Kinds are string ids forming a single-inheritance tree via the
//! `kind_of` relation. Every non-kind entity has exactly one kind edge;
//! `is_a` walks from the entity's kind up toward the root.

use std::collections::BTreeMap;

use fathom_foundation::{Error, Id, Result};

/// The root kind.
pub const KIND: &str = "kind";

/// Predeclared kind tree: `(child, parent)` pairs under the root.
pub const PREDECLARED: &[(&str, &str)] = &[
    ("room", KIND),
    ("thing", KIND),
    ("region", KIND),
    ("door", "thing"),
    ("container", "thing"),
    ("supporter", "thing"),
    ("person", "thing"),
    ("backdrop", "thing"),
];

/// Kind tree plus the entity → kind edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindStore {
    /// Kind → parent kind. The root is not a key.
    parents: BTreeMap<Id, Id>,
    /// Entity → its kind.
    entity_kind: BTreeMap<Id, Id>,
}

impl KindStore {
    /// Creates a store holding the predeclared kind tree.
    #[must_use]
    pub fn standard() -> Self {
        let mut store = Self::default();
        for (child, parent) in PREDECLARED {
            store
                .parents
                .insert(Id::from(*child), Id::from(*parent));
        }
        store
    }

    /// True if the id names a kind (the root included).
    #[must_use]
    pub fn is_kind(&self, id: &Id) -> bool {
        id.as_str() == KIND || self.parents.contains_key(id)
    }

    /// Registers a new kind under a parent kind.
    ///
    /// # Errors
    ///
    /// Fails if the parent is not a kind or the child already is one.
    pub fn register_kind(&mut self, child: impl Into<Id>, parent: impl Into<Id>) -> Result<()> {
        let child = child.into();
        let parent = parent.into();
        if !self.is_kind(&parent) {
            return Err(Error::internal(format!("unknown parent kind: {parent}")));
        }
        if self.is_kind(&child) {
            return Err(Error::internal(format!("kind already registered: {child}")));
        }
        self.parents.insert(child, parent);
        Ok(())
    }

    /// Records an entity's single kind edge.
    ///
    /// # Errors
    ///
    /// Fails if the kind is unknown or the entity already has a kind.
    pub fn set_kind(&mut self, entity: Id, kind: impl Into<Id>) -> Result<()> {
        let kind = kind.into();
        if !self.is_kind(&kind) {
            return Err(Error::internal(format!("unknown kind: {kind}")));
        }
        if self.entity_kind.contains_key(&entity) {
            return Err(Error::internal(format!("entity already exists: {entity}")));
        }
        self.entity_kind.insert(entity, kind);
        Ok(())
    }

    /// The entity's kind, if it has one.
    #[must_use]
    pub fn kind(&self, entity: &Id) -> Option<&Id> {
        self.entity_kind.get(entity)
    }

    /// True if the entity has a kind edge.
    #[must_use]
    pub fn exists(&self, entity: &Id) -> bool {
        self.entity_kind.contains_key(entity)
    }

    /// Walks `kind_of` from the entity's kind upward looking for `kind`.
    #[must_use]
    pub fn is_a(&self, entity: &Id, kind: &str) -> bool {
        let mut current = match self.entity_kind.get(entity) {
            Some(k) => k,
            None => return false,
        };
        loop {
            if current.as_str() == kind {
                return true;
            }
            match self.parents.get(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Iterates all entities with their kinds, in id order.
    pub fn entities(&self) -> impl Iterator<Item = (&Id, &Id)> {
        self.entity_kind.iter()
    }
}
