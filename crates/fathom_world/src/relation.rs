//! The location and exit relations.
//!
//! `location` is a tagged many-to-one relation with a reverse index:
//! every placed entity has exactly one forward edge, and the reverse
//! index lists, in placement order, everything located at a given
//! destination. Both sides are updated within one call so no externally
//! visible state ever has one side stale.
//!
//! `exits` is a tagged many-to-many relation from rooms (and doors) to
//! their neighbors, with at most one edge per `(source, direction)`.

use std::collections::BTreeMap;
use std::fmt;

use fathom_foundation::{Error, Id, Result};

use crate::direction::Direction;

/// What it means for an entity to be "at" its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocTag {
    /// Inside a room or container.
    ContainedBy,
    /// On top of a supporter.
    SupportedBy,
    /// Carried by a person.
    OwnedBy,
    /// A component of a larger thing.
    PartOf,
    /// Worn by a person.
    WornBy,
}

impl LocTag {
    /// True for the two tags that mean "held by a person".
    #[must_use]
    pub const fn is_carried(self) -> bool {
        matches!(self, Self::OwnedBy | Self::WornBy)
    }
}

impl fmt::Display for LocTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ContainedBy => "contained_by",
            Self::SupportedBy => "supported_by",
            Self::OwnedBy => "owned_by",
            Self::PartOf => "part_of",
            Self::WornBy => "worn_by",
        };
        f.write_str(name)
    }
}

/// Tagged many-to-one location relation with its reverse index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationTable {
    /// Entity → (destination, tag). Exactly one edge per entity.
    forward: BTreeMap<Id, (Id, LocTag)>,
    /// Destination → entities located there, in placement order.
    reverse: BTreeMap<Id, Vec<Id>>,
}

impl LocationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The forward edge for an entity.
    #[must_use]
    pub fn location(&self, entity: &Id) -> Option<(&Id, LocTag)> {
        self.forward.get(entity).map(|(dest, tag)| (dest, *tag))
    }

    /// Everything located at a destination, in placement order.
    #[must_use]
    pub fn related_to(&self, dest: &Id) -> &[Id] {
        self.reverse.get(dest).map_or(&[], Vec::as_slice)
    }

    /// Sets the entity's single location edge, replacing any previous
    /// one. Both indexes move in the same call.
    pub fn relate(&mut self, entity: &Id, dest: &Id, tag: LocTag) {
        self.clear_for(entity);
        self.forward.insert(entity.clone(), (dest.clone(), tag));
        self.reverse
            .entry(dest.clone())
            .or_default()
            .push(entity.clone());
    }

    /// Removes the entity's location edge, leaving both indexes as if
    /// it had never been placed.
    pub fn clear_for(&mut self, entity: &Id) {
        if let Some((old_dest, _)) = self.forward.remove(entity) {
            if let Some(list) = self.reverse.get_mut(&old_dest) {
                list.retain(|o| o != entity);
                if list.is_empty() {
                    self.reverse.remove(&old_dest);
                }
            }
        }
    }

    /// True if both indexes are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.reverse.is_empty()
    }

    /// Iterates all forward edges, in entity id order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, &Id, LocTag)> {
        self.forward
            .iter()
            .map(|(entity, (dest, tag))| (entity, dest, *tag))
    }
}

/// One exit edge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    /// The neighbor: a room, or a door standing between two rooms.
    pub to: Id,
    /// The direction of travel.
    pub dir: Direction,
}

/// Tagged many-to-many exit relation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitTable {
    edges: BTreeMap<Id, Vec<Exit>>,
}

impl ExitTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The exits of a room or door.
    #[must_use]
    pub fn exits(&self, source: &Id) -> &[Exit] {
        self.edges.get(source).map_or(&[], Vec::as_slice)
    }

    /// The exit of a room in one direction.
    #[must_use]
    pub fn exit(&self, source: &Id, dir: Direction) -> Option<&Id> {
        self.exits(source)
            .iter()
            .find(|e| e.dir == dir)
            .map(|e| &e.to)
    }

    /// Adds an edge, replacing any previous edge for the same
    /// `(source, direction)` pair.
    pub fn set_exit(&mut self, source: &Id, dir: Direction, to: &Id) {
        let list = self.edges.entry(source.clone()).or_default();
        list.retain(|e| e.dir != dir);
        list.push(Exit {
            to: to.clone(),
            dir,
        });
    }

    /// Removes the edge for a `(source, direction)` pair, if any.
    pub fn clear_exit(&mut self, source: &Id, dir: Direction) {
        if let Some(list) = self.edges.get_mut(source) {
            list.retain(|e| e.dir != dir);
            if list.is_empty() {
                self.edges.remove(source);
            }
        }
    }

    /// Connects two rooms; unless `one_way`, also adds the inverse edge.
    pub fn connect_rooms(&mut self, from: &Id, dir: Direction, to: &Id, one_way: bool) {
        self.set_exit(from, dir, to);
        if !one_way {
            self.set_exit(to, dir.inverse(), from);
        }
    }

    /// Stands a door between two rooms.
    ///
    /// Each room's exit in the given direction leads to the door, and
    /// the door's own exit list holds exactly its two endpoints. Doors
    /// appear only here, never in the location relation.
    ///
    /// # Errors
    ///
    /// Fails if the door already has endpoints.
    pub fn place_door(&mut self, door: &Id, from: &Id, dir: Direction, to: &Id) -> Result<()> {
        if !self.exits(door).is_empty() {
            return Err(Error::internal(format!("door already placed: {door}")));
        }
        self.set_exit(from, dir, door);
        self.set_exit(to, dir.inverse(), door);
        self.set_exit(door, dir, to);
        self.set_exit(door, dir.inverse(), from);
        Ok(())
    }

    /// The other endpoint of a door, seen from one of its rooms.
    ///
    /// An involution on the door's two endpoints.
    #[must_use]
    pub fn door_other_side_from(&self, door: &Id, from: &Id) -> Option<&Id> {
        let ends = self.exits(door);
        if ends.len() != 2 {
            return None;
        }
        ends.iter().map(|e| &e.to).find(|end| *end != from)
    }
}
