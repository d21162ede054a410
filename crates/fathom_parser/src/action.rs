//! Action records.
//!
//! An action is a plain record of a verb and its resolved slots. The
//! pipeline dispatches on the verb; the `Value` round trip exists so a
//! redirect signal can carry a replacement action through the error
//! channel.

use fathom_foundation::{Error, Id, Result, Value};
use fathom_world::Direction;

/// A resolved player (or actor) intention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    /// The verb, e.g. `take`.
    pub verb: Id,
    /// Direct object.
    pub dobj: Option<Id>,
    /// Indirect object.
    pub iobj: Option<Id>,
    /// A direction, for movement verbs.
    pub direction: Option<Direction>,
    /// A room, for `go to`.
    pub room: Option<Id>,
    /// A free-text argument, e.g. the topic of `ask about`.
    pub text: Option<String>,
}

impl Action {
    /// Creates an action with no slots filled.
    pub fn new(verb: impl Into<Id>) -> Self {
        Self {
            verb: verb.into(),
            dobj: None,
            iobj: None,
            direction: None,
            room: None,
            text: None,
        }
    }

    /// Sets the direct object.
    #[must_use]
    pub fn with_dobj(mut self, dobj: impl Into<Id>) -> Self {
        self.dobj = Some(dobj.into());
        self
    }

    /// Sets the indirect object.
    #[must_use]
    pub fn with_iobj(mut self, iobj: impl Into<Id>) -> Self {
        self.iobj = Some(iobj.into());
        self
    }

    /// Sets the direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the target room.
    #[must_use]
    pub fn with_room(mut self, room: impl Into<Id>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the free-text argument.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Encodes the action as a `Value` map.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = im::HashMap::new();
        map.insert(Value::from("verb"), Value::Id(self.verb.clone()));
        if let Some(dobj) = &self.dobj {
            map.insert(Value::from("dobj"), Value::Id(dobj.clone()));
        }
        if let Some(iobj) = &self.iobj {
            map.insert(Value::from("iobj"), Value::Id(iobj.clone()));
        }
        if let Some(direction) = self.direction {
            map.insert(Value::from("direction"), Value::from(direction.name()));
        }
        if let Some(room) = &self.room {
            map.insert(Value::from("room"), Value::Id(room.clone()));
        }
        if let Some(text) = &self.text {
            map.insert(Value::from("text"), Value::from(text.as_str()));
        }
        Value::Map(map)
    }

    /// Decodes an action from its `Value` encoding.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a map or lacks a verb.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_map()
            .ok_or_else(|| Error::type_mismatch("map", value))?;
        let verb = map
            .get(&Value::from("verb"))
            .and_then(Value::as_id)
            .cloned()
            .ok_or_else(|| Error::internal("action value lacks a verb"))?;

        let mut action = Self::new(verb);
        if let Some(dobj) = map.get(&Value::from("dobj")).and_then(Value::as_id) {
            action.dobj = Some(dobj.clone());
        }
        if let Some(iobj) = map.get(&Value::from("iobj")).and_then(Value::as_id) {
            action.iobj = Some(iobj.clone());
        }
        if let Some(dir) = map.get(&Value::from("direction")).and_then(Value::as_str) {
            action.direction = Direction::parse(dir);
        }
        if let Some(room) = map.get(&Value::from("room")).and_then(Value::as_id) {
            action.room = Some(room.clone());
        }
        if let Some(text) = map.get(&Value::from("text")).and_then(Value::as_str) {
            action.text = Some(text.to_string());
        }
        Ok(action)
    }

    /// True if the verb matches.
    #[must_use]
    pub fn is(&self, verb: &str) -> bool {
        self.verb == verb
    }
}
