//! The world: data blob plus rule chains plus the text sink.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use fathom_foundation::{Error, ErrorKind, Id, List, Result, Value};
use fathom_text::{TextSink, TranscriptSink};

use crate::direction::Direction;
use crate::kind::KindStore;
use crate::property::PropertyTable;
use crate::prose;
use crate::relation::{Exit, ExitTable, LocTag, LocationTable};
use crate::{WorldMethod, WorldRules};

/// The serializable world state: a pure tree of ids and values.
///
/// Everything the game mutates during play lives here: property
/// tables, the location and exit relations, kind edges, globals, and
/// the actor/player ids. Rule chains and the sink live outside, on
/// [`World`], because they are code, not state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldData {
    /// Kind tree and entity kind edges.
    pub kinds: KindStore,
    /// The tagged many-to-one location relation.
    pub location: LocationTable,
    /// The tagged many-to-many exit relation.
    pub exits: ExitTable,
    /// Explicit property values, by property name.
    pub tables: BTreeMap<Id, PropertyTable>,
    /// Named global values.
    pub globals: BTreeMap<Id, Value>,
    /// The entity whose turn is being processed.
    pub actor: Id,
    /// The narrative viewpoint.
    pub player: Id,
}

impl Default for WorldData {
    fn default() -> Self {
        Self {
            kinds: KindStore::standard(),
            location: LocationTable::new(),
            exits: ExitTable::new(),
            tables: BTreeMap::new(),
            globals: BTreeMap::new(),
            actor: Id::from("player"),
            player: Id::from("player"),
        }
    }
}

/// The world model: data, rule chains, and the text sink.
pub struct World {
    /// The serializable state.
    pub data: WorldData,
    prop_rules: BTreeMap<Id, WorldRules>,
    activities: BTreeMap<Id, WorldRules>,
    sink: Rc<RefCell<dyn TextSink>>,
    transcript: Option<Rc<RefCell<TranscriptSink>>>,
}

impl World {
    /// Creates a bare world with only the predeclared kinds, writing
    /// into an internal transcript sink.
    #[must_use]
    pub fn bare() -> Self {
        let transcript = Rc::new(RefCell::new(TranscriptSink::new()));
        let sink: Rc<RefCell<dyn TextSink>> = transcript.clone();
        Self {
            data: WorldData::default(),
            prop_rules: BTreeMap::new(),
            activities: BTreeMap::new(),
            sink,
            transcript: Some(transcript),
        }
    }

    /// Creates a world with the standard properties, defaults, and
    /// activities installed.
    #[must_use]
    pub fn new() -> Self {
        let mut world = Self::bare();
        crate::stock::install(&mut world);
        world
    }

    /// Replaces the sink with an external one.
    ///
    /// After this, [`World::take_output`] returns empty strings; the
    /// caller owns the output.
    pub fn set_sink(&mut self, sink: Rc<RefCell<dyn TextSink>>) {
        self.sink = sink;
        self.transcript = None;
    }

    /// A handle to the sink.
    #[must_use]
    pub fn sink(&self) -> Rc<RefCell<dyn TextSink>> {
        self.sink.clone()
    }

    /// Takes the accumulated transcript, if the internal sink is in use.
    pub fn take_output(&mut self) -> String {
        self.transcript
            .as_ref()
            .map(|t| t.borrow_mut().take())
            .unwrap_or_default()
    }

    // --- Entities and kinds ---

    /// Creates an entity of the given kind.
    ///
    /// # Errors
    ///
    /// Fails if the kind is unknown or the id is already in use.
    pub fn create(&mut self, id: impl Into<Id>, kind: &str) -> Result<Id> {
        let id = id.into();
        self.data.kinds.set_kind(id.clone(), kind)?;
        Ok(id)
    }

    /// Registers a new kind under a parent kind.
    ///
    /// # Errors
    ///
    /// Fails if the parent is not a kind.
    pub fn register_kind(&mut self, child: &str, parent: &str) -> Result<()> {
        self.data.kinds.register_kind(child, parent)
    }

    /// True if the id was created as an entity.
    #[must_use]
    pub fn exists(&self, id: &Id) -> bool {
        self.data.kinds.exists(id)
    }

    /// The entity's kind.
    #[must_use]
    pub fn kind(&self, id: &Id) -> Option<&Id> {
        self.data.kinds.kind(id)
    }

    /// True if the entity's kind is `kind` or a descendant of it.
    #[must_use]
    pub fn is_a(&self, id: &Id, kind: &str) -> bool {
        self.data.kinds.is_a(id, kind)
    }

    /// All entity ids, in id order.
    #[must_use]
    pub fn entities(&self) -> Vec<Id> {
        self.data.kinds.entities().map(|(id, _)| id.clone()).collect()
    }

    /// All entities satisfying `is_a(_, kind)`, in id order.
    #[must_use]
    pub fn entities_of_kind(&self, kind: &str) -> Vec<Id> {
        self.data
            .kinds
            .entities()
            .map(|(id, _)| id)
            .filter(|id| self.data.kinds.is_a(id, kind))
            .cloned()
            .collect()
    }

    // --- Location ---

    /// Places an entity at a destination with a tag.
    ///
    /// # Errors
    ///
    /// Rooms are never the source of a location edge, and doors appear
    /// only in the exit relation; both are rejected here. Unknown ids
    /// on either side are rejected too.
    pub fn relate(&mut self, entity: &Id, dest: &Id, tag: LocTag) -> Result<()> {
        if !self.exists(entity) {
            return Err(Error::unknown_entity(entity.clone()));
        }
        if !self.exists(dest) {
            return Err(Error::unknown_entity(dest.clone()));
        }
        if self.is_a(entity, "room") {
            return Err(Error::internal(format!(
                "a room is never the source of a location edge: {entity}"
            )));
        }
        if self.is_a(entity, "door") {
            return Err(Error::internal(format!(
                "doors appear only in exits, never in location: {entity}"
            )));
        }
        self.data.location.relate(entity, dest, tag);
        Ok(())
    }

    /// Clears the entity's location edge. The id persists and can be
    /// re-placed later.
    pub fn remove_obj(&mut self, entity: &Id) {
        self.data.location.clear_for(entity);
    }

    /// The entity's location edge.
    #[must_use]
    pub fn location(&self, entity: &Id) -> Option<(&Id, LocTag)> {
        self.data.location.location(entity)
    }

    /// Everything located at a destination, in placement order.
    #[must_use]
    pub fn located_at(&self, dest: &Id) -> &[Id] {
        self.data.location.related_to(dest)
    }

    /// The entity holding `entity` with a carried tag, if any.
    #[must_use]
    pub fn holder(&self, entity: &Id) -> Option<&Id> {
        match self.location(entity) {
            Some((dest, tag)) if tag.is_carried() => Some(dest),
            _ => None,
        }
    }

    // --- Exits ---

    /// Connects two rooms in a direction, adding the inverse edge.
    pub fn connect_rooms(&mut self, from: &Id, dir: Direction, to: &Id) {
        self.data.exits.connect_rooms(from, dir, to, false);
    }

    /// Connects two rooms one-way.
    pub fn connect_one_way(&mut self, from: &Id, dir: Direction, to: &Id) {
        self.data.exits.connect_rooms(from, dir, to, true);
    }

    /// Stands a door between two rooms.
    ///
    /// # Errors
    ///
    /// Fails if the door already has endpoints.
    pub fn place_door(&mut self, door: &Id, from: &Id, dir: Direction, to: &Id) -> Result<()> {
        self.data.exits.place_door(door, from, dir, to)
    }

    /// The exits of a room or door.
    #[must_use]
    pub fn exits(&self, source: &Id) -> &[Exit] {
        self.data.exits.exits(source)
    }

    /// The exit of a room in one direction.
    #[must_use]
    pub fn exit(&self, source: &Id, dir: Direction) -> Option<&Id> {
        self.data.exits.exit(source, dir)
    }

    // --- Properties ---

    /// Declares a property, creating its table and rule chain.
    pub fn declare_property(&mut self, name: &str) {
        self.data
            .tables
            .entry(Id::from(name))
            .or_insert_with(PropertyTable::new);
        self.prop_rules
            .entry(Id::from(name))
            .or_insert_with(|| WorldRules::new(name));
    }

    /// Sets an explicit property value (whole-tuple upsert).
    pub fn set(&mut self, prop: &str, args: &[Value], value: impl Into<Value>) {
        self.declare_property(prop);
        if let Some(table) = self.data.tables.get_mut(prop) {
            table.set(args, value.into());
        }
    }

    /// Removes an explicit property value.
    pub fn unset(&mut self, prop: &str, args: &[Value]) {
        if let Some(table) = self.data.tables.get_mut(prop) {
            table.unset(args);
        }
    }

    /// Looks up a property: the explicit table first, then the rule
    /// chain.
    ///
    /// # Errors
    ///
    /// Raises unknown-operation for an undeclared property and
    /// no-applicable-method when neither the table nor any rule
    /// answers.
    pub fn get_prop(&mut self, prop: &str, args: &[Value]) -> Result<Value> {
        if let Some(table) = self.data.tables.get(prop) {
            if let Some(value) = table.get(args) {
                return Ok(value.clone());
            }
        }
        if let Some(rules) = self.prop_rules.get(prop) {
            let rules = rules.clone();
            let args = args.to_vec();
            return rules.call(self, &args);
        }
        if self.data.tables.contains_key(prop) {
            Err(Error::no_applicable_method(prop))
        } else {
            Err(Error::unknown_operation(prop))
        }
    }

    /// Looks up a property, mapping a dispatch miss to `None`.
    ///
    /// # Errors
    ///
    /// Propagates faults raised by property rules themselves.
    pub fn try_prop(&mut self, prop: &str, args: &[Value]) -> Result<Option<Value>> {
        match self.get_prop(prop, args) {
            Ok(value) => Ok(Some(value)),
            Err(e)
                if matches!(
                    e.kind,
                    ErrorKind::NoApplicableMethod { .. } | ErrorKind::UnknownOperation(_)
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// A single-argument boolean property; a miss reads as `false`.
    ///
    /// # Errors
    ///
    /// Propagates rule faults.
    pub fn bool_prop(&mut self, prop: &str, of: &Id) -> Result<bool> {
        let value = self.try_prop(prop, &[Value::from(of)])?;
        Ok(value.is_some_and(|v| v.is_truthy()))
    }

    /// A two-argument boolean property; a miss reads as `false`.
    ///
    /// # Errors
    ///
    /// Propagates rule faults.
    pub fn bool_prop2(&mut self, prop: &str, a: &Id, b: &Id) -> Result<bool> {
        let value = self.try_prop(prop, &[Value::from(a), Value::from(b)])?;
        Ok(value.is_some_and(|v| v.is_truthy()))
    }

    /// A single-argument string property.
    ///
    /// # Errors
    ///
    /// Propagates rule faults.
    pub fn str_prop(&mut self, prop: &str, of: &Id) -> Result<Option<String>> {
        let value = self.try_prop(prop, &[Value::from(of)])?;
        Ok(value.and_then(|v| v.as_str().map(str::to_string)))
    }

    /// A single-argument id property.
    ///
    /// # Errors
    ///
    /// Propagates rule faults.
    pub fn id_prop(&mut self, prop: &str, of: &Id) -> Result<Option<Id>> {
        let value = self.try_prop(prop, &[Value::from(of)])?;
        Ok(value.and_then(|v| v.as_id().cloned()))
    }

    /// A single-argument list property; a miss reads as empty.
    ///
    /// # Errors
    ///
    /// Propagates rule faults.
    pub fn list_prop(&mut self, prop: &str, of: &Id) -> Result<List> {
        let value = self.try_prop(prop, &[Value::from(of)])?;
        Ok(value.and_then(|v| v.as_list().cloned()).unwrap_or_default())
    }

    /// Appends a rule method to a property's chain (dispatched first).
    pub fn add_prop_rule(&mut self, prop: &str, method: WorldMethod) {
        self.declare_property(prop);
        if let Some(rules) = self.prop_rules.get_mut(prop) {
            rules.append(method);
        }
    }

    /// Prepends a rule method to a property's chain (the default of
    /// last resort).
    pub fn prepend_prop_rule(&mut self, prop: &str, method: WorldMethod) {
        self.declare_property(prop);
        if let Some(rules) = self.prop_rules.get_mut(prop) {
            rules.prepend(method);
        }
    }

    /// Direct access to a property's rule chain for reordering.
    #[must_use]
    pub fn prop_rules_mut(&mut self, prop: &str) -> Option<&mut WorldRules> {
        self.prop_rules.get_mut(prop)
    }

    // --- Activities ---

    /// Declares an activity: a dispatchable operation with no table.
    pub fn declare_activity(&mut self, name: &str) {
        self.activities
            .entry(Id::from(name))
            .or_insert_with(|| WorldRules::new(name));
    }

    /// Appends a method to an activity (dispatched first).
    pub fn add_activity_rule(&mut self, name: &str, method: WorldMethod) {
        self.declare_activity(name);
        if let Some(rules) = self.activities.get_mut(name) {
            rules.append(method);
        }
    }

    /// Prepends a method to an activity (the fallback).
    pub fn prepend_activity_rule(&mut self, name: &str, method: WorldMethod) {
        self.declare_activity(name);
        if let Some(rules) = self.activities.get_mut(name) {
            rules.prepend(method);
        }
    }

    /// Direct access to an activity's rulebook for reordering.
    #[must_use]
    pub fn activity_mut(&mut self, name: &str) -> Option<&mut WorldRules> {
        self.activities.get_mut(name)
    }

    /// Runs an activity.
    ///
    /// # Errors
    ///
    /// Raises unknown-operation for an undeclared activity and
    /// propagates whatever its methods raise.
    pub fn run_activity(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        let Some(rules) = self.activities.get(name) else {
            return Err(Error::unknown_operation(name));
        };
        let rules = rules.clone();
        rules.call(self, &args)
    }

    // --- Globals, actor, player ---

    /// Sets a named global.
    pub fn set_global(&mut self, name: &str, value: impl Into<Value>) {
        self.data.globals.insert(Id::from(name), value.into());
    }

    /// Reads a named global.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.data.globals.get(name)
    }

    /// The entity whose turn is being processed.
    #[must_use]
    pub fn actor(&self) -> Id {
        self.data.actor.clone()
    }

    /// The narrative viewpoint.
    #[must_use]
    pub fn player(&self) -> Id {
        self.data.player.clone()
    }

    /// Sets the player (and the actor, which follows it).
    pub fn set_player(&mut self, player: &Id) {
        self.data.player = player.clone();
        self.data.actor = player.clone();
    }

    /// Runs a closure with `actor` swapped; restored on all exits.
    ///
    /// # Errors
    ///
    /// Propagates the closure's error after restoring the actor.
    pub fn with_actor<T>(
        &mut self,
        actor: &Id,
        f: impl FnOnce(&mut World) -> Result<T>,
    ) -> Result<T> {
        let saved = self.data.actor.clone();
        self.data.actor = actor.clone();
        let result = f(self);
        self.data.actor = saved;
        result
    }

    // --- Prose ---

    /// Expands a bracket template into the sink.
    ///
    /// # Errors
    ///
    /// Propagates template faults and property rule faults.
    pub fn write(&mut self, template: &str) -> Result<()> {
        prose::write(self, template)
    }

    /// Terminates the current paragraph.
    pub fn para(&mut self) {
        self.sink.borrow_mut().para();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.data.kinds.entities().count())
            .field("properties", &self.data.tables.len())
            .field("activities", &self.activities.len())
            .field("actor", &self.data.actor)
            .finish_non_exhaustive()
    }
}
