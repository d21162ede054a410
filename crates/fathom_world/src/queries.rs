//! Derived world queries: containment, enclosure, light, visibility,
//! and accessibility.
//!
//! These take `&mut World` because they read properties, and property
//! lookups may dispatch author rules. By convention they never write.

use fathom_foundation::{Id, Result};

use crate::relation::LocTag;
use crate::world::World;

/// True if `outer` transitively contains `inner`, ignoring tags.
///
/// The closure is reflexive-free: an object never contains itself. The
/// location relation is acyclic by invariant, so the walk terminates.
#[must_use]
pub fn contains(world: &World, outer: &Id, inner: &Id) -> bool {
    let mut current = inner.clone();
    while let Some((parent, _)) = world.location(&current) {
        if parent == outer {
            return true;
        }
        current = parent.clone();
    }
    false
}

/// The room ultimately enclosing an entity, walking the location chain.
#[must_use]
pub fn room_of(world: &World, o: &Id) -> Option<Id> {
    let mut current = o.clone();
    loop {
        if world.is_a(&current, "room") {
            return Some(current);
        }
        match world.location(&current) {
            Some((parent, _)) => current = parent.clone(),
            None => return None,
        }
    }
}

/// Is this enclosure one that stops reach at itself?
fn blocks_reach(world: &mut World, enclosure: &Id) -> Result<bool> {
    if !world.is_a(enclosure, "container") {
        return Ok(false);
    }
    if world.bool_prop("opaque", enclosure)? {
        return Ok(true);
    }
    Ok(world.bool_prop("openable", enclosure)? && !world.bool_prop("open", enclosure)?)
}

/// Is this enclosure one that stops sight at itself?
fn blocks_sight(world: &mut World, enclosure: &Id) -> Result<bool> {
    Ok(world.is_a(enclosure, "container") && world.bool_prop("opaque", enclosure)?)
}

/// The nearest enclosing location from which `x` can reach out.
///
/// Rooms are their own. A thing normally inherits its location's
/// effective container; a container that is opaque, or openable and
/// closed, terminates the walk at itself.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn effective_container(world: &mut World, x: &Id) -> Result<Id> {
    enclosure_walk(world, x, blocks_reach)
}

/// The nearest enclosure past which light does not pass.
///
/// Same walk as [`effective_container`], but only opaque containers
/// terminate; open transparent ones pass through. Rooms terminate.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn visible_container(world: &mut World, x: &Id) -> Result<Id> {
    enclosure_walk(world, x, blocks_sight)
}

fn enclosure_walk(
    world: &mut World,
    x: &Id,
    blocks: fn(&mut World, &Id) -> Result<bool>,
) -> Result<Id> {
    let mut current = x.clone();
    loop {
        if world.is_a(&current, "room") {
            return Ok(current);
        }
        let Some((parent, _)) = world.location(&current) else {
            return Ok(current);
        };
        let parent = parent.clone();
        if blocks(world, &parent)? {
            return Ok(parent);
        }
        current = parent;
    }
}

/// True if the enclosure has light inside it.
///
/// A room contains light iff it makes light or any immediate content
/// contributes. A container or supporter contains light iff any of its
/// contents contributes. A person contains light iff they carry a
/// contributor.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn contains_light(world: &mut World, x: &Id) -> Result<bool> {
    if world.is_a(x, "room") {
        if world.bool_prop("makes_light", x)? {
            return Ok(true);
        }
        return any_contributes(world, x, false);
    }
    if world.is_a(x, "container") || world.is_a(x, "supporter") {
        return any_contributes(world, x, false);
    }
    if world.is_a(x, "person") {
        return any_contributes(world, x, true);
    }
    Ok(false)
}

fn any_contributes(world: &mut World, x: &Id, carried_only: bool) -> Result<bool> {
    let contents: Vec<Id> = world.located_at(x).to_vec();
    for o in contents {
        if carried_only {
            let carried = matches!(world.location(&o), Some((_, tag)) if tag.is_carried());
            if !carried {
                continue;
            }
        }
        if contributes_light(world, &o)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// True if the thing sheds light outward into its surroundings.
///
/// A thing contributes iff it makes light or an entity it is part of
/// contributes. A non-opaque container that contains light contributes.
/// A supporter that contains light contributes with no opacity test,
/// since a supporter's top is always visible; so does a person carrying
/// a contributor.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn contributes_light(world: &mut World, x: &Id) -> Result<bool> {
    if world.bool_prop("makes_light", x)? {
        return Ok(true);
    }
    if let Some((parent, LocTag::PartOf)) = world.location(x) {
        let parent = parent.clone();
        if contributes_light(world, &parent)? {
            return Ok(true);
        }
    }
    if world.is_a(x, "container") && !world.bool_prop("opaque", x)? && contains_light(world, x)? {
        return Ok(true);
    }
    if (world.is_a(x, "supporter") || world.is_a(x, "person")) && contains_light(world, x)? {
        return Ok(true);
    }
    Ok(false)
}

/// True if the actor can see `x`.
///
/// Holds when (a) `x` is owned, worn, or otherwise held by the actor;
/// (b) the visible containers of `x` and the actor coincide and that
/// container contains light; (c) `x` is part of something visible; or
/// (d) `x` is a door listed in the actor's visible container when that
/// container is a room.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn visible_to(world: &mut World, x: &Id, actor: &Id) -> Result<bool> {
    if x == actor {
        return Ok(true);
    }
    if let Some((holder, tag)) = world.location(x) {
        if holder == actor && tag.is_carried() {
            return Ok(true);
        }
        if tag == LocTag::PartOf {
            let parent = holder.clone();
            if visible_to(world, &parent, actor)? {
                return Ok(true);
            }
        }
    }

    let actor_scope = visible_container(world, actor)?;

    // The enclosures around the actor, up to the visible container, are
    // in sight whenever there is light to see them by. Without this the
    // accessibility chain rule could never satisfy accessible ⇒ visible.
    if contains(world, x, actor)
        && (x == &actor_scope || contains(world, &actor_scope, x))
        && contains_light(world, &actor_scope)?
    {
        return Ok(true);
    }

    if world.is_a(x, "door") {
        if world.is_a(&actor_scope, "room")
            && world.exits(&actor_scope).iter().any(|e| &e.to == x)
        {
            return Ok(true);
        }
        return Ok(false);
    }

    let x_scope = visible_container(world, x)?;
    Ok(x_scope == actor_scope && contains_light(world, &actor_scope)?)
}

/// True if the actor can get at `x`.
///
/// Similar to [`visible_to`] but over [`effective_container`], with two
/// extras: anything on the actor's location chain not behind a closed
/// openable is accessible (so `take box; enter box; close box` is not a
/// trap), and doors in the actor's effective-container room are
/// accessible. Accessible implies visible.
///
/// # Errors
///
/// Propagates property rule faults.
pub fn accessible_to(world: &mut World, x: &Id, actor: &Id) -> Result<bool> {
    if !visible_to(world, x, actor)? {
        return Ok(false);
    }
    if x == actor {
        return Ok(true);
    }
    if let Some((holder, tag)) = world.location(x) {
        if holder == actor && tag.is_carried() {
            return Ok(true);
        }
        if tag == LocTag::PartOf {
            let parent = holder.clone();
            if accessible_to(world, &parent, actor)? {
                return Ok(true);
            }
        }
    }

    // The actor's own enclosure chain, up to the first closed openable.
    let mut barrier = false;
    let mut current = actor.clone();
    while let Some((parent, _)) = world.location(&current) {
        let parent = parent.clone();
        if parent == *x && !barrier {
            return Ok(true);
        }
        if world.is_a(&parent, "container")
            && world.bool_prop("openable", &parent)?
            && !world.bool_prop("open", &parent)?
        {
            barrier = true;
        }
        current = parent;
    }

    let actor_scope = effective_container(world, actor)?;

    if world.is_a(x, "door") {
        return Ok(world.is_a(&actor_scope, "room")
            && world.exits(&actor_scope).iter().any(|e| &e.to == x));
    }

    let x_scope = effective_container(world, x)?;
    Ok(x_scope == actor_scope)
}
