//! The standard properties, their defaults, and the stock activities.
//!
//! Defaults are prepended rule methods: the fallback of last resort,
//! which explicit data and any later-registered author rule override.

use fathom_dispatch::Method;
use fathom_foundation::{Error, Id, Result, Value};

use crate::queries;
use crate::relation::LocTag;
use crate::world::World;

/// Properties declared with no default; a miss simply reads as absent.
const BARE_PROPERTIES: &[&str] = &[
    "name",
    "description",
    "matching_key",
    "region",
    "backdrop_locations",
];

/// Boolean properties that simply default to `false`.
const FALSE_PROPERTIES: &[&str] = &[
    "open",
    "openable",
    "locked",
    "lockable",
    "switched_on",
    "switchable",
    "wearable",
    "edible",
    "enterable",
    "makes_light",
    "visited",
];

/// Activities the engine layers its description defaults onto.
const ACTIVITIES: &[&str] = &[
    "describe_room",
    "describe_object",
    "describe_inventory",
    "get_notable_objects",
    "move_backdrops",
];

fn first_id(args: &[Value]) -> Result<Id> {
    args.first()
        .and_then(Value::as_id)
        .cloned()
        .ok_or_else(|| Error::internal("property rule needs an id argument"))
}

/// Installs the standard properties and activities into a world.
pub fn install(world: &mut World) {
    for prop in BARE_PROPERTIES {
        world.declare_property(prop);
    }

    for prop in FALSE_PROPERTIES {
        world.prepend_prop_rule(prop, Method::new("default", |_, _, _| Ok(Value::Bool(false))));
    }

    world.prepend_prop_rule(
        "reported",
        Method::new("default", |_, _, _| Ok(Value::Bool(true))),
    );

    world.prepend_prop_rule(
        "opaque",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let o = first_id(args)?;
            Ok(Value::Bool(w.is_a(&o, "container")))
        }),
    );

    world.prepend_prop_rule(
        "proper_named",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let o = first_id(args)?;
            Ok(Value::Bool(w.is_a(&o, "person")))
        }),
    );

    world.prepend_prop_rule(
        "fixed_in_place",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let o = first_id(args)?;
            Ok(Value::Bool(w.is_a(&o, "backdrop")))
        }),
    );

    world.prepend_prop_rule(
        "pronoun",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let o = first_id(args)?;
            let pronoun = if w.is_a(&o, "person") { "they" } else { "it" };
            Ok(Value::from(pronoun))
        }),
    );

    world.prepend_prop_rule(
        "indefinite_article",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let o = first_id(args)?;
            let name = crate::prose::display_name(w, &o)?;
            let vowel = name
                .chars()
                .next()
                .is_some_and(|c| "aeiouAEIOU".contains(c));
            Ok(Value::from(if vowel { "an" } else { "a" }))
        }),
    );

    // Dictionary words derive from the display name: the last word is
    // the noun, the rest are adjectives.
    world.prepend_prop_rule(
        "words",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let o = first_id(args)?;
            let name = crate::prose::display_name(w, &o)?;
            let words: Vec<&str> = name
                .split_whitespace()
                .filter(|word| !matches!(*word, "a" | "an" | "the" | "some"))
                .collect();
            let list: Vec<Value> = words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    if i + 1 == words.len() {
                        Value::from(format!("@{word}"))
                    } else {
                        Value::from(*word)
                    }
                })
                .collect();
            Ok(Value::from(list))
        }),
    );

    // A room is known once visited.
    world.prepend_prop_rule(
        "known",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let room = first_id(args)?;
            let actor = args
                .get(1)
                .and_then(Value::as_id)
                .cloned()
                .ok_or_else(|| Error::internal("known needs (room, actor)"))?;
            Ok(Value::Bool(w.bool_prop2("visited", &room, &actor)?))
        }),
    );

    for activity in ACTIVITIES {
        world.declare_activity(activity);
    }

    world.prepend_activity_rule(
        "move_backdrops",
        Method::new("default", |w: &mut World, _: &Vec<Value>, _| {
            move_backdrops(w)?;
            Ok(Value::Bool(true))
        }),
    );
}

/// Repositions every backdrop whose declared location list names the
/// actor's room or a region that (transitively) holds it.
fn move_backdrops(world: &mut World) -> Result<()> {
    let actor = world.actor();
    let Some(room) = queries::room_of(world, &actor) else {
        return Ok(());
    };

    // The room plus its region chain.
    let mut scope = vec![Value::Id(room.clone())];
    let mut current = room.clone();
    while let Some(region) = world.id_prop("region", &current)? {
        scope.push(Value::Id(region.clone()));
        current = region;
    }

    for backdrop in world.entities_of_kind("backdrop") {
        let places = world.list_prop("backdrop_locations", &backdrop)?;
        if places.iter().any(|p| scope.contains(p)) {
            world.relate(&backdrop, &room, LocTag::ContainedBy)?;
        }
    }
    Ok(())
}
