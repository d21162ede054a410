//! The description engine.
//!
//! Room, object, and inventory rendering are activities on the world,
//! so game content can replace or decorate any of them. The defaults
//! registered here produce a heading, a description paragraph, and a
//! terse listing of notable contents grouped by their immediate
//! sub-location.

use fathom_dispatch::Method;
use fathom_foundation::{Error, Id, Result, Value};
use fathom_text::TextSink;
use fathom_world::prose::{self, Article};
use fathom_world::{queries, LocTag, World};

/// The canned prose for a lightless scene.
pub const DARKNESS_HEADING: &str = "Darkness";
const DARKNESS_BODY: &str = "It is pitch dark, and {we} can't see a thing.";

fn first_id(args: &[Value]) -> Result<Id> {
    args.first()
        .and_then(Value::as_id)
        .cloned()
        .ok_or_else(|| Error::internal("describe activity needs an id argument"))
}

/// Installs the default describe methods onto the world's activities.
pub fn install(world: &mut World) {
    world.prepend_activity_rule(
        "get_notable_objects",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let holder = first_id(args)?;
            notable_objects(w, &holder)
        }),
    );

    world.prepend_activity_rule(
        "describe_room",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let loc = first_id(args)?;
            describe_room(w, &loc)?;
            Ok(Value::Bool(true))
        }),
    );

    world.prepend_activity_rule(
        "describe_object",
        Method::new("default", |w: &mut World, args: &Vec<Value>, _| {
            let obj = first_id(args)?;
            describe_object(w, &obj)?;
            Ok(Value::Bool(true))
        }),
    );

    world.prepend_activity_rule(
        "describe_inventory",
        Method::new("default", |w: &mut World, _: &Vec<Value>, _| {
            describe_inventory(w)?;
            Ok(Value::Bool(true))
        }),
    );
}

/// Builds the default `{o, n}` pair list for a holder's contents.
///
/// `n = 0` suppresses an entry; unreported things and the acting
/// entity come back suppressed.
fn notable_objects(world: &mut World, holder: &Id) -> Result<Value> {
    let actor = world.actor();
    let contents: Vec<Id> = world.located_at(holder).to_vec();
    let mut pairs = Vec::new();
    for o in contents {
        if let Some((_, LocTag::PartOf)) = world.location(&o) {
            continue;
        }
        let n = if o == actor || !world.bool_prop("reported", &o)? {
            0
        } else {
            1
        };
        let mut pair = im::HashMap::new();
        pair.insert(Value::from("o"), Value::Id(o));
        pair.insert(Value::from("n"), Value::Int(n));
        pairs.push(Value::Map(pair));
    }
    Ok(Value::List(pairs.into_iter().collect()))
}

/// The ids whose pairs survived suppression, via the activity so
/// author decorations apply.
fn notable_contents(world: &mut World, holder: &Id) -> Result<Vec<Id>> {
    let pairs = world.run_activity("get_notable_objects", vec![Value::Id(holder.clone())])?;
    let mut out = Vec::new();
    if let Some(list) = pairs.as_list() {
        for pair in list {
            let Some(map) = pair.as_map() else { continue };
            let suppressed = map
                .get(&Value::from("n"))
                .and_then(Value::as_int)
                .unwrap_or(0)
                <= 0;
            if suppressed {
                continue;
            }
            if let Some(o) = map.get(&Value::from("o")).and_then(Value::as_id) {
                out.push(o.clone());
            }
        }
    }
    Ok(out)
}

/// Renders the actor's scene: the room description, or the fixed
/// darkness message when the visible container holds no light.
///
/// # Errors
///
/// Propagates activity and property faults.
pub fn describe_location(world: &mut World) -> Result<()> {
    let actor = world.actor();
    let scene = queries::visible_container(world, &actor)?;
    if queries::contains_light(world, &scene)? {
        world.run_activity("describe_room", vec![Value::Id(scene)])?;
    } else {
        darkness(world)?;
    }
    Ok(())
}

/// The fixed darkness rendering.
///
/// # Errors
///
/// Propagates sink faults.
pub fn darkness(world: &mut World) -> Result<()> {
    let sink = world.sink();
    sink.borrow_mut().enter_block("heading");
    sink.borrow_mut().write_text(DARKNESS_HEADING);
    sink.borrow_mut().leave();
    world.para();
    world.write(DARKNESS_BODY)?;
    world.para();
    Ok(())
}

fn describe_room(world: &mut World, loc: &Id) -> Result<()> {
    let heading = prose::display_name(world, loc)?;
    let sink = world.sink();
    sink.borrow_mut().enter_block("heading");
    sink.borrow_mut().write_text(&capitalize(&heading));
    sink.borrow_mut().leave();
    world.para();

    if let Some(description) = world.str_prop("description", loc)? {
        world.write(&description)?;
        world.para();
    }

    list_contents(world, loc, true)?;
    Ok(())
}

/// The terse content listing, grouped by immediate sub-location and
/// recursing through open containers and supporters.
fn list_contents(world: &mut World, holder: &Id, top_level: bool) -> Result<()> {
    let items = notable_contents(world, holder)?;
    if items.is_empty() {
        return Ok(());
    }

    if top_level {
        world.write("{We} {can} see ")?;
    } else if world.is_a(holder, "supporter") {
        world.write(&format!("On [the '{holder}'] {{we}} also {{see|bob}} "))?;
    } else {
        world.write(&format!("In [the '{holder}'] {{we}} {{see|bob}} "))?;
    }

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            let sep = if i + 1 == items.len() { " and " } else { ", " };
            world.write(sep)?;
        }
        prose::write_object_ref(world, item, Article::Indefinite, false)?;
        if closed_opaque_container(world, item)? {
            world.write(" (which is closed)")?;
        }
    }
    world.write(if top_level { " here." } else { "." })?;
    world.para();

    // Sub-locations contribute their own sentences.
    for item in items {
        if open_to_view(world, &item)? && !notable_contents(world, &item)?.is_empty() {
            list_contents(world, &item, false)?;
        }
    }
    Ok(())
}

fn closed_opaque_container(world: &mut World, o: &Id) -> Result<bool> {
    Ok(world.is_a(o, "container")
        && world.bool_prop("opaque", o)?
        && world.bool_prop("openable", o)?
        && !world.bool_prop("open", o)?)
}

/// Can the contents of this holder be seen from outside?
fn open_to_view(world: &mut World, o: &Id) -> Result<bool> {
    if world.is_a(o, "supporter") {
        return Ok(true);
    }
    if world.is_a(o, "container") {
        if !world.bool_prop("opaque", o)? {
            return Ok(true);
        }
        return Ok(world.bool_prop("open", o)? || !world.bool_prop("openable", o)?);
    }
    Ok(false)
}

fn describe_object(world: &mut World, obj: &Id) -> Result<()> {
    match world.str_prop("description", obj)? {
        Some(description) => world.write(&description)?,
        None => {
            world.write("{We} {see|bob} nothing special about ")?;
            prose::the(world, obj)?;
            world.write(".")?;
        }
    }
    world.para();

    if world.is_a(obj, "container") {
        if open_to_view(world, obj)? {
            let contents = notable_contents(world, obj)?;
            if !contents.is_empty() {
                list_contents(world, obj, false)?;
            }
        } else {
            prose::the_cap(world, obj)?;
            world.write(" is closed.")?;
            world.para();
        }
    }
    if world.bool_prop("switchable", obj)? {
        prose::the_cap(world, obj)?;
        let state = if world.bool_prop("switched_on", obj)? {
            " is switched on."
        } else {
            " is switched off."
        };
        world.write(state)?;
        world.para();
    }
    Ok(())
}

fn describe_inventory(world: &mut World) -> Result<()> {
    let actor = world.actor();
    let carried: Vec<(Id, LocTag)> = world
        .located_at(&actor)
        .to_vec()
        .into_iter()
        .filter_map(|o| {
            let tag = world.location(&o).map(|(_, t)| t)?;
            tag.is_carried().then_some((o, tag))
        })
        .collect();

    if carried.is_empty() {
        world.write("{We} {are|bob} carrying nothing.")?;
        world.para();
        return Ok(());
    }

    world.write("{We} {are|bob} carrying:")?;
    world.para();
    for (o, tag) in carried {
        world.write("  ")?;
        prose::a(world, &o)?;
        if tag == LocTag::WornBy {
            world.write(" (worn)")?;
        }
        world.para();
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
