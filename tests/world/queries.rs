use fathom_foundation::{Id, Value};
use fathom_world::queries::{
    accessible_to, contains_light, effective_container, visible_container, visible_to,
};
use fathom_world::{LocTag, World};

fn id(s: &str) -> Id {
    Id::from(s)
}

fn obj(s: &str) -> Value {
    Value::Id(Id::from(s))
}

/// A lit lobby holding the player, a table, a glass cabinet, an opaque
/// crate, and a few props.
fn furnished() -> World {
    let mut world = World::new();
    world.create("lobby", "room").unwrap();
    world.create("player", "person").unwrap();
    world.create("table", "supporter").unwrap();
    world.create("cabinet", "container").unwrap();
    world.create("crate", "container").unwrap();
    world.create("ball", "thing").unwrap();
    world.create("coin", "thing").unwrap();
    world.create("lamp", "thing").unwrap();

    world.set_player(&id("player"));
    world.set("makes_light", &[obj("lobby")], true);
    world.set("openable", &[obj("cabinet")], true);
    world.set("opaque", &[obj("cabinet")], false);
    world.set("openable", &[obj("crate")], true);

    for thing in ["player", "table", "cabinet", "crate", "ball", "lamp"] {
        world.relate(&id(thing), &id("lobby"), LocTag::ContainedBy).unwrap();
    }
    world.relate(&id("coin"), &id("table"), LocTag::SupportedBy).unwrap();
    world
}

#[test]
fn rooms_are_their_own_enclosures() {
    let mut world = furnished();
    assert_eq!(effective_container(&mut world, &id("lobby")).unwrap(), id("lobby"));
    assert_eq!(visible_container(&mut world, &id("lobby")).unwrap(), id("lobby"));
}

#[test]
fn accessibility_implies_visibility_everywhere() {
    let mut world = furnished();
    // Scatter things into every kind of enclosure first.
    world.relate(&id("ball"), &id("cabinet"), LocTag::ContainedBy).unwrap();
    world.relate(&id("lamp"), &id("crate"), LocTag::ContainedBy).unwrap();

    let player = id("player");
    for entity in world.entities() {
        if accessible_to(&mut world, &entity, &player).unwrap() {
            assert!(
                visible_to(&mut world, &entity, &player).unwrap(),
                "{entity} accessible but not visible"
            );
        }
    }
}

#[test]
fn closed_glass_cabinet_shows_but_withholds() {
    let mut world = furnished();
    world.relate(&id("ball"), &id("cabinet"), LocTag::ContainedBy).unwrap();

    let player = id("player");
    let ball = id("ball");
    assert!(visible_to(&mut world, &ball, &player).unwrap());
    assert!(!accessible_to(&mut world, &ball, &player).unwrap());

    world.set("open", &[obj("cabinet")], true);
    assert!(accessible_to(&mut world, &ball, &player).unwrap());
}

#[test]
fn opaque_crate_hides_contents_entirely() {
    let mut world = furnished();
    world.relate(&id("ball"), &id("crate"), LocTag::ContainedBy).unwrap();

    let player = id("player");
    let ball = id("ball");
    assert!(!visible_to(&mut world, &ball, &player).unwrap());
    assert!(!accessible_to(&mut world, &ball, &player).unwrap());

    // Opening the crate restores sight and reach through (e): the walk
    // no longer stops at a closed lid, but opacity still blocks sight
    // from outside, so contents stay unseen until the walk passes.
    world.set("open", &[obj("crate")], true);
    world.set("opaque", &[obj("crate")], false);
    assert!(visible_to(&mut world, &ball, &player).unwrap());
    assert!(accessible_to(&mut world, &ball, &player).unwrap());
}

#[test]
fn supporter_tops_always_in_scope() {
    let mut world = furnished();
    let player = id("player");
    let coin = id("coin");
    assert!(visible_to(&mut world, &coin, &player).unwrap());
    assert!(accessible_to(&mut world, &coin, &player).unwrap());
}

#[test]
fn held_things_stay_visible_in_darkness() {
    let mut world = furnished();
    world.set("makes_light", &[obj("lobby")], false);
    world.relate(&id("ball"), &id("player"), LocTag::OwnedBy).unwrap();

    let player = id("player");
    assert!(visible_to(&mut world, &id("ball"), &player).unwrap());
    assert!(!visible_to(&mut world, &id("table"), &player).unwrap());
}

#[test]
fn light_escapes_glass_but_not_wood() {
    let mut world = furnished();
    world.set("makes_light", &[obj("lobby")], false);
    world.set("makes_light", &[obj("lamp")], true);

    // Lamp inside the opaque crate: the lobby goes dark.
    world.relate(&id("lamp"), &id("crate"), LocTag::ContainedBy).unwrap();
    assert!(!contains_light(&mut world, &id("lobby")).unwrap());
    assert!(contains_light(&mut world, &id("crate")).unwrap());

    // Lamp inside the glass cabinet: the lobby is lit again.
    world.relate(&id("lamp"), &id("cabinet"), LocTag::ContainedBy).unwrap();
    assert!(contains_light(&mut world, &id("lobby")).unwrap());
}

#[test]
fn carried_lamp_lights_the_room() {
    let mut world = furnished();
    world.set("makes_light", &[obj("lobby")], false);
    world.set("makes_light", &[obj("lamp")], true);
    world.relate(&id("lamp"), &id("player"), LocTag::OwnedBy).unwrap();

    assert!(contains_light(&mut world, &id("lobby")).unwrap());
}

#[test]
fn lamp_on_table_lights_the_room() {
    let mut world = furnished();
    world.set("makes_light", &[obj("lobby")], false);
    world.set("makes_light", &[obj("lamp")], true);
    world.relate(&id("lamp"), &id("table"), LocTag::SupportedBy).unwrap();

    assert!(contains_light(&mut world, &id("lobby")).unwrap());
}

#[test]
fn part_of_shares_the_whole_fate() {
    let mut world = furnished();
    world.create("handle", "thing").unwrap();
    world.relate(&id("handle"), &id("crate"), LocTag::PartOf).unwrap();

    let player = id("player");
    assert!(visible_to(&mut world, &id("handle"), &player).unwrap());
    assert!(accessible_to(&mut world, &id("handle"), &player).unwrap());
}

#[test]
fn doors_in_scope_from_their_rooms() {
    let mut world = furnished();
    world.create("hall", "room").unwrap();
    world.create("oak-door", "door").unwrap();
    world
        .place_door(
            &id("oak-door"),
            &id("lobby"),
            fathom_world::Direction::North,
            &id("hall"),
        )
        .unwrap();

    let player = id("player");
    assert!(visible_to(&mut world, &id("oak-door"), &player).unwrap());
    assert!(accessible_to(&mut world, &id("oak-door"), &player).unwrap());

    // Not from an unrelated room.
    world.create("troll", "person").unwrap();
    world.create("cave", "room").unwrap();
    world.set("makes_light", &[obj("cave")], true);
    world.relate(&id("troll"), &id("cave"), LocTag::ContainedBy).unwrap();
    assert!(!visible_to(&mut world, &id("oak-door"), &id("troll")).unwrap());
}
