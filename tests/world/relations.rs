use fathom_foundation::Id;
use fathom_world::{Direction, LocTag, World, WorldData};
use proptest::prelude::*;

fn id(s: &str) -> Id {
    Id::from(s)
}

fn rooms_and_things() -> World {
    let mut world = World::new();
    world.create("lobby", "room").unwrap();
    world.create("hall", "room").unwrap();
    world.create("player", "person").unwrap();
    world.create("ball", "thing").unwrap();
    world
}

#[test]
fn forward_edge_implies_reverse_membership() {
    let mut world = rooms_and_things();
    world.relate(&id("ball"), &id("lobby"), LocTag::ContainedBy).unwrap();
    world.relate(&id("player"), &id("lobby"), LocTag::ContainedBy).unwrap();

    for entity in world.entities() {
        if let Some((dest, _)) = world.location(&entity) {
            assert!(
                world.located_at(&dest.clone()).contains(&entity),
                "{entity} missing from reverse index"
            );
        }
    }
}

#[test]
fn relate_then_clear_restores_data() {
    let mut world = rooms_and_things();
    let before: WorldData = world.data.clone();

    world.relate(&id("ball"), &id("lobby"), LocTag::ContainedBy).unwrap();
    world.remove_obj(&id("ball"));

    assert_eq!(world.data, before);
}

#[test]
fn nothing_contains_itself() {
    let mut world = rooms_and_things();
    world.create("chest", "container").unwrap();
    world.relate(&id("chest"), &id("lobby"), LocTag::ContainedBy).unwrap();
    world.relate(&id("ball"), &id("chest"), LocTag::ContainedBy).unwrap();

    for entity in world.entities() {
        assert!(
            !fathom_world::queries::contains(&world, &entity, &entity),
            "{entity} contains itself"
        );
    }
}

#[test]
fn two_way_connection_has_inverse_exit() {
    let mut world = rooms_and_things();
    world.connect_rooms(&id("lobby"), Direction::Northeast, &id("hall"));

    let back = world
        .exits(&id("hall"))
        .iter()
        .find(|e| e.to == id("lobby"))
        .expect("hall leads back to lobby");
    assert_eq!(back.dir, Direction::Southwest);
}

#[test]
fn door_endpoints_and_involution() {
    let mut world = rooms_and_things();
    world.create("plain-door", "door").unwrap();
    world
        .place_door(&id("plain-door"), &id("lobby"), Direction::North, &id("hall"))
        .unwrap();

    let door = id("plain-door");
    assert_eq!(world.exits(&door).len(), 2);

    for room in [id("lobby"), id("hall")] {
        let other = world
            .data
            .exits
            .door_other_side_from(&door, &room)
            .expect("door has another side");
        let back = world
            .data
            .exits
            .door_other_side_from(&door, other)
            .expect("and a way back");
        assert_eq!(back, &room);
    }
}

#[test]
fn doors_rejected_from_location() {
    let mut world = rooms_and_things();
    world.create("plain-door", "door").unwrap();
    assert!(world
        .relate(&id("plain-door"), &id("lobby"), LocTag::ContainedBy)
        .is_err());
}

#[test]
fn rooms_rejected_as_location_sources() {
    let mut world = rooms_and_things();
    assert!(world.relate(&id("hall"), &id("lobby"), LocTag::ContainedBy).is_err());
}

proptest! {
    /// Placing things anywhere and then clearing them all leaves the
    /// relation exactly as it started.
    #[test]
    fn placements_unwind_cleanly(moves in proptest::collection::vec((0usize..4, 0usize..2), 1..30)) {
        let mut world = rooms_and_things();
        for suffix in 0..4 {
            world.create(format!("item-{suffix}").as_str(), "thing").unwrap();
        }
        let before = world.data.clone();

        let rooms = [id("lobby"), id("hall")];
        for (item, room) in &moves {
            let item = id(&format!("item-{item}"));
            world.relate(&item, &rooms[*room], LocTag::ContainedBy).unwrap();
        }
        for suffix in 0..4 {
            world.remove_obj(&id(&format!("item-{suffix}")));
        }

        prop_assert_eq!(world.data, before);
    }
}
