use fathom_foundation::Id;
use fathom_world::World;

#[test]
fn every_entity_is_a_its_own_kind() {
    let mut world = World::new();
    world.create("lobby", "room").unwrap();
    world.create("chest", "container").unwrap();
    world.create("troll", "person").unwrap();
    world.create("sky", "backdrop").unwrap();

    for id in world.entities() {
        let kind = world.kind(&id).cloned().expect("entity has a kind edge");
        assert!(
            world.is_a(&id, kind.as_str()),
            "{id} should be a {kind}"
        );
    }
}

#[test]
fn thing_subkinds_are_things() {
    let mut world = World::new();
    for (id, kind) in [
        ("a-door", "door"),
        ("a-box", "container"),
        ("a-table", "supporter"),
        ("a-troll", "person"),
        ("a-sky", "backdrop"),
    ] {
        world.create(id, kind).unwrap();
        assert!(world.is_a(&Id::from(id), "thing"), "{id} should be a thing");
        assert!(world.is_a(&Id::from(id), "kind"));
        assert!(!world.is_a(&Id::from(id), "room"));
    }
}

#[test]
fn author_kinds_slot_into_the_tree() {
    let mut world = World::new();
    world.register_kind("treasure", "thing").unwrap();
    world.register_kind("crown-jewel", "treasure").unwrap();
    world.create("ruby-crown", "crown-jewel").unwrap();

    let crown = Id::from("ruby-crown");
    assert!(world.is_a(&crown, "crown-jewel"));
    assert!(world.is_a(&crown, "treasure"));
    assert!(world.is_a(&crown, "thing"));
}

#[test]
fn duplicate_ids_rejected() {
    let mut world = World::new();
    world.create("ball", "thing").unwrap();
    assert!(world.create("ball", "thing").is_err());
}
