//! Integration tests for World state management
//!
//! Tests world immutability, containment, attributes, and the collaborator
//! traits the dispatcher reads through.

use parlance_foundation::{Category, EntityId, EntityLookup, ErrorKind, Surroundings, Value};
use parlance_storage::{ObjectRecord, World};

struct Fixture {
    world: World,
    hall: EntityId,
    bob: EntityId,
    bag: EntityId,
    apple: EntityId,
}

fn fixture() -> Fixture {
    let world = World::new();
    let (world, hall) = world
        .spawn(
            ObjectRecord::new("Hall")
                .with_class("room")
                .with_category("room")
                .with_description("A long hall."),
            None,
        )
        .unwrap();
    let (world, bob) = world
        .spawn(ObjectRecord::new("Bob").with_class("player"), Some(hall))
        .unwrap();
    let (world, bag) = world
        .spawn(
            ObjectRecord::new("leather bag")
                .with_alias("bag")
                .with_category("thing")
                .with_category("container"),
            Some(bob),
        )
        .unwrap();
    let (world, apple) = world
        .spawn(
            ObjectRecord::new("apple")
                .with_category("thing")
                .with_attribute("bites", Value::Int(0)),
            Some(bag),
        )
        .unwrap();
    Fixture {
        world,
        hall,
        bob,
        bag,
        apple,
    }
}

// =============================================================================
// World Immutability
// =============================================================================

#[test]
fn world_starts_empty() {
    let world = World::new();
    assert_eq!(world.entity_count(), 0);
    assert_eq!(world.entities().count(), 0);
}

#[test]
fn spawn_returns_new_world() {
    let world1 = World::new();
    let (world2, entity) = world1.spawn(ObjectRecord::new("rock"), None).unwrap();
    assert!(!world1.exists(entity));
    assert!(world2.exists(entity));
}

#[test]
fn spawn_into_missing_location_fails() {
    let world = World::new();
    let missing = EntityId::new(9, 1);
    assert!(world.spawn(ObjectRecord::new("rock"), Some(missing)).is_err());
}

#[test]
fn attributes_are_copy_on_write() {
    let f = fixture();
    let bitten = f.world.set_attribute(f.apple, "bites", Value::Int(1)).unwrap();
    assert_eq!(bitten.attribute(f.apple, "bites"), Some(&Value::Int(1)));
    assert_eq!(f.world.attribute(f.apple, "bites"), Some(&Value::Int(0)));
}

// =============================================================================
// Containment
// =============================================================================

#[test]
fn nested_containment() {
    let f = fixture();
    assert_eq!(f.world.location(f.apple), Some(f.bag));
    assert_eq!(f.world.location(f.bag), Some(f.bob));
    assert_eq!(f.world.location(f.hall), None);
    assert_eq!(f.world.contents(f.hall), vec![f.bob]);
}

#[test]
fn moving_out_of_everything() {
    let f = fixture();
    let world = f.world.move_to(f.bag, None).unwrap();
    assert_eq!(world.location(f.bag), None);
    assert!(world.contents(f.bob).is_empty());
    assert_eq!(world.location(f.apple), Some(f.bag));
}

#[test]
fn containers_cannot_swallow_their_holders() {
    let f = fixture();
    let err = f.world.move_to(f.bob, Some(f.apple)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidMove { .. }));
}

#[test]
fn destroy_spills_contents() {
    let f = fixture();
    let world = f.world.destroy(f.bag).unwrap();
    assert_eq!(world.location(f.apple), Some(f.bob));
    assert_eq!(world.contents(f.bob), vec![f.apple]);
    assert_eq!(world.entity_count(), 3);
}

// =============================================================================
// Collaborator Traits
// =============================================================================

#[test]
fn surroundings() {
    let f = fixture();
    assert_eq!(f.world.provider_class(f.bob).as_deref(), Some("player"));
    assert_eq!(f.world.provider_class(f.apple), None);
    assert_eq!(f.world.describe(f.hall).as_deref(), Some("A long hall."));
    assert_eq!(f.world.property(f.apple, "bites"), Some(Value::Int(0)));
    assert_eq!(f.world.property(f.apple, "color"), None);
}

#[test]
fn lookup_from_the_requester() {
    let f = fixture();
    let thing = Category::new("thing");
    assert_eq!(f.world.match_object(f.bob, "bag", Some(&thing)), vec![f.bag]);
    assert_eq!(f.world.match_object(f.bob, "me", None), vec![f.bob]);
    assert_eq!(f.world.match_object(f.bob, "here", None), vec![f.hall]);
    // The apple is inside the bag, out of direct reach.
    assert!(f.world.match_object(f.bob, "apple", None).is_empty());
}

#[test]
fn match_among_explicit_candidates() {
    let f = fixture();
    let contents = f.world.contents(f.bag);
    assert_eq!(f.world.match_among("app", &contents, None), vec![f.apple]);
    let literal = format!("#{}", f.apple.index);
    assert_eq!(f.world.match_among(&literal, &contents, None), vec![f.apple]);
    assert!(f
        .world
        .match_among("apple", &contents, Some(&Category::new("container")))
        .is_empty());
}

#[test]
fn validity_and_names() {
    let f = fixture();
    assert!(f.world.is_valid(f.bag, Some(&Category::new("CONTAINER"))));
    assert!(!f.world.is_valid(f.bob, Some(&Category::new("thing"))));
    assert_eq!(f.world.display_name(f.bag), "leather bag");
    let stale = EntityId::new(f.apple.index, f.apple.generation + 2);
    assert!(!f.world.is_valid(stale, None));
}
