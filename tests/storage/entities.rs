//! Integration tests for entity storage
//!
//! Tests entity spawning, destruction, generational indices, and stale reference detection.

use parlance_foundation::ErrorKind;
use parlance_storage::{EntityStore, ObjectRecord, World};

// =============================================================================
// Entity Spawning
// =============================================================================

#[test]
fn spawn_multiple_entities() {
    let mut store = EntityStore::new();
    let e1 = store.spawn();
    let e2 = store.spawn();
    let e3 = store.spawn();

    assert!(store.exists(e1) && store.exists(e2) && store.exists(e3));
    assert_eq!(store.len(), 3);
    assert_eq!([e1.index, e2.index, e3.index], [0, 1, 2]);
}

#[test]
fn iteration_is_in_index_order() {
    let mut store = EntityStore::new();
    let ids: Vec<_> = (0..4).map(|_| store.spawn()).collect();
    store.destroy(ids[1]).unwrap();
    let live: Vec<_> = store.iter().collect();
    assert_eq!(live, vec![ids[0], ids[2], ids[3]]);
}

// =============================================================================
// Entity Destruction
// =============================================================================

#[test]
fn destroyed_ids_go_stale() {
    let mut store = EntityStore::new();
    let entity = store.spawn();
    store.destroy(entity).unwrap();

    assert!(!store.exists(entity));
    assert!(store.is_empty());
    let err = store.validate(entity).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));
}

#[test]
fn indices_are_reused_with_a_new_generation() {
    let mut store = EntityStore::new();
    let old = store.spawn();
    store.destroy(old).unwrap();
    let new = store.spawn();

    assert_eq!(new.index, old.index);
    assert_ne!(new.generation, old.generation);
    assert!(store.exists(new));
    assert!(!store.exists(old));
}

#[test]
fn double_destroy_fails() {
    let mut store = EntityStore::new();
    let entity = store.spawn();
    store.destroy(entity).unwrap();
    assert!(store.destroy(entity).is_err());
}

#[test]
fn literal_index_lookup_tracks_liveness() {
    let world = World::new();
    let (world, lamp) = world.spawn(ObjectRecord::new("lamp"), None).unwrap();
    assert_eq!(world.find_by_index(lamp.index), Some(lamp));

    let world = world.destroy(lamp).unwrap();
    assert_eq!(world.find_by_index(lamp.index), None);
    assert!(world.get(lamp).is_err());
}
