//! Saving a played world and resuming from the snapshot.

use parlance::foundation::{EntityLookup, ErrorKind, Surroundings};
use parlance::runtime::Session;
use parlance::runtime::serialize::{from_bytes, load_from_file, save_to_file, to_bytes};

fn played() -> Session {
    let mut session = Session::demo().unwrap();
    session.handle("take lamp");
    session.handle("north");
    session
}

#[test]
fn resumed_session_continues_where_it_left_off() {
    let before = played();
    let bytes = to_bytes(before.world()).unwrap();

    let mut after = Session::demo().unwrap();
    after.set_world(from_bytes(&bytes).unwrap());

    let player = after.player();
    let room = after.world().location(player).unwrap();
    assert_eq!(after.world().display_name(room), "Garden");
    assert_eq!(after.handle("i"), vec!["You are carrying brass lamp."]);
    assert_eq!(after.handle("rub brass lamp"), vec!["You rub the brass lamp. Nothing happens."]);
}

#[test]
fn snapshot_preserves_entity_handles() {
    let session = played();
    let restored = from_bytes(&to_bytes(session.world()).unwrap()).unwrap();
    assert_eq!(restored.entity_count(), session.world().entity_count());
    for entity in session.world().entities() {
        assert!(restored.exists(entity));
        assert_eq!(restored.location(entity), session.world().location(entity));
        assert_eq!(restored.contents(entity), session.world().contents(entity));
    }
}

#[test]
fn snapshot_file_round_trip() {
    let path = std::env::temp_dir().join(format!("parlance-snapshot-{}.msgpack", std::process::id()));
    let session = played();
    save_to_file(session.world(), &path).unwrap();
    let loaded = load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut resumed = Session::demo().unwrap();
    resumed.set_world(loaded);
    assert_eq!(resumed.handle("drop lamp"), vec!["You drop the brass lamp."]);
}

#[test]
fn bad_snapshots_are_rejected() {
    let err = from_bytes(b"definitely not a world").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Serialization(_)));

    let missing = std::env::temp_dir().join("parlance-no-such-snapshot.msgpack");
    let err = load_from_file(&missing).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}
