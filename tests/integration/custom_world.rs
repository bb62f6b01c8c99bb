//! The demo catalog running over a world built from scratch.

use parlance::dispatch::DispatchConfig;
use parlance::foundation::{EntityId, Surroundings, Value};
use parlance::runtime::Session;
use parlance::runtime::demo::{self, LAMP_CLASS, PLAYER_CLASS, ROOM_CLASS};
use parlance::storage::{ObjectRecord, World};

struct Kitchen {
    world: World,
    cook: EntityId,
    kitchen: EntityId,
    pantry: EntityId,
}

fn kitchen() -> Kitchen {
    let world = World::new();
    let (world, kitchen) = world
        .spawn(
            ObjectRecord::new("Kitchen")
                .with_class(ROOM_CLASS)
                .with_category("room")
                .with_description("Copper pans hang over a cold stove."),
            None,
        )
        .unwrap();
    let (world, pantry) = world
        .spawn(
            ObjectRecord::new("Pantry")
                .with_class(ROOM_CLASS)
                .with_category("room"),
            None,
        )
        .unwrap();
    let (world, _) = world
        .spawn(
            ObjectRecord::new("west")
                .with_alias("w")
                .with_category("exit")
                .with_attribute("destination", Value::EntityRef(pantry)),
            Some(kitchen),
        )
        .unwrap();
    let (world, cook) = world
        .spawn(
            ObjectRecord::new("Cook")
                .with_class(PLAYER_CLASS)
                .with_category("player"),
            Some(kitchen),
        )
        .unwrap();
    let (world, _) = world
        .spawn(
            ObjectRecord::new("oil lamp")
                .with_alias("lamp")
                .with_class(LAMP_CLASS)
                .with_category("thing"),
            Some(kitchen),
        )
        .unwrap();
    Kitchen {
        world,
        cook,
        kitchen,
        pantry,
    }
}

fn session(k: &Kitchen) -> Session {
    Session::new(k.world.clone(), demo::catalog(), k.cook)
}

#[test]
fn classes_apply_to_new_objects() {
    let k = kitchen();
    let mut session = session(&k);

    let view = session.handle("look");
    assert!(view[0].starts_with("Kitchen\nCopper pans hang over a cold stove.\n"));
    assert!(view[0].contains("Exits: west."));

    assert_eq!(session.handle("light lamp"), vec!["The oil lamp flickers to life."]);
    assert_eq!(session.handle("rub lamp"), vec!["Command Invalid."]);
    assert_eq!(session.handle("take lamp"), vec!["You take the oil lamp."]);
    assert_eq!(session.handle("rub lamp"), vec!["You rub the oil lamp. Nothing happens."]);
}

#[test]
fn room_hook_follows_new_exits() {
    let k = kitchen();
    let mut session = session(&k);
    session.handle("w");
    assert_eq!(session.world().location(k.cook), Some(k.pantry));
    assert_eq!(session.handle("w"), vec!["Command Invalid."]);
}

#[test]
fn sessions_do_not_share_worlds() {
    let k = kitchen();
    let mut first = session(&k);
    let second = session(&k);
    first.handle("west");
    assert_eq!(first.world().location(k.cook), Some(k.pantry));
    assert_eq!(second.world().location(k.cook), Some(k.kitchen));
    assert_eq!(k.world.location(k.cook), Some(k.kitchen));
}

#[test]
fn dispatch_config_reaches_the_session() {
    let k = kitchen();
    let config = DispatchConfig::new()
        .with_switch_separator('+')
        .with_usage_prefix("Usage: ");
    let mut session = session(&k).with_config(config);

    assert!(session.handle("wait+quiet").is_empty());
    assert_eq!(session.handle("wait/quiet"), vec!["Command Invalid."]);
    assert_eq!(session.handle("say"), vec!["Usage: say <message>"]);
    assert!(session
        .available_commands()
        .iter()
        .all(|line| line.starts_with("Usage: ")));
}

#[test]
fn command_words_track_what_is_in_reach() {
    let k = kitchen();
    let mut session = session(&k);
    assert!(session.command_words().contains(&"light".to_string()));
    session.handle("west");
    assert!(!session.command_words().contains(&"light".to_string()));
    assert!(session.command_words().contains(&"look".to_string()));
}
