//! Tests for provider classes, inheritance, and registry rebuilding.

use parlance_dispatch::{
    Audience, CommandDescriptor, Dispatch, Dispatcher, Effect, Lock, ProviderCatalog,
    ProviderClass, ProviderLevel, ResolvedInvocation,
};
use parlance_foundation::{EntityId, Environment};
use parlance_storage::{ObjectRecord, World};

use crate::fixtures::open;

fn reply(text: &'static str) -> CommandDescriptor {
    open(text).with_run(move |inv: &ResolvedInvocation, _env: &dyn Environment| {
        Ok(vec![Effect::Message {
            to: inv.requester(),
            text: text.to_string(),
        }])
    })
}

fn base() -> ProviderClass {
    ProviderClass::new("thing").with_level(
        ProviderLevel::new()
            .with_public(reply("look"))
            .with_public(reply("touch")),
    )
}

/// A classless actor next to a widget of `class`.
fn world(class: &str) -> (World, EntityId) {
    let (world, room) = World::new().spawn(ObjectRecord::new("Room"), None).unwrap();
    let (world, actor) = world.spawn(ObjectRecord::new("Actor"), Some(room)).unwrap();
    let (world, _) = world
        .spawn(ObjectRecord::new("widget").with_class(class), Some(room))
        .unwrap();
    (world, actor)
}

fn output(catalog: &ProviderCatalog, world: &World, actor: EntityId, line: &str) -> String {
    let dispatch = Dispatcher::new(catalog, world).resolve(actor, line).unwrap();
    match dispatch.execute(world).unwrap().as_slice() {
        [Effect::Message { text, .. }] => text.clone(),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn subclass_overrides_by_key() {
    // The override answers differently but keeps the key "touch".
    let gadget = ProviderClass::new("gadget")
        .with_level(
            ProviderLevel::new().with_public(
                open("poke")
                    .with_key("touch")
                    .with_run(|inv: &ResolvedInvocation, _env: &dyn Environment| {
                        Ok(vec![Effect::Message {
                            to: inv.requester(),
                            text: "bzzt".into(),
                        }])
                    }),
            ),
        )
        .extending(&base());
    let catalog = ProviderCatalog::new().with_class(gadget);
    let (world, actor) = world("gadget");

    assert_eq!(output(&catalog, &world, actor, "look"), "look");
    assert_eq!(output(&catalog, &world, actor, "poke"), "bzzt");
    assert!(Dispatcher::new(&catalog, &world).resolve(actor, "touch").is_err());
}

#[test]
fn registries_are_built_per_audience() {
    let class = base().with_level(ProviderLevel::new().with_private(reply("secret")));
    let catalog = ProviderCatalog::new().with_class(class);
    assert_eq!(catalog.registry("thing", Audience::Public).map(|r| r.len()), Some(2));
    assert_eq!(catalog.registry("thing", Audience::Private).map(|r| r.len()), Some(1));
    assert!(catalog.registry("nothing", Audience::Public).is_none());
}

#[test]
fn commands_added_later_appear_after_rebuild() {
    let mut catalog = ProviderCatalog::new().with_class(base());
    let (world, actor) = world("thing");
    assert!(Dispatcher::new(&catalog, &world).resolve(actor, "shake").is_err());

    catalog
        .class_mut("thing")
        .unwrap()
        .levels_mut()
        .push(ProviderLevel::new().with_public(reply("shake")));
    // Built registries keep serving until rebuilt.
    assert!(Dispatcher::new(&catalog, &world).resolve(actor, "shake").is_err());
    assert!(catalog.rebuild("thing"));
    assert_eq!(output(&catalog, &world, actor, "shake"), "shake");
    assert!(!catalog.rebuild("nothing"));
}

#[test]
fn registering_a_class_replaces_it() {
    let mut catalog = ProviderCatalog::new().with_class(base());
    let (world, actor) = world("thing");
    assert_eq!(output(&catalog, &world, actor, "touch"), "touch");

    catalog.register(
        ProviderClass::new("thing").with_level(ProviderLevel::new().with_public(reply("sniff"))),
    );
    let dispatcher = Dispatcher::new(&catalog, &world);
    assert!(dispatcher.resolve(actor, "touch").is_err());
    assert!(matches!(dispatcher.resolve(actor, "sniff"), Ok(Dispatch::Resolved(_))));
    assert_eq!(catalog.class_names(), vec!["thing"]);
}

#[test]
fn locked_by_default() {
    let class = ProviderClass::new("thing")
        .with_level(ProviderLevel::new().with_public(CommandDescriptor::new("touch")));
    let catalog = ProviderCatalog::new().with_class(class);
    let (world, actor) = world("thing");
    assert!(Dispatcher::new(&catalog, &world).resolve(actor, "touch").is_err());

    let class = ProviderClass::new("thing").with_level(
        ProviderLevel::new().with_public(CommandDescriptor::new("touch").with_lock(Lock::AllPass)),
    );
    let catalog = ProviderCatalog::new().with_class(class);
    assert!(Dispatcher::new(&catalog, &world).resolve(actor, "touch").is_ok());
}
