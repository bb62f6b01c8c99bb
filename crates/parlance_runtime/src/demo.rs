//! A small two-room world with everyday commands.
//!
//! The player class carries the verbs (`look`, `take`, `go`, ...) as
//! private commands. Rooms turn bare exit names into `go`. Lamps carry
//! public commands that only match when the player names that lamp.

use parlance_dispatch::{
    BoolParser, CommandDescriptor, CommandError, Converter, DhmsParser, Effect,
    HookContext, Lock, MatchParser, PreemptHook, Preemption, ProviderCatalog, ProviderClass,
    ProviderLevel, ResolvedInvocation, UnmatchedHook, english_list, format_dhms,
};
use parlance_foundation::{Category, EntityId, Environment, Result, Value};
use parlance_storage::{ObjectRecord, World};

/// Provider class of the player.
pub const PLAYER_CLASS: &str = "player";
/// Provider class of rooms.
pub const ROOM_CLASS: &str = "room";
/// Provider class of lamps.
pub const LAMP_CLASS: &str = "lamp";

type Outcome = std::result::Result<Vec<Effect>, CommandError>;

/// Builds the demo world; returns it with the player.
///
/// # Errors
///
/// Returns an error if the world refuses a spawn.
pub fn world() -> Result<(World, EntityId)> {
    let world = World::new();
    let (world, hall) = world.spawn(
        room("Entrance Hall", "A draughty hall with a flagstone floor. Light spills in from the north."),
        None,
    )?;
    let (world, garden) = world.spawn(
        room("Garden", "Overgrown hedges crowd a mossy statue. The hall lies to the south."),
        None,
    )?;
    let (world, _) = world.spawn(exit("north", "n", garden), Some(hall))?;
    let (world, _) = world.spawn(exit("south", "s", hall), Some(garden))?;
    let (world, player) = world.spawn(
        ObjectRecord::new("Wanderer")
            .with_class(PLAYER_CLASS)
            .with_category("player")
            .with_description("As travel-worn as ever."),
        Some(hall),
    )?;
    let (world, _) = world.spawn(
        lamp("brass lamp", "A dented brass lamp with a little oil left."),
        Some(hall),
    )?;
    let (world, _) = world.spawn(thing("pebble", "Smooth and grey."), Some(hall))?;
    let (world, _) = world.spawn(lamp("tin lamp", "A cheap tin lamp."), Some(garden))?;
    let (world, _) = world.spawn(thing("apple", "Red, with one bite missing."), Some(garden))?;
    let (world, _) = world.spawn(
        ObjectRecord::new("mossy statue")
            .with_alias("statue")
            .with_category("scenery")
            .with_description("A cherub, green with moss."),
        Some(garden),
    )?;
    Ok((world, player))
}

fn room(name: &str, description: &str) -> ObjectRecord {
    ObjectRecord::new(name)
        .with_class(ROOM_CLASS)
        .with_category("room")
        .with_description(description)
}

fn exit(name: &str, alias: &str, destination: EntityId) -> ObjectRecord {
    ObjectRecord::new(name)
        .with_alias(alias)
        .with_category("exit")
        .with_attribute("destination", Value::EntityRef(destination))
}

fn thing(name: &str, description: &str) -> ObjectRecord {
    ObjectRecord::new(name)
        .with_category("thing")
        .with_description(description)
}

fn lamp(name: &str, description: &str) -> ObjectRecord {
    let mut record = thing(name, description).with_class(LAMP_CLASS);
    if let Some(short) = name.split_whitespace().last() {
        record = record.with_alias(short);
    }
    record
}

/// Builds the catalog of provider classes used by [`world`].
#[must_use]
pub fn catalog() -> ProviderCatalog {
    ProviderCatalog::new()
        .with_class(player_class())
        .with_class(ProviderClass::new(ROOM_CLASS).with_unmatched_hook(ExitNames))
        .with_class(lamp_class())
}

fn open(name: &str) -> CommandDescriptor {
    CommandDescriptor::new(name).with_lock(Lock::AllPass)
}

fn player_class() -> ProviderClass {
    let verbs = ProviderLevel::new()
        .with_private(
            open("look")
                .with_alias("l")
                .with_syntax("[[at] <something>]")
                .with_argument(
                    "something",
                    Converter::contextual(MatchParser::near().with_show(true)),
                )
                .with_run(look),
        )
        .with_private(open("say").with_syntax("<message>").with_run(say))
        .with_private(
            open("pose")
                .with_alias("emote")
                .with_syntax("<action>")
                .with_run(pose),
        )
        .with_private(
            open("take")
                .with_alias("get")
                .with_syntax("<thing>")
                .with_argument("thing", Converter::entity("thing"))
                .with_run(take),
        )
        .with_private(
            open("drop")
                .with_syntax("<thing>")
                .with_argument(
                    "thing",
                    Converter::contextual(MatchParser::own_contents().with_search_for("thing")),
                )
                .with_run(drop),
        )
        .with_private(
            open("inventory")
                .with_alias("i")
                .with_alias("inv")
                .with_run(inventory),
        )
        .with_private(
            open("go")
                .with_alias("walk")
                .with_syntax("[to] <exit>")
                .with_argument(
                    "exit",
                    Converter::contextual(
                        MatchParser::near()
                            .with_category("exit")
                            .with_search_for("exit"),
                    ),
                )
                .with_run(go),
        )
        .with_private(
            open("wait")
                .with_syntax("[<duration>]")
                .with_argument("duration", Converter::parser(DhmsParser))
                .with_switch("quiet", BoolParser::ANY)
                .with_run(wait),
        );
    ProviderClass::new(PLAYER_CLASS)
        .with_level(verbs)
        .with_preempt_hook(Shorthand)
}

fn lamp_class() -> ProviderClass {
    let lamp = ProviderLevel::new()
        .with_public(
            open("light")
                .with_syntax("<this>")
                .with_self_reference("this")
                .with_run(light),
        )
        .with_public(
            open("rub")
                .with_syntax("<this>")
                .with_self_reference("this")
                .with_lock(Lock::custom(|ctx| ctx.env.location(ctx.provider) == Some(ctx.requester)))
                .with_run(rub),
        );
    ProviderClass::new(LAMP_CLASS).with_level(lamp)
}

/// `"hello` means `say hello`; `:waves` means `pose waves`.
#[derive(Debug)]
struct Shorthand;

impl PreemptHook for Shorthand {
    fn preempt(&self, input: &str, _ctx: &HookContext<'_>) -> Option<Preemption> {
        if let Some(rest) = input.strip_prefix('"') {
            let rest = rest.strip_suffix('"').unwrap_or(rest);
            return Some(Preemption::Rewrite(format!("say {rest}")));
        }
        input
            .strip_prefix(':')
            .map(|rest| Preemption::Rewrite(format!("pose {rest}")))
    }
}

/// A bare exit name, typed in a room, means `go` that way.
#[derive(Debug)]
struct ExitNames;

impl UnmatchedHook for ExitNames {
    fn unmatched(&self, input: &str, ctx: &HookContext<'_>) -> Option<ResolvedInvocation> {
        let env = ctx.env();
        let exit = Category::new("exit");
        let found = env.match_among(input, &env.contents(ctx.host()), Some(&exit));
        if found.len() != 1 {
            return None;
        }
        ctx.invoke(ctx.requester(), &format!("go {input}"))
    }
}

fn tell(to: EntityId, text: impl Into<String>) -> Effect {
    Effect::Message {
        to,
        text: text.into(),
    }
}

fn announce(env: &dyn Environment, actor: EntityId, text: String) -> Option<Effect> {
    env.location(actor).map(|location| Effect::Announce {
        location,
        text,
        exclude: Some(actor),
    })
}

fn entity(inv: &ResolvedInvocation, name: &str) -> std::result::Result<EntityId, CommandError> {
    inv.args()
        .require(name)?
        .as_entity()
        .ok_or_else(|| CommandError::Invalid(format!("You can't use {name} that way.")))
}

fn names(env: &dyn Environment, entities: &[EntityId]) -> Vec<String> {
    entities.iter().map(|e| env.display_name(*e)).collect()
}

fn describe(env: &dyn Environment, entity: EntityId) -> String {
    let description = env
        .describe(entity)
        .unwrap_or_else(|| "You see nothing special.".to_string());
    format!("{}\n{description}", env.display_name(entity))
}

/// What a viewer standing in `room` sees.
#[must_use]
pub fn room_view(env: &dyn Environment, room: EntityId, viewer: EntityId) -> String {
    let exit = Category::new("exit");
    let (exits, things): (Vec<EntityId>, Vec<EntityId>) = env
        .contents(room)
        .into_iter()
        .filter(|e| *e != viewer)
        .partition(|e| env.is_valid(*e, Some(&exit)));
    let mut lines = vec![describe(env, room)];
    if !things.is_empty() {
        lines.push(format!("You see {}.", english_list(&names(env, &things), "and")));
    }
    if !exits.is_empty() {
        lines.push(format!("Exits: {}.", english_list(&names(env, &exits), "and")));
    }
    lines.join("\n")
}

fn look(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let me = inv.requester();
    let text = match inv.args().optional("something")? {
        Some(value) => match value.as_entity() {
            Some(target) if env.is_valid(target, Some(&Category::new("room"))) => room_view(env, target, me),
            Some(target) => describe(env, target),
            None => return Err(CommandError::Invalid("You can't see that.".into())),
        },
        None => {
            let room = env
                .location(me)
                .ok_or_else(|| CommandError::Invalid("You are nowhere at all.".into()))?;
            room_view(env, room, me)
        }
    };
    Ok(vec![tell(me, text)])
}

fn say(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let me = inv.requester();
    let message = inv.args().require("message")?.to_string();
    let mut effects = vec![tell(me, format!("You say, \"{message}\""))];
    effects.extend(announce(
        env,
        me,
        format!("{} says, \"{message}\"", env.display_name(me)),
    ));
    Ok(effects)
}

fn pose(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let me = inv.requester();
    let action = inv.args().require("action")?;
    let text = format!("{} {action}", env.display_name(me));
    Ok(match env.location(me) {
        Some(location) => vec![Effect::Announce {
            location,
            text,
            exclude: None,
        }],
        None => vec![tell(me, text)],
    })
}

fn take(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let me = inv.requester();
    let thing = entity(inv, "thing")?;
    if env.location(thing) == Some(me) {
        return Err(CommandError::Invalid("You already have that.".into()));
    }
    let name = env.display_name(thing);
    let mut effects = vec![
        Effect::Move {
            entity: thing,
            destination: me,
        },
        tell(me, format!("You take the {name}.")),
    ];
    effects.extend(announce(env, me, format!("{} takes the {name}.", env.display_name(me))));
    Ok(effects)
}

fn drop(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let me = inv.requester();
    let thing = entity(inv, "thing")?;
    let room = env
        .location(me)
        .ok_or_else(|| CommandError::Invalid("There is nowhere to put it.".into()))?;
    let name = env.display_name(thing);
    let mut effects = vec![
        Effect::Move {
            entity: thing,
            destination: room,
        },
        tell(me, format!("You drop the {name}.")),
    ];
    effects.extend(announce(env, me, format!("{} drops the {name}.", env.display_name(me))));
    Ok(effects)
}

fn inventory(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let me = inv.requester();
    let carried = env.contents(me);
    let text = if carried.is_empty() {
        "You are empty-handed.".to_string()
    } else {
        format!("You are carrying {}.", english_list(&names(env, &carried), "and"))
    };
    Ok(vec![tell(me, text)])
}

fn go(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let me = inv.requester();
    let exit = entity(inv, "exit")?;
    let destination = env
        .property(exit, "destination")
        .and_then(|value| value.as_entity())
        .ok_or_else(|| CommandError::Invalid("That way leads nowhere.".into()))?;
    let mut effects = Vec::new();
    effects.extend(announce(
        env,
        me,
        format!("{} leaves {}.", env.display_name(me), env.display_name(exit)),
    ));
    effects.push(Effect::Move {
        entity: me,
        destination,
    });
    effects.push(tell(me, room_view(env, destination, me)));
    Ok(effects)
}

fn wait(inv: &ResolvedInvocation, _env: &dyn Environment) -> Outcome {
    if inv.switches().flag("quiet") {
        return Ok(Vec::new());
    }
    let text = match inv.args().optional("duration")?.and_then(Value::as_duration) {
        Some(seconds) => format!("Time passes ({}).", format_dhms(seconds)),
        None => "Time passes.".to_string(),
    };
    Ok(vec![tell(inv.requester(), text)])
}

fn light(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    let lamp = inv.provider();
    Ok(vec![tell(
        inv.requester(),
        format!("The {} flickers to life.", env.display_name(lamp)),
    )])
}

fn rub(inv: &ResolvedInvocation, env: &dyn Environment) -> Outcome {
    Ok(vec![tell(
        inv.requester(),
        format!(
            "You rub the {}. Nothing happens.",
            env.display_name(inv.provider())
        ),
    )])
}
