//! End-to-end scenarios against the checked-in example world.
//!
//! The fixture has two rooms: Greenfield Hollow (a one-shot stone pickup,
//! a crack requiring the stone to squeeze through, a tag-locked reward, a
//! hermit dialog, a peddler, and a forage loop) and the Gloom Cave (a
//! crafting spot). Two default actions are appended everywhere: inventory
//! management and a combat encounter that unlocks the reward.

use std::path::Path;
use std::sync::Arc;

use fable_content::load_world_file;
use fable_core::{
    ActionId, ActionInput, ActionOutcome, ExecuteError, ItemId, RecipeId, RequirementFailure,
    RoomId,
};
use fable_runtime::{PlayerSnapshot, Runtime, RuntimeError, SessionId};

const FIELD: RoomId = RoomId(0);
const CAVE: RoomId = RoomId(1);

const STONE: ItemId = ItemId(2);
const HERB: ItemId = ItemId(3);
const POTION: ItemId = ItemId(4);
const CHARM: ItemId = ItemId(6);

const PICK_UP: ActionId = ActionId(0);
const SQUEEZE: ActionId = ActionId(1);
const REWARD: ActionId = ActionId(2);
const HERMIT: ActionId = ActionId(3);
const PEDDLER: ActionId = ActionId(4);
const FORAGE: ActionId = ActionId(5);
const CULL: ActionId = ActionId(7);

const CRAWL_OUT: ActionId = ActionId(0);
const MIX: ActionId = ActionId(1);

fn world() -> Runtime {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/world.json");
    let registry = load_world_file(&path).expect("fixture world loads");
    Runtime::new(Arc::new(registry))
}

fn held(snapshot: &PlayerSnapshot, item: ItemId) -> u32 {
    snapshot
        .inventory
        .iter()
        .find(|entry| entry.id == item)
        .map(|entry| entry.quantity)
        .unwrap_or(0)
}

fn menu(runtime: &Runtime, session: SessionId, room: RoomId) -> Vec<String> {
    runtime
        .available_actions(session, room)
        .unwrap()
        .into_iter()
        .map(|view| view.menu_name)
        .collect()
}

#[test]
fn squeezing_through_the_crack_needs_the_stone() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();

    let err = runtime.execute(session, FIELD, SQUEEZE, None).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Execute(ExecuteError::RequirementsNotMet(RequirementFailure::Item {
            item: STONE,
            have: 0,
            need: 1,
        }))
    );
    assert_eq!(runtime.player_snapshot(session).unwrap().room, FIELD);

    let picked = runtime.execute(session, FIELD, PICK_UP, None).unwrap();
    assert!(picked.text.starts_with("Ooh, shiny!"));
    assert_eq!(held(&runtime.player_snapshot(session).unwrap(), STONE), 2);

    let moved = runtime.execute(session, FIELD, SQUEEZE, None).unwrap();
    assert_eq!(moved.outcome, ActionOutcome::Success);
    assert_eq!(moved.delta.room_transition, Some((FIELD, CAVE)));

    let snapshot = runtime.player_snapshot(session).unwrap();
    assert_eq!(snapshot.room, CAVE);
    assert_eq!(snapshot.room_name, "Gloom Cave");
    assert_eq!(held(&snapshot, STONE), 1);
}

#[test]
fn the_reward_stays_locked_until_the_cull() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();

    let before = menu(&runtime, session, FIELD);
    assert!(!before.iter().any(|name| name.contains("reward")));
    assert!(before.iter().any(|name| name == "manage inventory"));

    let culled = runtime.execute(session, FIELD, CULL, None).unwrap();
    assert_eq!(culled.outcome, ActionOutcome::CombatVictory);
    let snapshot = runtime.player_snapshot(session).unwrap();
    assert_eq!(snapshot.currencies[0].amount, 30);
    assert!(snapshot.tags.iter().any(|tag| tag.as_str() == "combat_locked"));

    let after = menu(&runtime, session, FIELD);
    assert!(after.iter().any(|name| name.contains("reward")));

    runtime.execute(session, FIELD, REWARD, None).unwrap();
    assert_eq!(held(&runtime.player_snapshot(session).unwrap(), CHARM), 1);

    // hide_after_use: claimed once, gone for good.
    let spent = menu(&runtime, session, FIELD);
    assert!(!spent.iter().any(|name| name.contains("reward")));
    let err = runtime.execute(session, FIELD, REWARD, None).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Execute(ExecuteError::ActionNotFound {
            room: FIELD,
            action: REWARD,
        })
    );
}

#[test]
fn first_enter_text_appears_only_once() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();
    runtime.execute(session, FIELD, PICK_UP, None).unwrap();

    let first = runtime.execute(session, FIELD, SQUEEZE, None).unwrap();
    assert!(first.text.contains("Cold air washes over you."));
    assert!(first.text.contains("Water drips somewhere in the dark."));

    // The start room was entered at session creation, so returning to it
    // shows only the regular description.
    let back = runtime.execute(session, CAVE, CRAWL_OUT, None).unwrap();
    assert!(!back.text.contains("You wake with dew on your face."));
    assert!(back.text.contains("Grass sways in the hollow."));

    let second = runtime.execute(session, FIELD, SQUEEZE, None).unwrap();
    assert!(!second.text.contains("Cold air washes over you."));
    assert!(second.text.contains("Water drips somewhere in the dark."));
}

#[test]
fn the_hermit_remembers_where_you_left_off() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();

    let opening = runtime.execute(session, FIELD, HERMIT, None).unwrap();
    assert!(opening.text.contains("The hermit eyes you from under his hood."));
    assert!(opening.text.contains("0) Ask about the cave."));
    assert!(opening.text.contains("1) Leave him be."));

    let advanced = runtime
        .execute(session, FIELD, HERMIT, Some(ActionInput::Choice(0)))
        .unwrap();
    assert!(advanced.text.contains("Bring me a shiny stone"));

    // Terminal node: asking again repeats the same line.
    let repeated = runtime.execute(session, FIELD, HERMIT, None).unwrap();
    assert_eq!(repeated.text, advanced.text);
}

#[test]
fn potions_are_mixed_in_the_cave() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();

    runtime.execute(session, FIELD, FORAGE, None).unwrap();
    runtime.execute(session, FIELD, PICK_UP, None).unwrap();
    runtime.execute(session, FIELD, SQUEEZE, None).unwrap();

    let listing = runtime.execute(session, CAVE, MIX, None).unwrap();
    assert!(listing.text.contains("You could craft Potion."));

    let crafted = runtime
        .execute(session, CAVE, MIX, Some(ActionInput::Recipe(RecipeId(1))))
        .unwrap();
    assert!(crafted.text.contains("You craft Potion."));

    let snapshot = runtime.player_snapshot(session).unwrap();
    assert_eq!(held(&snapshot, HERB), 0);
    assert_eq!(held(&snapshot, POTION), 1);
}

#[test]
fn the_peddler_wants_coins_up_front() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();

    let err = runtime
        .execute(session, FIELD, PEDDLER, Some(ActionInput::Ware(POTION)))
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Execute(ExecuteError::InsufficientFunds { need: 10, have: 0, .. })
    ));

    runtime.execute(session, FIELD, CULL, None).unwrap();
    let bought = runtime
        .execute(session, FIELD, PEDDLER, Some(ActionInput::Ware(POTION)))
        .unwrap();
    assert!(bought.text.contains("You buy Potion for 10 Coins."));

    let snapshot = runtime.player_snapshot(session).unwrap();
    assert_eq!(held(&snapshot, POTION), 1);
    assert_eq!(snapshot.currencies[0].amount, 20);
}

#[test]
fn foraging_levels_up_after_enough_trips() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();

    runtime.execute(session, FIELD, FORAGE, None).unwrap();
    runtime.execute(session, FIELD, FORAGE, None).unwrap();
    let snapshot = runtime.player_snapshot(session).unwrap();
    assert_eq!(snapshot.skills[0].level, 0);
    assert_eq!(snapshot.skills[0].xp, 80);

    let third = runtime.execute(session, FIELD, FORAGE, None).unwrap();
    assert!(third.text.contains("Foraging is now level 1."));
    let snapshot = runtime.player_snapshot(session).unwrap();
    assert_eq!(snapshot.skills[0].level, 1);
    assert_eq!(snapshot.skills[0].xp, 20);
}

#[test]
fn identical_worlds_replay_combat_identically() {
    let mut left = world();
    let mut right = world();
    let left_session = left.create_session(FIELD).unwrap();
    let right_session = right.create_session(FIELD).unwrap();

    let left_fight = left.execute(left_session, FIELD, CULL, None).unwrap();
    let right_fight = right.execute(right_session, FIELD, CULL, None).unwrap();
    assert_eq!(left_fight, right_fight);
}

#[test]
fn sessions_are_independent() {
    let mut runtime = world();
    let one = runtime.create_session(FIELD).unwrap();
    let two = runtime.create_session(FIELD).unwrap();

    runtime.execute(one, FIELD, PICK_UP, None).unwrap();
    assert_eq!(held(&runtime.player_snapshot(one).unwrap(), STONE), 2);
    assert_eq!(held(&runtime.player_snapshot(two).unwrap(), STONE), 0);

    // Session two still sees the pickup; session one spent it.
    assert!(menu(&runtime, two, FIELD).iter().any(|name| name.contains("shiny")));
    assert!(!menu(&runtime, one, FIELD).iter().any(|name| name.contains("shiny")));
}

#[test]
fn unknown_sessions_are_rejected() {
    let mut runtime = world();
    let missing = SessionId::new(42);
    assert_eq!(
        runtime.execute(missing, FIELD, PICK_UP, None).unwrap_err(),
        RuntimeError::UnknownSession(missing)
    );
    assert_eq!(
        runtime.player_snapshot(missing).unwrap_err(),
        RuntimeError::UnknownSession(missing)
    );
}

#[test]
fn snapshots_serialize_to_json() {
    let mut runtime = world();
    let session = runtime.create_session(FIELD).unwrap();
    runtime.execute(session, FIELD, PICK_UP, None).unwrap();

    let snapshot = runtime.player_snapshot(session).unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"Shiny Stone\""));
    assert!(json.contains("\"Greenfield Hollow\""));
}

#[test]
fn rooms_are_listed_in_order() {
    let runtime = world();
    let rooms = runtime.list_rooms();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].name, "Greenfield Hollow");
    assert_eq!(rooms[1].name, "Gloom Cave");
}
