//! Plain data returned to clients.
//!
//! Views carry resolved display names alongside ids so a client can
//! render them without holding the registry. All of them serialize
//! directly, which is what a transport layer sitting on top of the
//! runtime would ship over the wire.

use serde::{Deserialize, Serialize};

use fable_core::{
    ActionId, ActionOutcome, CurrencyId, ItemId, RoomId, SkillId, StateDelta, Tag,
};

/// One room as listed to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: RoomId,
    pub name: String,
}

/// One invocable menu entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionView {
    pub id: ActionId,
    pub menu_name: String,
}

/// Result of one executed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Display text, one rendered line per `\n`.
    pub text: String,
    pub delta: StateDelta,
    pub outcome: ActionOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub id: CurrencyId,
    pub name: String,
    pub amount: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: SkillId,
    pub name: String,
    pub level: u32,
    pub xp: u32,
}

/// Read-only snapshot of one session's progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub room: RoomId,
    pub room_name: String,
    pub inventory: Vec<ItemEntry>,
    pub currencies: Vec<CurrencyEntry>,
    pub skills: Vec<SkillEntry>,
    pub tags: Vec<Tag>,
}
