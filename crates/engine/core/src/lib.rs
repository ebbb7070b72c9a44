//! Deterministic narrative-game rules shared across clients.
//!
//! `fable-core` defines the canonical vocabulary (rooms, actions,
//! requirements, events) and the execution pipeline that interprets it.
//! All state mutation flows through [`engine::Engine`]; supporting crates
//! depend on the types re-exported here. The crate performs no I/O:
//! loading worlds from disk lives in `fable-content`, session hosting in
//! `fable-runtime`.
pub mod action;
pub mod catalog;
pub mod combat;
pub mod engine;
pub mod event;
pub mod room;
pub mod state;
pub use action::{
    ActionDef, ActionInput, ActionKind, Requirement, RequirementFailure, evaluate, evaluate_all,
};
pub use catalog::{
    ActionId, CatalogError, CombatantDef, CombatantId, CurrencyDef, CurrencyId, DialogDef,
    DialogId, DialogNode, DialogOption, ItemDef, ItemId, ItemStack, NodeId, PcgRng, RecipeDef,
    RecipeId, Registry, RoomId, SkillDef, SkillId, Tag, compute_seed,
};
pub use combat::{CombatOutcome, CombatReport, Side};
pub use engine::{ActionOutcome, Engine, ExecuteError, ExecutionOutcome};
pub use event::{Event, EventError, EventOutcome, apply_chain};
pub use room::{RoomDef, RoomGraph, UnknownRoomError};
pub use state::{PlayerState, QuantityChange, SkillChange, SkillProgress, StateDelta};
