//! Events: the effect vocabulary actions are composed from.
//!
//! An event is one state-changing (or purely textual) step. Wrapper
//! actions hold an ordered list of them; the processor in [`apply`]
//! runs such a chain against a player state and collects display text.
//! Events never perform I/O and never touch anything outside the state
//! they are handed.

mod apply;

pub use apply::apply_chain;

use crate::catalog::{
    CatalogError, CombatantId, CurrencyId, DialogId, ItemId, NodeId, RecipeId, SkillId,
};
use crate::combat::CombatOutcome;

/// One effect step.
#[derive(Clone, Debug, PartialEq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Grants items, clamped to the item's stack bound.
    AddItem { item: ItemId, quantity: u32 },
    /// Takes items; fails the chain on a shortfall.
    RemoveItem { item: ItemId, quantity: u32 },
    /// Credits a currency balance.
    AddCurrency { currency: CurrencyId, amount: u32 },
    /// Grants experience and applies the skill's level curve.
    SkillXp { skill: SkillId, amount: u32 },
    /// Emits a line of display text, mutating nothing.
    Text { text: String },
    /// Advances the referenced dialog by one node.
    Dialog { dialog: DialogId },
    /// With a recipe: crafts it. Without one (and no caller input):
    /// reports which recipes are currently satisfiable.
    Craft { recipe: Option<RecipeId> },
    /// Resolves a full encounter. `on_victory` events apply only when the
    /// player side wins.
    Combat {
        allies: Vec<CombatantId>,
        enemies: Vec<CombatantId>,
        on_victory: Vec<Event>,
    },
    /// Renders a read-only snapshot of the player.
    ViewSummary,
}

/// Raised when an event cannot apply.
///
/// A chain error means the whole action fails; the engine discards the
/// staged state, so partial mutations never become visible.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventError {
    #[error("not enough of {item}: need {need}, have {have}")]
    InsufficientItems { item: ItemId, need: u32, have: u32 },

    #[error("insufficient {currency}: need {need}, have {have}")]
    InsufficientFunds {
        currency: CurrencyId,
        need: u32,
        have: u32,
    },

    #[error("{dialog} has no option {choice} at the current node")]
    InvalidChoice { dialog: DialogId, choice: u32 },

    #[error("{dialog} references missing {node}")]
    MissingDialogNode { dialog: DialogId, node: NodeId },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Accumulated result of a processed chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventOutcome {
    /// Display lines in emission order.
    pub text: Vec<String>,
    /// Outcome of the last encounter the chain resolved, if any.
    pub combat: Option<CombatOutcome>,
}
