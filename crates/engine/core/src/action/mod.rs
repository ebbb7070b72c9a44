//! Action definitions and the visibility gate.
//!
//! Actions are the only thing a player can invoke. Each is a closed
//! variant ([`ActionKind`]) plus the common envelope: menu name,
//! requirements, gating tags, and reveal/hide-after-use directives. The
//! original content format's open-ended `class` strings become exhaustive
//! enums here; unknown variants are impossible past the loader.

pub mod requirement;

pub use requirement::{Requirement, RequirementFailure, evaluate, evaluate_all};

use crate::catalog::{CurrencyId, DialogId, ItemId, RecipeId, RoomId, Tag};
use crate::event::Event;
use crate::state::PlayerState;

/// Variant-specific payload of an action.
#[derive(Clone, Debug, PartialEq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Moves the player to `target_room` on success.
    Exit { target_room: RoomId },
    /// Applies a sequence of events, all-or-nothing.
    Wrapper { events: Vec<Event> },
    /// Sells `wares` for `default_currency`.
    Shop {
        default_currency: CurrencyId,
        wares: Vec<ItemId>,
    },
    /// Advances the referenced dialog by one node per invocation.
    Dialog { dialog: DialogId },
    /// Lists the inventory; with input, drops items.
    ManageInventory,
}

/// A player-invocable operation declared on a room.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDef {
    pub menu_name: String,
    /// Extra flavor text emitted when the action executes.
    pub activation_text: Option<String>,
    /// AND-combined preconditions; an empty list always passes.
    pub requirements: Vec<Requirement>,
    /// Gating tags: when non-empty, the action is visible only once every
    /// tag is in the player's tag set.
    pub tags: Vec<Tag>,
    /// Baseline visibility for untagged actions.
    pub visible: bool,
    /// Tags added to the player's set after successful execution.
    pub reveal_after_use: Vec<Tag>,
    /// Permanently hides this action for the player after one success.
    pub hide_after_use: bool,
    pub kind: ActionKind,
}

impl ActionDef {
    /// Whether this action shows up in availability queries for `state`.
    ///
    /// Tag-gated actions ignore the `visible` flag: carrying a tag means
    /// "hidden until revealed", and revealing is exactly the player
    /// acquiring the tag. Untagged actions follow their `visible` default.
    pub fn is_visible_to(&self, state: &PlayerState) -> bool {
        if self.tags.is_empty() {
            self.visible
        } else {
            self.visible || self.tags.iter().all(|tag| state.has_tag(tag))
        }
    }
}

/// Caller-supplied payload refining an execution.
///
/// Shop, crafting, dialog, and inventory actions are two-phase: invoked
/// without input they report their current offerings; invoked with input
/// they commit the selected transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionInput {
    /// Purchase one unit of the ware with this item id.
    Ware(ItemId),
    /// Craft the selected recipe.
    Recipe(RecipeId),
    /// Select the n-th option of the current dialog node.
    Choice(u32),
    /// Drop a quantity of an item from the inventory.
    Drop { item: ItemId, quantity: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoomId;

    fn exit(visible: bool, tags: Vec<Tag>) -> ActionDef {
        ActionDef {
            menu_name: "leave".into(),
            activation_text: None,
            requirements: Vec::new(),
            tags,
            visible,
            reveal_after_use: Vec::new(),
            hide_after_use: false,
            kind: ActionKind::Exit {
                target_room: RoomId(1),
            },
        }
    }

    #[test]
    fn untagged_action_follows_visible_flag() {
        let state = PlayerState::new(RoomId(0));
        assert!(exit(true, Vec::new()).is_visible_to(&state));
        assert!(!exit(false, Vec::new()).is_visible_to(&state));
    }

    #[test]
    fn tagged_action_requires_all_tags() {
        let mut state = PlayerState::new(RoomId(0));
        let action = exit(false, vec![Tag::new("a"), Tag::new("b")]);
        assert!(!action.is_visible_to(&state));
        state.tags.insert(Tag::new("a"));
        assert!(!action.is_visible_to(&state));
        state.tags.insert(Tag::new("b"));
        assert!(action.is_visible_to(&state));
    }

    #[test]
    fn explicitly_visible_tagged_action_ignores_gate() {
        let state = PlayerState::new(RoomId(0));
        let action = exit(true, vec![Tag::new("a")]);
        assert!(action.is_visible_to(&state));
    }
}
