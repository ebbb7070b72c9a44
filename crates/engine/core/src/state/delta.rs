//! Structured description of what an execution changed.
//!
//! The delta is computed by diffing the state captured before an action
//! against the state after it committed. Callers use it to render precise
//! feedback without replaying engine logic.

use std::collections::BTreeSet;

use super::PlayerState;
use crate::catalog::{ActionId, CurrencyId, ItemId, RoomId, SkillId, Tag};

/// A before/after pair for one counted resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantityChange<Id> {
    pub id: Id,
    pub before: u32,
    pub after: u32,
}

/// A before/after pair for one skill's progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillChange {
    pub id: SkillId,
    pub level_before: u32,
    pub level_after: u32,
    pub xp_before: u32,
    pub xp_after: u32,
}

/// State change metadata for one successful execution.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    pub items: Vec<QuantityChange<ItemId>>,
    pub currencies: Vec<QuantityChange<CurrencyId>>,
    pub skills: Vec<SkillChange>,
    pub tags_added: Vec<Tag>,
    /// `(from, to)` when the action moved the player.
    pub room_transition: Option<(RoomId, RoomId)>,
    /// Actions newly hidden for this player by `hide_after_use`.
    pub actions_hidden: Vec<(RoomId, ActionId)>,
}

impl StateDelta {
    /// Computes the delta between two player states.
    pub fn from_states(before: &PlayerState, after: &PlayerState) -> Self {
        let item_ids: BTreeSet<ItemId> = before
            .inventory
            .keys()
            .chain(after.inventory.keys())
            .copied()
            .collect();
        let items = item_ids
            .into_iter()
            .filter_map(|id| {
                let b = before.item_quantity(id);
                let a = after.item_quantity(id);
                (b != a).then_some(QuantityChange {
                    id,
                    before: b,
                    after: a,
                })
            })
            .collect();

        let currency_ids: BTreeSet<CurrencyId> = before
            .currencies
            .keys()
            .chain(after.currencies.keys())
            .copied()
            .collect();
        let currencies = currency_ids
            .into_iter()
            .filter_map(|id| {
                let b = before.currency_balance(id);
                let a = after.currency_balance(id);
                (b != a).then_some(QuantityChange {
                    id,
                    before: b,
                    after: a,
                })
            })
            .collect();

        let skill_ids: BTreeSet<SkillId> = before
            .skills
            .keys()
            .chain(after.skills.keys())
            .copied()
            .collect();
        let skills = skill_ids
            .into_iter()
            .filter_map(|id| {
                let b = before.skill_progress(id);
                let a = after.skill_progress(id);
                (b != a).then_some(SkillChange {
                    id,
                    level_before: b.level,
                    level_after: a.level,
                    xp_before: b.xp,
                    xp_after: a.xp,
                })
            })
            .collect();

        let tags_added = after.tags.difference(&before.tags).cloned().collect();

        let room_transition = (before.current_room != after.current_room)
            .then_some((before.current_room, after.current_room));

        let actions_hidden = after
            .used_actions
            .difference(&before.used_actions)
            .copied()
            .collect();

        Self {
            items,
            currencies,
            skills,
            tags_added,
            room_transition,
            actions_hidden,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.currencies.is_empty()
            && self.skills.is_empty()
            && self.tags_added.is_empty()
            && self.room_transition.is_none()
            && self.actions_hidden.is_empty()
    }
}
