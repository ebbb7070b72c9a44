//! Mutable per-session player state.
//!
//! [`PlayerState`] is the single record every other component reads and
//! mutates. One session owns exactly one instance; the engine threads it
//! through every call explicitly, so independent sessions never share
//! mutable state. Quantities are unsigned and adjusted only through
//! checked operations, so inventory and currency balances cannot go
//! negative by construction.

mod delta;

pub use delta::{QuantityChange, SkillChange, StateDelta};

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{ActionId, CurrencyId, DialogId, ItemId, NodeId, RoomId, SkillId, Tag};

/// Level and banked experience for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillProgress {
    pub level: u32,
    pub xp: u32,
}

/// The complete mutable record of one player's progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub current_room: RoomId,
    /// Item id -> held quantity. Zero-quantity entries are removed.
    pub inventory: BTreeMap<ItemId, u32>,
    /// Currency id -> balance.
    pub currencies: BTreeMap<CurrencyId, u32>,
    pub skills: BTreeMap<SkillId, SkillProgress>,
    /// Visibility-gating tags. Mutated only by reveal directives.
    pub tags: BTreeSet<Tag>,
    /// Dialog id -> last node the player visited.
    pub dialog_cursors: BTreeMap<DialogId, NodeId>,
    /// Actions permanently hidden for this player via `hide_after_use`.
    pub used_actions: BTreeSet<(RoomId, ActionId)>,
    /// Rooms the player has entered at least once.
    pub visited_rooms: BTreeSet<RoomId>,
    /// Monotonic action counter; feeds the combat seed stream.
    pub nonce: u64,
}

impl PlayerState {
    pub fn new(start_room: RoomId) -> Self {
        Self {
            current_room: start_room,
            inventory: BTreeMap::new(),
            currencies: BTreeMap::new(),
            skills: BTreeMap::new(),
            tags: BTreeSet::new(),
            dialog_cursors: BTreeMap::new(),
            used_actions: BTreeSet::new(),
            visited_rooms: BTreeSet::new(),
            nonce: 0,
        }
    }

    pub fn item_quantity(&self, item: ItemId) -> u32 {
        self.inventory.get(&item).copied().unwrap_or(0)
    }

    /// Adds items, saturating at `u32::MAX`.
    pub fn grant_items(&mut self, item: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let slot = self.inventory.entry(item).or_insert(0);
        *slot = slot.saturating_add(quantity);
    }

    /// Removes items if the full quantity is held. Returns `false` (and
    /// leaves the inventory untouched) on a shortfall.
    pub fn remove_items(&mut self, item: ItemId, quantity: u32) -> bool {
        let held = self.item_quantity(item);
        if held < quantity {
            return false;
        }
        let remaining = held - quantity;
        if remaining == 0 {
            self.inventory.remove(&item);
        } else {
            self.inventory.insert(item, remaining);
        }
        true
    }

    pub fn currency_balance(&self, currency: CurrencyId) -> u32 {
        self.currencies.get(&currency).copied().unwrap_or(0)
    }

    pub fn credit_currency(&mut self, currency: CurrencyId, amount: u32) {
        if amount == 0 {
            return;
        }
        let slot = self.currencies.entry(currency).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    /// Debits a balance if covered. Returns `false` on insufficient funds.
    pub fn debit_currency(&mut self, currency: CurrencyId, amount: u32) -> bool {
        let balance = self.currency_balance(currency);
        if balance < amount {
            return false;
        }
        self.currencies.insert(currency, balance - amount);
        true
    }

    pub fn skill_progress(&self, skill: SkillId) -> SkillProgress {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_action_used(&self, room: RoomId, action: ActionId) -> bool {
        self.used_actions.contains(&(room, action))
    }
}
