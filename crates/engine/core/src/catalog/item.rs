//! Item definitions.

use super::ids::ItemId;

/// Static definition of an item, loaded once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Maximum quantity a player may hold. `0` means unbounded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_stack: u32,
    /// Baseline shop price in a shop's default currency.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
}

impl ItemDef {
    /// Clamps `quantity` to this item's stack bound.
    pub fn clamp_stack(&self, quantity: u32) -> u32 {
        if self.max_stack == 0 {
            quantity
        } else {
            quantity.min(self.max_stack)
        }
    }
}
