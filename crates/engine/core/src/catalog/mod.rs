//! Immutable entity catalog shared read-only across sessions.
//!
//! The [`Registry`] holds every static definition a world needs: items,
//! skills, currencies, dialogs, crafting recipes, combatant templates, and
//! the room graph. It is assembled once by the content loader, validated,
//! and never mutated during play, so concurrent sessions can share one
//! instance without locking.

mod combatant;
mod currency;
mod dialog;
mod error;
mod ids;
mod item;
mod recipe;
mod rng;
mod skill;

pub use combatant::CombatantDef;
pub use currency::CurrencyDef;
pub use dialog::{DialogDef, DialogNode, DialogOption};
pub use error::CatalogError;
pub use ids::{
    ActionId, CombatantId, CurrencyId, DialogId, ItemId, NodeId, RecipeId, RoomId, SkillId, Tag,
};
pub use item::ItemDef;
pub use recipe::{ItemStack, RecipeDef};
pub use rng::{PcgRng, compute_seed};
pub use skill::SkillDef;

use std::collections::BTreeMap;

use crate::room::RoomGraph;

/// The frozen catalog of one loaded world.
#[derive(Clone, Debug)]
pub struct Registry {
    pub items: BTreeMap<ItemId, ItemDef>,
    pub skills: BTreeMap<SkillId, SkillDef>,
    pub currencies: BTreeMap<CurrencyId, CurrencyDef>,
    pub dialogs: BTreeMap<DialogId, DialogDef>,
    pub recipes: BTreeMap<RecipeId, RecipeDef>,
    pub combatants: BTreeMap<CombatantId, CombatantDef>,
    pub rooms: RoomGraph,
    /// Base seed for deterministic combat resolution.
    pub world_seed: u64,
}

impl Registry {
    pub fn item(&self, id: ItemId) -> Result<&ItemDef, CatalogError> {
        self.items.get(&id).ok_or(CatalogError::UnknownItem(id))
    }

    pub fn skill(&self, id: SkillId) -> Result<&SkillDef, CatalogError> {
        self.skills.get(&id).ok_or(CatalogError::UnknownSkill(id))
    }

    pub fn currency(&self, id: CurrencyId) -> Result<&CurrencyDef, CatalogError> {
        self.currencies
            .get(&id)
            .ok_or(CatalogError::UnknownCurrency(id))
    }

    pub fn dialog(&self, id: DialogId) -> Result<&DialogDef, CatalogError> {
        self.dialogs
            .get(&id)
            .ok_or(CatalogError::UnknownDialog(id))
    }

    pub fn recipe(&self, id: RecipeId) -> Result<&RecipeDef, CatalogError> {
        self.recipes
            .get(&id)
            .ok_or(CatalogError::UnknownRecipe(id))
    }

    pub fn combatant(&self, id: CombatantId) -> Result<&CombatantDef, CatalogError> {
        self.combatants
            .get(&id)
            .ok_or(CatalogError::UnknownCombatant(id))
    }
}
