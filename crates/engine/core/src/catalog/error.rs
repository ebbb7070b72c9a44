//! Catalog lookup errors.

use super::ids::{CombatantId, CurrencyId, DialogId, ItemId, RecipeId, SkillId};

/// Raised when a catalog lookup misses.
///
/// For worlds built through the content loader these are unreachable in
/// normal play: every id embedded in content is validated at load time.
/// They surface only for ids fabricated by a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),

    #[error("unknown currency {0}")]
    UnknownCurrency(CurrencyId),

    #[error("unknown dialog {0}")]
    UnknownDialog(DialogId),

    #[error("unknown recipe {0}")]
    UnknownRecipe(RecipeId),

    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),
}
