//! Combatant templates used by the combat resolver.

use super::ids::CombatantId;

/// Static stat block for one combat participant.
///
/// Instances are stamped from the template at encounter start; templates
/// themselves are never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantDef {
    pub id: CombatantId,
    pub name: String,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    /// Higher speed acts earlier in a round.
    pub speed: u32,
}
