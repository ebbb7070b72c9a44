//! Pure precondition checks over player state.
//!
//! Requirements never mutate anything. `ConsumeItem` shares its predicate
//! with `Item`; the engine commits the consumption separately, after the
//! whole requirement set has passed and the action body succeeded.

use crate::catalog::{CurrencyId, ItemId, SkillId, Tag};
use crate::state::PlayerState;

/// A single precondition on an action.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    /// Player holds at least `quantity` of `item`.
    Item { item: ItemId, quantity: u32 },
    /// Same check as [`Requirement::Item`], but the items are consumed
    /// when the action commits.
    ConsumeItem { item: ItemId, quantity: u32 },
    /// Player's skill level is at least `level`.
    Skill { skill: SkillId, level: u32 },
    /// Player's balance covers `amount`.
    Currency { currency: CurrencyId, amount: u32 },
    /// Player carries `tag`.
    Tag { tag: Tag },
}

/// Which requirement failed, with the observed and required values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequirementFailure {
    #[error("requires {need} of {item}, have {have}")]
    Item { item: ItemId, have: u32, need: u32 },

    #[error("requires skill {skill} level {need}, have {have}")]
    Skill {
        skill: SkillId,
        have: u32,
        need: u32,
    },

    #[error("requires {need} {currency}, have {have}")]
    Currency {
        currency: CurrencyId,
        have: u32,
        need: u32,
    },

    #[error("requires tag {0:?}")]
    Tag(Tag),
}

/// Checks one requirement against `state` without mutating it.
pub fn evaluate(requirement: &Requirement, state: &PlayerState) -> bool {
    check(requirement, state).is_ok()
}

/// Checks every requirement in order, reporting the first failure.
pub fn evaluate_all(
    requirements: &[Requirement],
    state: &PlayerState,
) -> Result<(), RequirementFailure> {
    requirements.iter().try_for_each(|req| check(req, state))
}

fn check(requirement: &Requirement, state: &PlayerState) -> Result<(), RequirementFailure> {
    match requirement {
        Requirement::Item { item, quantity } | Requirement::ConsumeItem { item, quantity } => {
            let have = state.item_quantity(*item);
            if have < *quantity {
                return Err(RequirementFailure::Item {
                    item: *item,
                    have,
                    need: *quantity,
                });
            }
        }
        Requirement::Skill { skill, level } => {
            let have = state.skill_progress(*skill).level;
            if have < *level {
                return Err(RequirementFailure::Skill {
                    skill: *skill,
                    have,
                    need: *level,
                });
            }
        }
        Requirement::Currency { currency, amount } => {
            let have = state.currency_balance(*currency);
            if have < *amount {
                return Err(RequirementFailure::Currency {
                    currency: *currency,
                    have,
                    need: *amount,
                });
            }
        }
        Requirement::Tag { tag } => {
            if !state.has_tag(tag) {
                return Err(RequirementFailure::Tag(tag.clone()));
            }
        }
    }
    Ok(())
}
