//! Errors surfaced by the execution pipeline.

use crate::action::RequirementFailure;
use crate::catalog::{ActionId, CatalogError, CurrencyId, ItemId, RoomId};
use crate::event::EventError;

/// Why an `execute` call was rejected or aborted.
///
/// Every variant means the player's state was left exactly as it was
/// before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("player is in {player_room}, not {requested}")]
    NotInRoom {
        player_room: RoomId,
        requested: RoomId,
    },

    #[error("unknown room {0}")]
    UnknownRoom(RoomId),

    /// The id is out of range, or the action is hidden or already spent.
    #[error("{room} has no available action {action}")]
    ActionNotFound { room: RoomId, action: ActionId },

    #[error("requirements not met: {0}")]
    RequirementsNotMet(#[from] RequirementFailure),

    #[error("{item} is not for sale here")]
    NotForSale { item: ItemId },

    #[error("insufficient {currency}: need {need}, have {have}")]
    InsufficientFunds {
        currency: CurrencyId,
        need: u32,
        have: u32,
    },

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
