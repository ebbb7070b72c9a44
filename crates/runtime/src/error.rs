//! Runtime-level errors.

use fable_core::{CatalogError, ExecuteError, UnknownRoomError};

use crate::session::SessionId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Why a runtime call failed.
///
/// Engine errors pass through unchanged; the runtime only adds the
/// session layer on top.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("unknown session {0}")]
    UnknownSession(SessionId),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Room(#[from] UnknownRoomError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
