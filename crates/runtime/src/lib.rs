//! Session hosting for `fable` worlds.
//!
//! This crate sits between a loaded [`fable_core::Registry`] and whatever
//! transport a client speaks. [`Runtime`] hosts any number of independent
//! sessions over one shared world, exposing plain-data views that
//! serialize directly:
//! - [`runtime`] hosts the [`Runtime`] orchestrator
//! - [`session`] defines session identifiers
//! - [`view`] holds the data types handed to clients
//! - [`error`] wraps engine failures with the session layer's own

pub mod error;
pub mod runtime;
pub mod session;
pub mod view;

pub use error::{Result, RuntimeError};
pub use runtime::Runtime;
pub use session::SessionId;
pub use view::{
    ActionView, CurrencyEntry, ExecuteResponse, ItemEntry, PlayerSnapshot, RoomView, SkillEntry,
};
