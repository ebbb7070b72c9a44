//! World loading for `fable`.
//!
//! Turns authored JSON documents into the frozen [`fable_core::Registry`]
//! the engine runs against. Loading is strict: unknown `class`
//! discriminators fail the parse, duplicate ids and dangling references
//! fail the build, and no partial registry is ever produced.

pub mod error;
pub mod loader;
pub mod schema;
mod validate;

pub use error::LoadError;
pub use loader::{build, load_world_file, load_world_str};
pub use schema::WorldDocument;
