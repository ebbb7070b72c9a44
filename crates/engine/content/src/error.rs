//! Load-time errors.

use std::path::PathBuf;

/// Why a world document was rejected.
///
/// Loading is all-or-nothing: any error aborts the whole load and no
/// partial `Registry` is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Syntactically malformed JSON, or an unknown `class` discriminator.
    #[error("malformed asset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {kind} id {id}")]
    Duplicate { kind: &'static str, id: u32 },

    /// A definition references an id that exists nowhere in the document.
    #[error("{context}: unknown {kind} id {id}")]
    Dangling {
        context: String,
        kind: &'static str,
        id: u32,
    },

    #[error("{context}: {reason}")]
    Invalid { context: String, reason: String },
}
