//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while building registries or validating configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("duplicate {kind} id {name:?}")]
    DuplicateId { kind: &'static str, name: String },

    #[error("{kind} {name:?}: {reason}")]
    InvalidRecord {
        kind:   &'static str,
        name:   String,
        reason: String,
    },

    #[error("too many {0} for the id space")]
    Capacity(&'static str),
}

/// Shorthand result type for `bd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
