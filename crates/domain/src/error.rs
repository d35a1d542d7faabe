//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`TidyError`]
//! via `From` (no `String` variants).

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum TidyError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The backing store (local or remote) failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The todo text is empty once trimmed.
    #[error("todo text must not be empty")]
    EmptyText,

    /// The todo text exceeds the maximum length.
    #[error("todo text is {len} characters long, maximum is {max}")]
    TextTooLong { len: usize, max: usize },

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A display mode name could not be parsed.
    #[error("unknown display mode: {0}")]
    UnknownDisplayMode(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
