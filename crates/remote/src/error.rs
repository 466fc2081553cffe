//! Remote Service Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. See `ERRORS.md` for design rationale.

use derive_more::{Display, Error};

/// A remote-service error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for remote-service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. None of them is fatal to a reconciliation run: the caller
/// records a failed outcome and moves on to the next entity.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Timeout or connection failure; the request may never have reached the
    /// store.
    #[display("transport failure: {_0}")]
    Transport(#[error(not(source))] String),
    /// The store processed the request and reported failure.
    #[display("rejected by store: {_0}")]
    Rejected(#[error(not(source))] String),
    /// No entity exists at the given path.
    #[display("not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// A sibling with the same name already exists. Benign for folder
    /// creation: the existing folder is confirmed by a follow-up listing.
    #[display("already exists: {_0}")]
    AlreadyExists(#[error(not(source))] String),
    /// Logical path is empty, escapes the root, or contains NUL.
    #[display("invalid path: {_0}")]
    InvalidPath(#[error(not(source))] String),
    /// The response violated the wire-format contract.
    #[display("protocol error: {_0}")]
    Protocol(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
