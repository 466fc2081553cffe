//! Engine Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. See `ERRORS.md` for design rationale.

use derive_more::{Display, Error};

/// An engine error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of an engine failure.
///
/// None of these aborts a reconciliation run: the caller records a failed
/// outcome for the entity at hand and continues with the next one.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A missing path segment could not be created and confirmed.
    #[display("folder not creatable: {_0}")]
    NotCreatable(#[error(not(source))] String),
    /// The logical path was malformed.
    Path,
    /// An inventory-service call underneath an engine operation failed.
    Service,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
