//! Classification Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. See `ERRORS.md` for design rationale.

use derive_more::{Display, Error};

/// A classification error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for classification operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A rule's regular expression failed to compile.
    #[display("invalid matcher pattern: {_0}")]
    InvalidPattern(#[error(not(source))] String),
    /// The external rules document could not be parsed.
    #[display("malformed rules document")]
    Document,
    /// The external rules document could not be read.
    #[display("failed to read rules document: {_0}")]
    Io(std::io::Error),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Rules either compile or they don't.
        false
    }
}
