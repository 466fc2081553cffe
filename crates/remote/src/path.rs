//! Logical path validation and manipulation.
//!
//! A logical path is a slash-delimited sequence of folder names describing
//! where an entity should live, independent of whether it currently exists.
//! Store paths are plain strings, not filesystem paths, so the helpers here
//! work on `str` — but the same traversal rules apply: a path must never
//! escape the inventory root.

use crate::error::{ErrorKind, Result};

/// Validates and normalizes a logical path.
///
/// Segments are trimmed; empty segments and `.` are dropped; `..` pops the
/// previous segment and is rejected when it would escape the root. NUL
/// bytes are rejected because they truncate in the store's transport layer.
///
/// # Examples
///
/// ```
/// use sortie_remote::path::validate;
///
/// assert_eq!(validate("Body Parts//Hair/ Magika ").unwrap(), "Body Parts/Hair/Magika");
/// assert_eq!(validate("a/b/../c").unwrap(), "a/c");
/// assert!(validate("../Trash").is_err());
/// assert!(validate("").is_err());
/// ```
pub fn validate(path: &str) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();
    for raw in path.split('/') {
        let segment = raw.trim();
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.pop().is_none() {
                    exn::bail!(ErrorKind::InvalidPath(path.to_string()));
                }
            },
            s if s.contains('\0') => exn::bail!(ErrorKind::InvalidPath(path.to_string())),
            s => segments.push(s),
        }
    }
    match segments.is_empty() {
        true => exn::bail!(ErrorKind::InvalidPath(path.to_string())),
        false => Ok(segments.join("/")),
    }
}

/// Splits a (validated) logical path into its segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').map(str::trim).filter(|s| !s.is_empty())
}

/// Joins a parent path and a child name. An empty parent denotes the root.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
