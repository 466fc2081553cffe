//! The entity model of the external store.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// What an entity is: a container or a leaf.
///
/// The store reports a richer set of asset types (texture, gesture,
/// notecard, …); everything that is not a folder is an item for
/// classification purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Item,
    Folder,
}

impl EntityKind {
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Folder => "folder",
        }
    }
}

impl FromStr for EntityKind {
    type Err = std::convert::Infallible;

    /// Never fails: unknown type strings are items.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "folder" | "category" => Self::Folder,
            _ => Self::Item,
        })
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// An item or folder in the external hierarchical store.
///
/// Entities are owned entirely by the store and are read-only inputs here,
/// except for the parent reference, which changes as the side effect of a
/// successful move request. The display name is free text and mutable by
/// external actors between runs; only the identifier is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Opaque, stable store identifier.
    pub id: String,
    /// Free-text display name. Normalize before matching.
    pub name: String,
    pub kind: EntityKind,
    /// Identifier of the containing folder; absent for roots.
    pub parent: Option<String>,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EntityKind) -> Self {
        Self { id: id.into(), name: name.into(), kind, parent: None }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
