//! The inventory service abstraction.

use crate::entity::Entity;
use crate::error::Result;
use async_trait::async_trait;

/// Operations the external hierarchical store exposes.
///
/// All paths are logical, slash-delimited and rooted at the inventory root
/// (see [`crate::path::validate`]). Implementations are responsible for
/// whatever absolute-path or encoding conventions their transport requires.
///
/// Every method is fallible and none of the failures is fatal to a run: a
/// caller that receives an error records the entity as failed and continues
/// with the next one.
#[async_trait]
pub trait InventoryService {
    /// Lists the immediate children of the folder at `path`.
    ///
    /// Fails with [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) when no
    /// folder exists at the path.
    async fn list(&self, path: &str) -> Result<Vec<Entity>>;

    /// Creates a folder named `name` under the folder at `parent`.
    ///
    /// The store gives no reliable signal for "already there" versus other
    /// rejections, so callers must confirm creation by listing the parent
    /// afterwards rather than by inspecting the error.
    async fn create_folder(&self, parent: &str, name: &str) -> Result<()>;

    /// Moves the entity at `source` into the folder at `target`.
    async fn move_entity(&self, source: &str, target: &str) -> Result<()>;

    /// Deletes the folder at `path`. Implementations reject deletion of
    /// non-empty folders.
    async fn delete_folder(&self, path: &str) -> Result<()>;
}
