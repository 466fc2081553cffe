//! In-memory mock implementation of the [`InventoryService`] trait for
//! testing. Enable the `mock` feature to use.
//!
//! The mock is deliberately strict where the real store is strict: path
//! lookups are exact-case (casing mismatches surface as `NotFound`, the same
//! way the bridge behaves), folders cannot be moved directly, and non-empty
//! folders cannot be deleted. Per-operation call counters let tests assert
//! not just the final tree but how it was reached — in particular that a
//! repeated run performs zero mutations.

use crate::entity::{Entity, EntityKind};
use crate::error::{ErrorKind, Result};
use crate::path;
use crate::service::InventoryService;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    /// Folder path -> identifier. The root ("") is implicit.
    folders: HashMap<String, String>,
    /// Item path -> identifier.
    items: HashMap<String, String>,
    next_id: usize,
}

impl State {
    fn next_id(&mut self, kind: EntityKind) -> String {
        self.next_id += 1;
        format!("{}-{}", kind.as_str(), self.next_id)
    }

    /// Creates the folder and any missing ancestors, exact-case.
    fn ensure_folder(&mut self, folder: &str) {
        let mut current = String::new();
        for segment in path::segments(folder) {
            current = path::join(&current, segment);
            if !self.folders.contains_key(&current) {
                let id = self.next_id(EntityKind::Folder);
                self.folders.insert(current.clone(), id);
            }
        }
    }

    fn has_children(&self, folder: &str) -> bool {
        self.folders.keys().chain(self.items.keys()).any(|p| parent_of(p) == folder)
    }
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

fn name_of(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// In-memory inventory tree with call accounting.
#[derive(Debug, Default)]
pub struct MockBackend {
    state: RwLock<State>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    move_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MockBackend {
    /// Seeds folders (ancestors included), consuming and returning `self`
    /// for chaining.
    pub fn with_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.state.get_mut();
        for folder in folders {
            state.ensure_folder(folder.as_ref());
        }
        self
    }

    /// Seeds items at the given paths, creating parent folders as needed.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.state.get_mut();
        for item in items {
            let item = item.as_ref();
            let parent = parent_of(item);
            if !parent.is_empty() {
                state.ensure_folder(parent);
            }
            let id = state.next_id(EntityKind::Item);
            state.items.insert(item.to_string(), id);
        }
        self
    }

    pub async fn contains_folder(&self, path: &str) -> bool {
        self.state.read().await.folders.contains_key(path)
    }

    pub async fn contains_item(&self, path: &str) -> bool {
        self.state.read().await.items.contains_key(path)
    }

    /// All item paths, sorted. Handy for asserting a whole run's outcome.
    pub async fn item_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.state.read().await.items.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Total store-mutating calls (create + move + delete) since
    /// construction.
    pub fn mutation_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
            + self.move_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryService for MockBackend {
    async fn list(&self, path: &str) -> Result<Vec<Entity>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;
        if !path.is_empty() && !state.folders.contains_key(path) {
            exn::bail!(ErrorKind::NotFound(path.to_string()));
        }
        let mut children: Vec<Entity> = Vec::new();
        for (folder, id) in &state.folders {
            if parent_of(folder) == path && !folder.is_empty() {
                children
                    .push(Entity::new(id, name_of(folder), EntityKind::Folder).with_parent(path));
            }
        }
        for (item, id) in &state.items {
            if parent_of(item) == path {
                children.push(Entity::new(id, name_of(item), EntityKind::Item).with_parent(path));
            }
        }
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn create_folder(&self, parent: &str, name: &str) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        if !parent.is_empty() && !state.folders.contains_key(parent) {
            exn::bail!(ErrorKind::NotFound(parent.to_string()));
        }
        let folder = path::join(parent, name);
        if state.folders.contains_key(&folder) || state.items.contains_key(&folder) {
            exn::bail!(ErrorKind::AlreadyExists(folder));
        }
        let id = state.next_id(EntityKind::Folder);
        state.folders.insert(folder, id);
        Ok(())
    }

    async fn move_entity(&self, source: &str, target: &str) -> Result<()> {
        self.move_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        if !target.is_empty() && !state.folders.contains_key(target) {
            exn::bail!(ErrorKind::NotFound(target.to_string()));
        }
        if state.folders.contains_key(source) {
            // Same restriction as the real store: folders move by moving
            // their contents, never as a unit.
            exn::bail!(ErrorKind::Rejected(format!("cannot move folder {source}")));
        }
        let Some(id) = state.items.remove(source) else {
            exn::bail!(ErrorKind::NotFound(source.to_string()));
        };
        let destination = path::join(target, name_of(source));
        if state.items.contains_key(&destination) || state.folders.contains_key(&destination) {
            state.items.insert(source.to_string(), id);
            exn::bail!(ErrorKind::AlreadyExists(destination));
        }
        state.items.insert(destination, id);
        Ok(())
    }

    async fn delete_folder(&self, path: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        if !state.folders.contains_key(path) {
            exn::bail!(ErrorKind::NotFound(path.to_string()));
        }
        if state.has_children(path) {
            exn::bail!(ErrorKind::Rejected(format!("folder not empty: {path}")));
        }
        state.folders.remove(path);
        Ok(())
    }
}
