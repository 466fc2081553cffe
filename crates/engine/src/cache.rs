//! Process-lifetime cache of confirmed logical paths.

use crate::resolve::ResolvedPath;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Lazily-populated mapping from logical path to [`ResolvedPath`].
///
/// Lives as long as its [`Context`](crate::Context) and is never persisted
/// across runs; the only invalidation is an explicit [`force_refresh`](Self::force_refresh).
#[derive(Debug, Default)]
pub struct PathCache {
    inner: RwLock<HashMap<String, ResolvedPath>>,
}

impl PathCache {
    pub async fn get(&self, logical: &str) -> Option<ResolvedPath> {
        self.inner.read().await.get(logical).cloned()
    }

    pub async fn insert(&self, logical: impl Into<String>, resolved: ResolvedPath) {
        self.inner.write().await.insert(logical.into(), resolved);
    }

    /// Drops every cached entry; the next resolve re-confirms against the
    /// store.
    pub async fn force_refresh(&self) {
        self.inner.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_refresh() {
        let cache = PathCache::default();
        assert_eq!(cache.get("Clothing").await, None);
        cache.insert("Clothing", ResolvedPath::confirmed("Clothing".to_string())).await;
        assert_eq!(cache.get("Clothing").await.unwrap().path, "Clothing");
        cache.force_refresh().await;
        assert_eq!(cache.get("Clothing").await, None);
    }
}
