//! Per-user render cache.
//!
//! Stands in for the hosted framework's per-path render cache: page
//! renders are cached per user and path, and the actions invalidate a
//! user's entries after every successful write so the next read
//! reflects the change.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use visage_core::UserId;

#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    entries: Arc<RwLock<HashMap<UserId, HashMap<String, String>>>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user: UserId, path: &str) -> Option<String> {
        self.entries.read().await.get(&user)?.get(path).cloned()
    }

    pub async fn insert(&self, user: UserId, path: &str, rendered: String) {
        self.entries
            .write()
            .await
            .entry(user)
            .or_default()
            .insert(path.to_string(), rendered);
    }

    /// Drop every cached render for one user.
    pub async fn invalidate(&self, user: UserId) {
        if self.entries.write().await.remove(&user).is_some() {
            tracing::debug!(%user, "render cache invalidated");
        }
    }
}
