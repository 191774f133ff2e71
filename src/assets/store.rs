//! Versioned asset store
//!
//! Entries are grouped under named cache versions; exactly one version is
//! current per client generation and the rest are garbage. Reads hand out
//! independent copies so a stored body is never shared with a response.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::types::CachedAsset;

/// Thread-safe store of versioned asset caches.
#[derive(Clone, Default)]
pub struct AssetStore {
    versions: Arc<RwLock<HashMap<String, HashMap<String, CachedAsset>>>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry in a version, returning a copy.
    pub async fn get(&self, version: &str, path: &str) -> Option<CachedAsset> {
        let versions = self.versions.read().await;
        versions.get(version)?.get(path).cloned()
    }

    /// Insert or overwrite an entry in a version, creating the version if
    /// it does not exist yet.
    pub async fn put(&self, version: &str, path: &str, asset: CachedAsset) {
        let mut versions = self.versions.write().await;
        versions
            .entry(version.to_string())
            .or_default()
            .insert(path.to_string(), asset);
    }

    /// Commit a fully assembled version in one step (atomic install seed).
    pub async fn commit_version(&self, version: &str, entries: HashMap<String, CachedAsset>) {
        let mut versions = self.versions.write().await;
        versions.insert(version.to_string(), entries);
    }

    /// Names of every stored version.
    pub async fn version_names(&self) -> Vec<String> {
        let versions = self.versions.read().await;
        versions.keys().cloned().collect()
    }

    /// Delete a whole version. Returns whether it existed.
    pub async fn delete_version(&self, version: &str) -> bool {
        let mut versions = self.versions.write().await;
        versions.remove(version).is_some()
    }

    /// Whether a version has been committed.
    pub async fn contains_version(&self, version: &str) -> bool {
        let versions = self.versions.read().await;
        versions.contains_key(version)
    }

    /// Number of entries in a version.
    pub async fn version_len(&self, version: &str) -> usize {
        let versions = self.versions.read().await;
        versions.get(version).map(|v| v.len()).unwrap_or(0)
    }
}
