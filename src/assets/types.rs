//! Asset cache types

use chrono::{DateTime, Utc};

/// An asset fetched from the upstream origin.
///
/// Non-2xx responses are represented as values, not errors; only transport
/// failures surface as [`AssetFetchError`].
#[derive(Debug, Clone)]
pub struct FetchedAsset {
    pub body: Vec<u8>,
    pub content_type: String,
    pub status: u16,
}

impl FetchedAsset {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A cache entry scoped to a named cache version.
#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub body: Vec<u8>,
    pub content_type: String,
    pub status: u16,
    pub stored_at: DateTime<Utc>,
}

impl CachedAsset {
    /// Store an independent copy of a fetched asset.
    ///
    /// The copy consumed by the cache must be distinct from the body
    /// returned to the caller; bodies are never shared between the two.
    pub fn from_fetched(asset: &FetchedAsset) -> Self {
        Self {
            body: asset.body.clone(),
            content_type: asset.content_type.clone(),
            status: asset.status,
            stored_at: Utc::now(),
        }
    }
}

/// Asset retrieval failure (upstream unreachable).
#[derive(Debug, thiserror::Error)]
pub enum AssetFetchError {
    #[error("Upstream fetch failed for {path}: {reason}")]
    Upstream { path: String, reason: String },

    #[error("Asset cache install failed: {0}")]
    InstallFailed(String),
}
