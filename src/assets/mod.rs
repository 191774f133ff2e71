//! Offline asset delivery
//!
//! A versioned cache in front of the static-client upstream, implementing
//! the stale-while-revalidate protocol: cached assets are served
//! immediately while a detached task refreshes them in the background,
//! stale cache generations are garbage-collected on activation, and failed
//! full-page navigations fall back to a fixed offline document.

mod fetcher;
mod service;
mod store;
mod types;

pub use fetcher::{AssetFetcher, HttpFetcher};
pub use service::{
    AssetCacheService, LifecycleState, ServeSource, ServedAsset, ASSET_MANIFEST,
    OFFLINE_FALLBACK_PATH,
};
pub use store::AssetStore;
pub use types::{AssetFetchError, CachedAsset, FetchedAsset};

#[cfg(test)]
pub use fetcher::MockFetcher;
