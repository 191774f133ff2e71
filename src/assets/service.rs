//! Stale-while-revalidate caching service
//!
//! Lifecycle mirrors a service-worker generation: `install` seeds the
//! current cache version with the full asset manifest (all-or-nothing),
//! `activate` garbage-collects every other version and takes over request
//! handling immediately. Request handling serves cached entries without
//! touching the network and refreshes them from a detached background
//! task whose failures are swallowed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::fetcher::AssetFetcher;
use super::store::AssetStore;
use super::types::{AssetFetchError, CachedAsset, FetchedAsset};

/// Root-relative paths that must be fully cacheable offline. Changing this
/// set requires a version-token bump so a fresh generation re-seeds.
pub const ASSET_MANIFEST: &[&str] = &[
    "/",
    "/index.html",
    "/app.js",
    "/styles.css",
    "/icon-192.png",
    "/manifest.json",
];

/// Document served for failed full-page navigations with no cache entry.
pub const OFFLINE_FALLBACK_PATH: &str = "/offline.html";

/// Cache generation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Installing,
    WaitingActivation,
    Active,
}

/// Where a served asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeSource {
    Cache,
    Network,
    OfflineFallback,
}

/// An asset ready to be written to the response.
#[derive(Debug, Clone)]
pub struct ServedAsset {
    pub body: Vec<u8>,
    pub content_type: String,
    pub status: u16,
    pub source: ServeSource,
}

impl ServedAsset {
    fn from_cached(asset: CachedAsset, source: ServeSource) -> Self {
        Self {
            body: asset.body,
            content_type: asset.content_type,
            status: asset.status,
            source,
        }
    }

    fn from_network(asset: FetchedAsset) -> Self {
        Self {
            body: asset.body,
            content_type: asset.content_type,
            status: asset.status,
            source: ServeSource::Network,
        }
    }
}

/// The asset caching protocol over a store and an upstream fetcher.
#[derive(Clone)]
pub struct AssetCacheService {
    store: AssetStore,
    fetcher: Arc<dyn AssetFetcher>,
    version: String,
    state: Arc<RwLock<LifecycleState>>,
}

impl AssetCacheService {
    /// Create a service for the given version token. Nothing is cached
    /// until [`install`](Self::install) succeeds.
    pub fn new(fetcher: Arc<dyn AssetFetcher>, version_token: &str) -> Self {
        Self {
            store: AssetStore::new(),
            fetcher,
            version: format!("wordlens-assets-{}", version_token),
            state: Arc::new(RwLock::new(LifecycleState::Installing)),
        }
    }

    /// Current cache version name.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Pre-populate the current version with the full manifest plus the
    /// offline fallback document.
    ///
    /// Atomic: assets are fetched into a staging map and committed in one
    /// step; if any single fetch fails or returns a non-2xx status the
    /// whole install fails and nothing is stored.
    pub async fn install(&self) -> Result<(), AssetFetchError> {
        let paths: Vec<&str> = ASSET_MANIFEST
            .iter()
            .copied()
            .chain(std::iter::once(OFFLINE_FALLBACK_PATH))
            .collect();

        let fetches = paths.iter().map(|path| self.fetcher.fetch(path));
        let fetched = futures::future::try_join_all(fetches).await?;

        let mut staged = HashMap::new();
        for (path, asset) in paths.iter().zip(fetched) {
            if !asset.is_success() {
                return Err(AssetFetchError::InstallFailed(format!(
                    "{} returned status {}",
                    path, asset.status
                )));
            }
            staged.insert(path.to_string(), CachedAsset::from_fetched(&asset));
        }

        self.store.commit_version(&self.version, staged).await;

        let mut state = self.state.write().await;
        *state = LifecycleState::WaitingActivation;
        tracing::info!(
            "asset cache {} installed ({} entries)",
            self.version,
            paths.len()
        );
        Ok(())
    }

    /// Delete every stored version other than the current one, then start
    /// handling requests immediately.
    pub async fn activate(&self) {
        for name in self.store.version_names().await {
            if name != self.version {
                self.store.delete_version(&name).await;
                tracing::info!("deleted stale asset cache {}", name);
            }
        }

        let mut state = self.state.write().await;
        *state = LifecycleState::Active;
    }

    /// Serve an asset from the current cache version, without any network
    /// wait. `None` on a miss.
    pub async fn serve_cached(&self, path: &str) -> Option<ServedAsset> {
        self.store
            .get(&self.version, path)
            .await
            .map(|asset| ServedAsset::from_cached(asset, ServeSource::Cache))
    }

    /// Refresh one cache entry from the upstream.
    ///
    /// Only a 2xx response overwrites the entry; any failure is swallowed
    /// here so it can never surface to a caller that already got the
    /// cached copy.
    pub async fn revalidate(&self, path: &str) {
        match self.fetcher.fetch(path).await {
            Ok(asset) if asset.is_success() => {
                self.store
                    .put(&self.version, path, CachedAsset::from_fetched(&asset))
                    .await;
            }
            Ok(asset) => {
                tracing::debug!("revalidation of {} got status {}, keeping cached copy", path, asset.status);
            }
            Err(e) => {
                tracing::debug!("revalidation of {} failed: {}", path, e);
            }
        }
    }

    /// Kick off a detached revalidation task for `path`.
    fn spawn_revalidate(&self, path: &str) {
        let service = self.clone();
        let path = path.to_string();
        tokio::spawn(async move {
            service.revalidate(&path).await;
        });
    }

    /// Handle an intercepted GET for a same-origin path.
    ///
    /// Cache hit: return the cached copy immediately and revalidate in the
    /// background. Miss: go to the network; a 2xx response is stored (as
    /// an independent copy) and returned; a failure or non-2xx status on a
    /// navigation request yields the offline fallback document, while
    /// non-navigation failures propagate to the caller.
    pub async fn handle_get(
        &self,
        path: &str,
        is_navigation: bool,
    ) -> Result<ServedAsset, AssetFetchError> {
        if let Some(served) = self.serve_cached(path).await {
            self.spawn_revalidate(path);
            return Ok(served);
        }

        match self.fetcher.fetch(path).await {
            Ok(asset) if asset.is_success() => {
                self.store
                    .put(&self.version, path, CachedAsset::from_fetched(&asset))
                    .await;
                Ok(ServedAsset::from_network(asset))
            }
            Ok(asset) => {
                if is_navigation {
                    self.offline_fallback().await.ok_or_else(|| {
                        AssetFetchError::Upstream {
                            path: path.to_string(),
                            reason: format!("status {} and no offline fallback cached", asset.status),
                        }
                    })
                } else {
                    // Non-navigation: hand the non-success response through.
                    Ok(ServedAsset::from_network(asset))
                }
            }
            Err(e) => {
                if is_navigation {
                    self.offline_fallback().await.ok_or(e)
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn offline_fallback(&self) -> Option<ServedAsset> {
        self.store
            .get(&self.version, OFFLINE_FALLBACK_PATH)
            .await
            .map(|asset| ServedAsset::from_cached(asset, ServeSource::OfflineFallback))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fetcher::MockFetcher;
    use super::*;

    fn seeded_fetcher() -> MockFetcher {
        let fetcher = MockFetcher::new();
        for path in ASSET_MANIFEST {
            fetcher.respond(path, 200, &format!("body of {}", path));
        }
        fetcher.respond(OFFLINE_FALLBACK_PATH, 200, "<h1>offline</h1>");
        fetcher
    }

    async fn installed_service(fetcher: MockFetcher) -> (AssetCacheService, Arc<MockFetcher>) {
        let fetcher = Arc::new(fetcher);
        let service = AssetCacheService::new(fetcher.clone(), "v1");
        service.install().await.unwrap();
        service.activate().await;
        (service, fetcher)
    }

    #[tokio::test]
    async fn test_install_seeds_manifest_and_fallback() {
        let (service, _) = installed_service(seeded_fetcher()).await;

        assert_eq!(service.state().await, LifecycleState::Active);
        assert_eq!(
            service.store().version_len(service.version()).await,
            ASSET_MANIFEST.len() + 1
        );
        assert!(service.serve_cached("/app.js").await.is_some());
    }

    #[tokio::test]
    async fn test_install_is_all_or_nothing() {
        let fetcher = seeded_fetcher();
        fetcher.respond("/icon-192.png", 404, "gone");

        let fetcher = Arc::new(fetcher);
        let service = AssetCacheService::new(fetcher, "v1");

        assert!(service.install().await.is_err());
        assert_eq!(service.state().await, LifecycleState::Installing);
        assert!(!service.store().contains_version(service.version()).await);
    }

    #[tokio::test]
    async fn test_cached_hit_serves_without_network_wait() {
        let (service, fetcher) = installed_service(seeded_fetcher()).await;

        // Upstream down: the cached copy must still resolve.
        fetcher.set_unreachable(true);

        let served = service.serve_cached("/app.js").await.unwrap();
        assert_eq!(served.source, ServeSource::Cache);
        assert_eq!(served.body, b"body of /app.js");
    }

    #[tokio::test]
    async fn test_revalidation_overwrites_entry_on_success() {
        let (service, fetcher) = installed_service(seeded_fetcher()).await;

        fetcher.respond("/app.js", 200, "fresh body");
        service.revalidate("/app.js").await;

        let served = service.serve_cached("/app.js").await.unwrap();
        assert_eq!(served.body, b"fresh body");
    }

    #[tokio::test]
    async fn test_failed_revalidation_keeps_cached_copy() {
        let (service, fetcher) = installed_service(seeded_fetcher()).await;

        fetcher.set_unreachable(true);
        service.revalidate("/app.js").await;
        fetcher.set_unreachable(false);
        fetcher.respond("/app.js", 500, "boom");
        service.revalidate("/app.js").await;

        let served = service.serve_cached("/app.js").await.unwrap();
        assert_eq!(served.body, b"body of /app.js");
    }

    #[tokio::test]
    async fn test_miss_fetches_and_stores_copy() {
        let (service, fetcher) = installed_service(seeded_fetcher()).await;
        fetcher.respond("/extra.css", 200, "p{}");

        let served = service.handle_get("/extra.css", false).await.unwrap();
        assert_eq!(served.source, ServeSource::Network);
        assert_eq!(served.body, b"p{}");

        // Now cached: serve resolves with the upstream unreachable.
        fetcher.set_unreachable(true);
        let cached = service.serve_cached("/extra.css").await.unwrap();
        assert_eq!(cached.body, b"p{}");
    }

    #[tokio::test]
    async fn test_offline_navigation_falls_back_to_offline_document() {
        let (service, fetcher) = installed_service(seeded_fetcher()).await;
        fetcher.set_unreachable(true);

        let served = service.handle_get("/some/page", true).await.unwrap();
        assert_eq!(served.source, ServeSource::OfflineFallback);
        assert_eq!(served.body, b"<h1>offline</h1>");
    }

    #[tokio::test]
    async fn test_navigation_miss_with_error_status_serves_offline_document() {
        // Upstream reachable but failing: a navigation for an uncached
        // path still gets the offline document, not the 500.
        let (service, fetcher) = installed_service(seeded_fetcher()).await;
        fetcher.respond("/some/page", 500, "boom");

        let served = service.handle_get("/some/page", true).await.unwrap();
        assert_eq!(served.source, ServeSource::OfflineFallback);
        assert_eq!(served.body, b"<h1>offline</h1>");

        // The error response was never cached.
        assert!(service.serve_cached("/some/page").await.is_none());
    }

    #[tokio::test]
    async fn test_non_navigation_miss_with_error_status_passes_through() {
        let (service, fetcher) = installed_service(seeded_fetcher()).await;
        fetcher.respond("/some/data.json", 500, "boom");

        let served = service.handle_get("/some/data.json", false).await.unwrap();
        assert_eq!(served.source, ServeSource::Network);
        assert_eq!(served.status, 500);
        assert!(service.serve_cached("/some/data.json").await.is_none());
    }

    #[tokio::test]
    async fn test_offline_non_navigation_propagates_failure() {
        let (service, fetcher) = installed_service(seeded_fetcher()).await;
        fetcher.set_unreachable(true);

        let result = service.handle_get("/some/data.json", false).await;
        assert!(matches!(result, Err(AssetFetchError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_activate_deletes_every_stale_version() {
        let fetcher = Arc::new(seeded_fetcher());
        let service = AssetCacheService::new(fetcher, "v2");

        // Leftovers from previous client generations.
        service
            .store()
            .put(
                "wordlens-assets-v1",
                "/",
                CachedAsset {
                    body: b"old".to_vec(),
                    content_type: "text/html".to_string(),
                    status: 200,
                    stored_at: chrono::Utc::now(),
                },
            )
            .await;
        service
            .store()
            .put(
                "wordlens-assets-v0",
                "/",
                CachedAsset {
                    body: b"older".to_vec(),
                    content_type: "text/html".to_string(),
                    status: 200,
                    stored_at: chrono::Utc::now(),
                },
            )
            .await;

        service.install().await.unwrap();
        service.activate().await;

        let mut names = service.store().version_names().await;
        names.sort();
        assert_eq!(names, vec!["wordlens-assets-v2".to_string()]);
    }

    #[tokio::test]
    async fn test_cold_cache_passes_misses_through() {
        // Install never ran (e.g. upstream down at boot): requests still work.
        let fetcher = Arc::new(seeded_fetcher());
        let service = AssetCacheService::new(fetcher.clone(), "v1");

        let served = service.handle_get("/app.js", false).await.unwrap();
        assert_eq!(served.source, ServeSource::Network);
        assert_eq!(fetcher.calls(), 1);
    }
}
