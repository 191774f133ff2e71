//! Upstream asset fetcher
//!
//! The seam between the caching protocol and the network. The HTTP
//! implementation fronts the origin that hosts the static client.

use async_trait::async_trait;

use super::types::{AssetFetchError, FetchedAsset};

/// Asset retrieval seam.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch a root-relative path from the upstream origin.
    ///
    /// Non-2xx responses are returned as values; `Err` means the upstream
    /// was unreachable.
    async fn fetch(&self, path: &str) -> Result<FetchedAsset, AssetFetchError>;
}

/// HTTP fetcher against the configured upstream origin.
pub struct HttpFetcher {
    client: reqwest::Client,
    origin: String,
}

impl HttpFetcher {
    pub fn new(origin: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchedAsset, AssetFetchError> {
        let url = format!("{}{}", self.origin, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AssetFetchError::Upstream {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| guess_content_type(path));

        let body = response
            .bytes()
            .await
            .map_err(|e| AssetFetchError::Upstream {
                path: path.to_string(),
                reason: e.to_string(),
            })?
            .to_vec();

        Ok(FetchedAsset {
            body,
            content_type,
            status,
        })
    }
}

/// Guess a content type from the path when the upstream omits the header.
pub fn guess_content_type(path: &str) -> String {
    if path == "/" || path.ends_with('/') {
        return "text/html".to_string();
    }
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Scriptable fetcher for tests: canned responses per path, a failure
/// switch, and a call counter.
#[cfg(test)]
pub struct MockFetcher {
    responses: std::sync::Mutex<std::collections::HashMap<String, FetchedAsset>>,
    fail: std::sync::atomic::AtomicBool,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: std::sync::Mutex::new(std::collections::HashMap::new()),
            fail: std::sync::atomic::AtomicBool::new(false),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.responses.lock().unwrap().insert(
            path.to_string(),
            FetchedAsset {
                body: body.as_bytes().to_vec(),
                content_type: guess_content_type(path),
                status,
            },
        );
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.fail
            .store(unreachable, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl AssetFetcher for MockFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchedAsset, AssetFetchError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AssetFetchError::Upstream {
                path: path.to_string(),
                reason: "network unreachable".to_string(),
            });
        }
        self.responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| AssetFetchError::Upstream {
                path: path.to_string(),
                reason: "no canned response".to_string(),
            })
    }
}
