//! Memoizing translation cache
//!
//! Process-lifetime mapping from exact source strings to translations.
//! Entries are never evicted and failures are never cached. Keys are the
//! raw source text with no case-folding or trimming, so whitespace variants
//! of the same phrase are distinct entries.
//!
//! Concurrent identical lookups before the first completes will both miss
//! and both call the remote endpoint; there is no single-flight
//! de-duplication. The last insert wins, which is harmless since the
//! provider is deterministic per session.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::provider::{TranslationError, Translator};

/// Thread-safe memoizing facade over a [`Translator`].
#[derive(Clone)]
pub struct TranslationCache {
    translator: Arc<dyn Translator>,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl TranslationCache {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Translate `text`, serving from the cache when possible.
    ///
    /// A hit returns without any network call. A miss calls the remote
    /// collaborator; success is stored and returned, failure is returned
    /// uncached so the next attempt retries.
    pub async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        {
            let entries = self.entries.read().await;
            if let Some(cached) = entries.get(text) {
                return Ok(cached.clone());
            }
        }

        let translation = self.translator.translate(text).await?;

        {
            let mut entries = self.entries.write().await;
            entries.insert(text.to_string(), translation.clone());
        }

        Ok(translation)
    }

    /// Number of cached translations.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
