//! Remote translation collaborator
//!
//! The provider is opaque: `POST {text}` in, `{translation}` out. Any
//! transport error, non-2xx status or malformed body collapses into
//! `TranslationError::Unavailable`; callers recover locally.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Translation failure. Deliberately coarse: the user-facing recovery is
/// the same placeholder regardless of cause.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Translation service unavailable: {0}")]
    Unavailable(String),
}

/// Translation seam.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from the fixed source to the fixed target language.
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

/// HTTP translator against the configured endpoint.
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TranslateRequest { text })
            .send()
            .await
            .map_err(|e| TranslationError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslationError::Unavailable(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Unavailable(format!("malformed body: {}", e)))?;

        Ok(parsed.translation)
    }
}
