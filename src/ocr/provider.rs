//! OCR engine implementations
//!
//! `RemoteOcrEngine` posts the image as base64 JSON to a configured HTTP
//! endpoint and parses the word stream out of the response.

use async_trait::async_trait;
use serde::Deserialize;

use crate::annotate::WordUnit;
use crate::geometry::BoundingBox;

use super::types::{OcrOutcome, RecognitionError};

/// Recognition seam. Implementations must be shareable across handlers.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize English text in an encoded image.
    async fn recognize(&self, image_data: &[u8]) -> Result<OcrOutcome, RecognitionError>;
}

/// Remote OCR engine over HTTP.
pub struct RemoteOcrEngine {
    client: reqwest::Client,
    endpoint: String,
    language: String,
}

/// Wire shape of the engine's response.
#[derive(Deserialize)]
struct RecognizeResponse {
    text: String,
    words: Vec<RecognizedWord>,
}

#[derive(Deserialize)]
struct RecognizedWord {
    text: String,
    bbox: WireBBox,
    confidence: f64,
}

#[derive(Deserialize)]
struct WireBBox {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl RemoteOcrEngine {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            language: "eng".to_string(),
        }
    }
}

#[async_trait]
impl OcrEngine for RemoteOcrEngine {
    async fn recognize(&self, image_data: &[u8]) -> Result<OcrOutcome, RecognitionError> {
        use base64::Engine;

        let image_base64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        let request = serde_json::json!({
            "image": image_base64,
            "language": self.language,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RecognitionError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RecognitionError::EngineFailure { status, body });
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| RecognitionError::MalformedResponse(e.to_string()))?;

        let words = parsed
            .words
            .into_iter()
            .map(|w| WordUnit {
                text: w.text,
                bbox: BoundingBox::new(w.bbox.x0, w.bbox.y0, w.bbox.x1, w.bbox.y1),
                confidence: w.confidence,
            })
            .collect();

        Ok(OcrOutcome {
            text: parsed.text,
            words,
        })
    }
}

/// Canned-response engine for tests.
#[cfg(test)]
pub struct MockOcrEngine {
    pub outcome: OcrOutcome,
}

#[cfg(test)]
#[async_trait]
impl OcrEngine for MockOcrEngine {
    async fn recognize(&self, _image_data: &[u8]) -> Result<OcrOutcome, RecognitionError> {
        Ok(self.outcome.clone())
    }
}
