//! Speech collaborator
//!
//! Speaking is a capability, not an error path: when no synthesizer is
//! available the feature degrades silently and the rest of the flow is
//! unaffected. The session layer only produces [`Utterance`] values; actual
//! audio output is up to the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text to be spoken, with the BCP 47 language tag to speak it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub language: String,
}

impl Utterance {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.to_string(),
        }
    }
}

/// Speech synthesis seam.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Whether speech output is available at all.
    async fn is_available(&self) -> bool;

    /// Speak an utterance. Must be a no-op when unavailable.
    async fn speak(&self, utterance: &Utterance);
}

/// Synthesizer for deployments with no audio path.
pub struct DisabledSpeech;

#[async_trait]
impl SpeechSynthesizer for DisabledSpeech {
    async fn is_available(&self) -> bool {
        false
    }

    async fn speak(&self, utterance: &Utterance) {
        tracing::debug!("speech disabled, dropping utterance: {}", utterance.text);
    }
}
