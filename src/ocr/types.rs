//! OCR collaborator types

use serde::{Deserialize, Serialize};

use crate::annotate::WordUnit;

/// Result of one recognition run: full text plus the flat word stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrOutcome {
    /// Full recognized text
    pub text: String,
    /// Per-word results in reading order
    pub words: Vec<WordUnit>,
}

/// Recognition failure. The engine is a black box, so no finer-grained
/// taxonomy is exposed than the transport/parse distinction.
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("OCR engine unreachable: {0}")]
    Unreachable(String),

    #[error("OCR engine returned {status}: {body}")]
    EngineFailure { status: u16, body: String },

    #[error("Failed to parse OCR response: {0}")]
    MalformedResponse(String),
}
