//! OCR collaborator
//!
//! The recognition engine is an opaque remote service: it receives an image
//! and returns plain text plus per-word bounding boxes and confidence. Its
//! internals are out of scope; every failure surfaces as a generic
//! `RecognitionError`.

mod provider;
mod types;

pub use provider::{OcrEngine, RemoteOcrEngine};
pub use types::{OcrOutcome, RecognitionError};

#[cfg(test)]
pub use provider::MockOcrEngine;
