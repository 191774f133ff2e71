//! Annotation unit types
//!
//! `WordUnit` is the normalized form of a single OCR token; `SentenceUnit`
//! aggregates consecutive words into a sentence with the minimal enclosing
//! rectangle of its members. Both are immutable once produced: a new image
//! upload replaces them wholesale.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// A single recognized word with its geometry and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordUnit {
    /// Word text as recognized
    pub text: String,
    /// Location on the source image (OCR-native resolution)
    pub bbox: BoundingBox,
    /// Recognition confidence (0-100)
    pub confidence: f64,
}

/// A group of consecutive words forming one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceUnit {
    /// Space-joined concatenation of member word texts, in original order
    pub text: String,
    /// Minimal enclosing rectangle of all member words
    pub bbox: BoundingBox,
    /// Member words in original order
    pub words: Vec<WordUnit>,
}
