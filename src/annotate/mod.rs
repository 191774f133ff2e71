//! Annotation layer: word units from OCR and their sentence grouping.

mod grouper;
mod types;

pub use grouper::group_sentences;
pub use types::{SentenceUnit, WordUnit};
