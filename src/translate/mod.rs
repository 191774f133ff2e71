//! Translation layer
//!
//! A memoizing cache in front of the remote translation endpoint. Source
//! and target languages are fixed (English to Traditional Chinese) and not
//! parameterized per call.

mod cache;
mod provider;

pub use cache::TranslationCache;
pub use provider::{HttpTranslator, TranslationError, Translator};

/// Spoken-language tag for source-language utterances.
pub const SOURCE_LANGUAGE: &str = "en-US";
/// Spoken-language tag for translated utterances.
pub const TARGET_LANGUAGE: &str = "zh-TW";
