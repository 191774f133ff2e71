//! WordLens Server Library
//!
//! OCR reading assistant: annotates recognized text into word and sentence
//! units with image geometry, projects highlight overlays at display
//! scale, memoizes translations, and delivers the static client through a
//! stale-while-revalidate asset cache with versioned eviction and an
//! offline fallback.
//!
//! # Modules
//!
//! - `annotate`: word/sentence units and sentence grouping
//! - `overlay`: highlight projection and click dispatch
//! - `session`: per-image reading sessions and the mode controller
//! - `translate`: memoizing cache over the remote translation endpoint
//! - `assets`: versioned stale-while-revalidate asset cache
//! - `ocr` / `speech`: external collaborator seams

pub mod annotate;
pub mod assets;
pub mod config;
pub mod error;
pub mod geometry;
pub mod ocr;
pub mod overlay;
pub mod routes;
pub mod session;
pub mod speech;
pub mod state;
pub mod translate;
