//! Reading sessions
//!
//! All mutable per-image state (display mode, box collections, overlay,
//! scale) lives in an explicit [`ReadingSession`] rather than ambient
//! globals, so repeated and concurrent sessions are independent. Mode
//! transitions and click dispatch follow the controller rules in
//! `controller`.

mod controller;
mod store;
mod types;

pub use controller::{resolve_click, ReadingSession, TRANSLATION_FAILED_PLACEHOLDER};
pub use store::SessionStore;
pub use types::{ClickOutcome, DisplayMode};
