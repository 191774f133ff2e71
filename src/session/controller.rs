//! Mode controller
//!
//! Owns the transition effect (pick the active box collection, rebuild the
//! overlay wholesale) and the click dispatch table keyed by
//! (mode, click target granularity).

use crate::annotate::{group_sentences, SentenceUnit, WordUnit};
use crate::ocr::OcrOutcome;
use crate::overlay::{ClickTarget, Overlay};
use crate::speech::Utterance;
use crate::translate::{TranslationCache, SOURCE_LANGUAGE, TARGET_LANGUAGE};

use super::types::{ClickOutcome, DisplayMode};

/// Shown in place of a translation when the provider is unavailable.
pub const TRANSLATION_FAILED_PLACEHOLDER: &str = "翻譯失敗";

/// Per-image annotation state.
///
/// Created from one OCR run and replaced wholesale on the next upload.
#[derive(Debug, Clone)]
pub struct ReadingSession {
    /// Full recognized text
    pub text: String,
    /// Display scale the source raster was fitted at
    pub scale: f64,
    /// Word-level boxes from OCR
    pub words: Vec<WordUnit>,
    /// Sentence-level boxes derived from the word stream
    pub sentences: Vec<SentenceUnit>,
    /// Active interaction mode
    pub mode: DisplayMode,
    /// Projected highlight surface for the active mode
    pub overlay: Overlay,
}

impl ReadingSession {
    /// Build a session from an OCR outcome at the given display scale.
    ///
    /// Starts in `Original` mode with the word boxes projected.
    pub fn new(outcome: OcrOutcome, scale: f64) -> Self {
        let sentences = group_sentences(&outcome.words);
        let mut session = Self {
            text: outcome.text,
            scale,
            words: outcome.words,
            sentences,
            mode: DisplayMode::Original,
            overlay: Overlay::default(),
        };
        session.rebuild_overlay();
        session
    }

    /// Switch the active mode and rebuild the overlay from scratch.
    ///
    /// No transition is rejected; switching to the current mode still
    /// rebuilds, which keeps the "no stale overlay" guarantee trivially.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        self.rebuild_overlay();
    }

    /// Resolve a click on overlay box `index` to its payload.
    pub fn click_target(&self, index: usize) -> Option<ClickTarget> {
        self.overlay.dispatch_click(index).cloned()
    }

    fn rebuild_overlay(&mut self) {
        let targets: Vec<ClickTarget> = match self.mode {
            DisplayMode::Sentence => self
                .sentences
                .iter()
                .cloned()
                .map(ClickTarget::Sentence)
                .collect(),
            DisplayMode::Original | DisplayMode::Translate => {
                self.words.iter().cloned().map(ClickTarget::Word).collect()
            }
        };
        self.overlay.rebuild(targets, self.scale);
    }
}

/// Apply the (mode, granularity) dispatch table to a clicked box.
///
/// Inactive combinations (a word box in sentence mode or a sentence box
/// outside translate mode's sentence path) are no-ops and return `None`.
/// The translate path recovers locally from an unavailable provider by
/// pairing the original text with [`TRANSLATION_FAILED_PLACEHOLDER`].
pub async fn resolve_click(
    mode: DisplayMode,
    target: &ClickTarget,
    translations: &TranslationCache,
) -> Option<ClickOutcome> {
    let text = target.text();

    match (mode, target) {
        (DisplayMode::Original, ClickTarget::Word(_))
        | (DisplayMode::Sentence, ClickTarget::Sentence(_)) => Some(ClickOutcome {
            original: text.to_string(),
            translation: text.to_string(),
            utterance: Some(Utterance::new(text, SOURCE_LANGUAGE)),
        }),
        (DisplayMode::Translate, _) => match translations.translate(text).await {
            Ok(translation) => Some(ClickOutcome {
                original: text.to_string(),
                translation: translation.clone(),
                utterance: Some(Utterance::new(&translation, TARGET_LANGUAGE)),
            }),
            Err(e) => {
                tracing::warn!("translation failed for clicked box: {}", e);
                Some(ClickOutcome {
                    original: text.to_string(),
                    translation: TRANSLATION_FAILED_PLACEHOLDER.to_string(),
                    utterance: None,
                })
            }
        },
        // Boxes of the other granularity are not active in these modes.
        (DisplayMode::Original, ClickTarget::Sentence(_))
        | (DisplayMode::Sentence, ClickTarget::Word(_)) => None,
    }
}
