//! Session-facing types

use serde::{Deserialize, Serialize};

use crate::speech::Utterance;

/// The three mutually exclusive interaction modes.
///
/// Flat state machine: any mode is reachable from any other in one step,
/// no transition is rejected, no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Word boxes active; clicks speak and echo the original word.
    Original,
    /// Word boxes active; clicks translate and speak the translation.
    Translate,
    /// Sentence boxes active; clicks speak and echo the sentence.
    Sentence,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Original
    }
}

/// What a resolved click produces: the text pair to display and an
/// optional utterance for the speech collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickOutcome {
    /// Original-language text of the clicked box
    pub original: String,
    /// Translation to display (the original itself outside translate mode,
    /// or the failure placeholder when the provider is unavailable)
    pub translation: String,
    /// Utterance to speak, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utterance: Option<Utterance>,
}
