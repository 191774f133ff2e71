//! Sentence grouping
//!
//! Folds a flat OCR word stream into sentence units. A sentence closes at
//! any word ending in `.`, `!` or `?`, and unconditionally at the end of
//! the input, so a trailing unterminated fragment still becomes its own
//! sentence. Single left-to-right pass, no backtracking.

use crate::geometry::BoundingBox;

use super::types::{SentenceUnit, WordUnit};

/// Open sentence accumulator for the grouping pass.
struct SentenceBuilder {
    text: String,
    bbox: Option<BoundingBox>,
    words: Vec<WordUnit>,
}

impl SentenceBuilder {
    fn new() -> Self {
        Self {
            text: String::new(),
            bbox: None,
            words: Vec::new(),
        }
    }

    fn push(&mut self, word: &WordUnit) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(&word.text);
        self.bbox = Some(match self.bbox {
            Some(ref acc) => acc.union(&word.bbox),
            None => word.bbox,
        });
        self.words.push(word.clone());
    }

    fn finish(self) -> Option<SentenceUnit> {
        let bbox = self.bbox?;
        Some(SentenceUnit {
            text: self.text,
            bbox,
            words: self.words,
        })
    }
}

/// Whether a word text closes the current sentence.
fn ends_sentence(text: &str) -> bool {
    matches!(text.chars().last(), Some('.') | Some('!') | Some('?'))
}

/// Group an ordered word sequence into sentence units.
///
/// Total over all inputs: empty input yields an empty output, and every
/// input word lands in exactly one sentence, in original relative order.
pub fn group_sentences(words: &[WordUnit]) -> Vec<SentenceUnit> {
    let mut sentences = Vec::new();
    let mut current = SentenceBuilder::new();

    for (index, word) in words.iter().enumerate() {
        current.push(word);

        if ends_sentence(&word.text) || index == words.len() - 1 {
            if let Some(sentence) = std::mem::replace(&mut current, SentenceBuilder::new()).finish()
            {
                sentences.push(sentence);
            }
        }
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> WordUnit {
        WordUnit {
            text: text.to_string(),
            bbox: BoundingBox::new(x0, y0, x1, y1),
            confidence: 90.0,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(group_sentences(&[]).is_empty());
    }

    #[test]
    fn test_punctuation_and_end_of_input_boundaries() {
        let words = vec![
            word("Hello", 0.0, 0.0, 10.0, 10.0),
            word("world.", 12.0, 0.0, 25.0, 10.0),
            word("Next", 0.0, 15.0, 10.0, 25.0),
        ];
        let sentences = group_sentences(&words);

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Hello world.");
        assert_eq!(sentences[1].text, "Next");
        assert_eq!(sentences[0].words.len(), 2);
        assert_eq!(sentences[1].words.len(), 1);
    }

    #[test]
    fn test_single_unterminated_word_is_a_sentence() {
        let sentences = group_sentences(&[word("fragment", 0.0, 0.0, 5.0, 5.0)]);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "fragment");
    }

    #[test]
    fn test_bbox_is_union_of_member_boxes() {
        let words = vec![
            word("a", 0.0, 0.0, 10.0, 10.0),
            word("b.", 15.0, 5.0, 25.0, 20.0),
        ];
        let sentences = group_sentences(&words);
        assert_eq!(sentences[0].bbox, BoundingBox::new(0.0, 0.0, 25.0, 20.0));
    }

    #[test]
    fn test_every_word_in_exactly_one_sentence_in_order() {
        let words = vec![
            word("One", 0.0, 0.0, 5.0, 5.0),
            word("two!", 6.0, 0.0, 10.0, 5.0),
            word("Three?", 11.0, 0.0, 15.0, 5.0),
            word("four", 16.0, 0.0, 20.0, 5.0),
            word("five", 21.0, 0.0, 25.0, 5.0),
        ];
        let sentences = group_sentences(&words);

        let flattened: Vec<&str> = sentences
            .iter()
            .flat_map(|s| s.words.iter().map(|w| w.text.as_str()))
            .collect();
        assert_eq!(flattened, vec!["One", "two!", "Three?", "four", "five"]);
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn test_exclamation_and_question_close_sentences() {
        let words = vec![
            word("Stop!", 0.0, 0.0, 5.0, 5.0),
            word("Why?", 6.0, 0.0, 10.0, 5.0),
        ];
        let sentences = group_sentences(&words);
        assert_eq!(sentences.len(), 2);
    }
}
