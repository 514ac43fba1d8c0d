//! Deterministic lexicon classifier.
//!
//! Word-boundary regex matching over small positive/negative lexicons,
//! with negated-positive phrases ("not great") counted as negative. No
//! network, no model weights; the offline default and the test double of
//! choice.

use moodchat_core::{Classification, Classifier, MoodError, MoodLabel, Result};
use regex::Regex;

const POSITIVE_WORDS: &str = r"(?i)\b(happy|great|good|joy|joyful|excited|grateful|proud|calm|relaxed|hopeful|optimistic|wonderful|amazing|thriving|loved|content)\b";

const NEGATIVE_WORDS: &str = r"(?i)\b(sad|down|depressed|anxious|anxiety|worried|stressed|stress|angry|lonely|hopeless|tired|exhausted|miserable|awful|terrible|struggling|overwhelmed|crying|numb)\b";

// A negation immediately before a positive word flips its polarity.
const NEGATED_POSITIVE: &str = r"(?i)\b(?:not|never|no longer|can't be|cannot be)\s+(?:really\s+|very\s+|that\s+)?(happy|great|good|okay|fine|well|calm|hopeful)\b";

pub struct LexiconClassifier {
    positive: Regex,
    negative: Regex,
    negated_positive: Regex,
}

impl LexiconClassifier {
    pub fn new() -> Result<Self> {
        let compile = |pat: &str| {
            Regex::new(pat)
                .map_err(|e| MoodError::Configuration(format!("bad lexicon pattern: {e}")))
        };
        Ok(Self {
            positive: compile(POSITIVE_WORDS)?,
            negative: compile(NEGATIVE_WORDS)?,
            negated_positive: compile(NEGATED_POSITIVE)?,
        })
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let negated = self.negated_positive.find_iter(text).count();
        let positive = self.positive.find_iter(text).count().saturating_sub(negated);
        let negative = self.negative.find_iter(text).count() + negated;

        let total = positive + negative;
        let (label, confidence) = if total == 0 || positive == negative {
            (MoodLabel::Neutral, 0.5)
        } else if positive > negative {
            (MoodLabel::Positive, positive as f64 / total as f64)
        } else {
            (MoodLabel::Negative, negative as f64 / total as f64)
        };

        Ok(Classification { label, confidence })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Classification {
        LexiconClassifier::new().unwrap().classify(text).unwrap()
    }

    #[test]
    fn clearly_positive_entry() {
        let c = classify("I'm feeling great today, really happy and grateful.");
        assert_eq!(c.label, MoodLabel::Positive);
        assert!(c.confidence > 0.9);
    }

    #[test]
    fn clearly_negative_entry() {
        let c = classify("I'm really sad and anxious, everything feels hopeless.");
        assert_eq!(c.label, MoodLabel::Negative);
        assert!(c.confidence > 0.9);
    }

    #[test]
    fn no_signal_is_neutral() {
        let c = classify("Went to the store, then watched a film.");
        assert_eq!(c.label, MoodLabel::Neutral);
        assert_eq!(c.confidence, 0.5);
    }

    #[test]
    fn negated_positive_reads_negative() {
        let c = classify("I'm not happy about how today went.");
        assert_eq!(c.label, MoodLabel::Negative);
    }

    #[test]
    fn mixed_signal_ties_to_neutral() {
        let c = classify("Work was great but the evening was awful.");
        assert_eq!(c.label, MoodLabel::Neutral);
        assert_eq!(c.confidence, 0.5);
    }

    #[test]
    fn confidence_is_in_unit_interval() {
        for text in [
            "happy happy sad",
            "sad",
            "",
            "great awful terrible wonderful",
        ] {
            let c = classify(text);
            assert!((0.0..=1.0).contains(&c.confidence), "text: {text}");
        }
    }
}
