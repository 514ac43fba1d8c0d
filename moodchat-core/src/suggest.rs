//! Suggestion selector: deterministic mapping from mood + alert status to
//! a self-help suggestion. Content is data, not logic; pools are
//! config-overridable.

use serde::{Deserialize, Serialize};

use crate::alert::AlertStatus;
use crate::event::MoodLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionCategory {
    Affirmation,
    CheckIn,
    Coping,
    CrisisResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub text: String,
}

/// Content pools keyed by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionPools {
    pub affirmations: Vec<String>,
    pub check_ins: Vec<String>,
    pub coping: Vec<String>,
    /// Crisis-resource text returned for any ALERTED user (safety override).
    pub crisis: String,
}

impl Default for SuggestionPools {
    fn default() -> Self {
        Self {
            affirmations: vec![
                "Amazing! Keep channeling this positive energy!".to_string(),
                "Your optimism is contagious. Share it with others!".to_string(),
                "Keep doing what you're doing. You're thriving!".to_string(),
            ],
            check_ins: vec![
                "Keep journaling daily for better insights!".to_string(),
                "How can you make today a bit better?".to_string(),
                "Your feelings matter. Keep tracking them.".to_string(),
            ],
            coping: vec![
                "It's okay to feel down. Consider talking to someone.".to_string(),
                "Take a 15-minute walk or practice deep breathing.".to_string(),
                "Reach out to a friend or therapist. You're not alone.".to_string(),
                "Try journaling or meditation to process these feelings.".to_string(),
            ],
            crisis: "Your recent entries suggest a difficult stretch. Please consider \
                     reaching out to a mental health professional, or call or text 988 \
                     (Suicide & Crisis Lifeline)."
                .to_string(),
        }
    }
}

impl SuggestionPools {
    /// Pick a suggestion for the current label and alert status.
    ///
    /// ALERTED always wins regardless of `label`. Otherwise `rotation`
    /// round-robins within the label's pool so repeat entries don't see
    /// the same line every time; callers typically pass the user's entry
    /// count. Pure lookup, no side effects.
    pub fn select(
        &self,
        label: MoodLabel,
        status: AlertStatus,
        rotation: usize,
    ) -> Suggestion {
        if status == AlertStatus::Alerted {
            return Suggestion {
                category: SuggestionCategory::CrisisResource,
                text: self.crisis.clone(),
            };
        }

        let (category, pool) = match label {
            MoodLabel::Positive => (SuggestionCategory::Affirmation, &self.affirmations),
            MoodLabel::Neutral => (SuggestionCategory::CheckIn, &self.check_ins),
            MoodLabel::Negative => (SuggestionCategory::Coping, &self.coping),
        };

        let text = if pool.is_empty() {
            String::new()
        } else {
            pool[rotation % pool.len()].clone()
        };

        Suggestion { category, text }
    }
}
