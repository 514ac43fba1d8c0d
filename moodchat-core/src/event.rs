//! Mood event wire types.
//!
//! Design goals:
//! - serde-ready for CSV/JSON persistence and transport
//! - deterministic round-trip behavior
//! - immutable once created (the event log is an audit trail)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentiment label attached to a classified entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoodLabel {
    Positive,
    Neutral,
    Negative,
}

impl MoodLabel {
    /// Parse the wire form ("POSITIVE"/"NEUTRAL"/"NEGATIVE").
    ///
    /// Classifiers must return one of the three labels or fail explicitly,
    /// so anything else is rejected rather than coerced.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Some(MoodLabel::Positive),
            "NEUTRAL" => Some(MoodLabel::Neutral),
            "NEGATIVE" => Some(MoodLabel::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Positive => "POSITIVE",
            MoodLabel::Neutral => "NEUTRAL",
            MoodLabel::Negative => "NEGATIVE",
        }
    }
}

/// Maximum raw text stored per entry; longer input is truncated.
pub const MAX_STORED_TEXT: usize = 200;

/// One classified journal entry. Append-only; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub raw_text: String,
    pub label: MoodLabel,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
}

impl MoodEvent {
    pub fn new(
        user_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        raw_text: &str,
        label: MoodLabel,
        confidence: f64,
    ) -> Self {
        let truncated: String = raw_text.chars().take(MAX_STORED_TEXT).collect();
        Self {
            user_id: user_id.into(),
            timestamp,
            raw_text: truncated,
            label,
            confidence,
        }
    }

    /// Minimal invariants for safe downstream processing.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("user_id must be non-empty".to_string());
        }
        if self.raw_text.trim().is_empty() {
            return Err("raw_text must be non-empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence out of range: {}", self.confidence));
        }
        Ok(())
    }
}
