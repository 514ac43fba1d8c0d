//! Lifetime mood statistics and the exportable health report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::AlertState;
use crate::event::{MoodEvent, MoodLabel};
use crate::trend::WindowStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
    /// Fewer than two entries on record.
    Unknown,
}

/// Aggregate counters over a user's full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    pub total_entries: usize,
    pub positive_entries: usize,
    pub neutral_entries: usize,
    pub negative_entries: usize,
    pub positive_percentage: f64,
    pub avg_confidence: f64,
    pub trend: TrendDirection,
}

/// Entries compared against the earlier baseline when deriving the trend
/// direction.
const TREND_RECENT_ENTRIES: usize = 7;

impl MoodStats {
    /// Tally a full (time-ordered) history.
    pub fn from_history(events: &[MoodEvent]) -> Self {
        let total = events.len();
        let count = |label: MoodLabel| events.iter().filter(|e| e.label == label).count();
        let positive = count(MoodLabel::Positive);
        let neutral = count(MoodLabel::Neutral);
        let negative = count(MoodLabel::Negative);

        let positive_percentage = if total > 0 {
            positive as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let avg_confidence = if total > 0 {
            events.iter().map(|e| e.confidence).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Self {
            total_entries: total,
            positive_entries: positive,
            neutral_entries: neutral,
            negative_entries: negative,
            positive_percentage,
            avg_confidence,
            trend: trend_direction(events),
        }
    }

    /// Plain-language recommendation from the counters.
    pub fn recommendation(&self) -> String {
        if self.total_entries < 7 {
            return "Keep logging your mood daily to get personalized insights.".to_string();
        }
        if self.positive_percentage >= 70.0 {
            "Great work! Maintain your current positive momentum.".to_string()
        } else if self.positive_percentage <= 30.0 {
            "Consider reaching out to a mental health professional. Your wellbeing matters."
                .to_string()
        } else {
            "Your mood is balanced. Keep tracking and stay mindful.".to_string()
        }
    }
}

/// Compare the positive share of the last few entries against the earlier
/// baseline.
fn trend_direction(events: &[MoodEvent]) -> TrendDirection {
    if events.len() < 2 {
        return TrendDirection::Unknown;
    }

    let split = events.len().saturating_sub(TREND_RECENT_ENTRIES);
    let (past, recent) = events.split_at(split);

    let share = |slice: &[MoodEvent]| {
        if slice.is_empty() {
            return 0.0;
        }
        slice
            .iter()
            .filter(|e| e.label == MoodLabel::Positive)
            .count() as f64
            / slice.len() as f64
    };

    let recent_share = share(recent);
    let past_share = share(past);

    if recent_share > past_share {
        TrendDirection::Improving
    } else if recent_share < past_share {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Exportable snapshot combining everything a caller needs to render a
/// status page or hand to a clinician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub generated_at: DateTime<Utc>,
    pub statistics: MoodStats,
    pub window: WindowStats,
    pub alert: AlertState,
    pub recommendation: String,
}

impl HealthReport {
    pub fn assemble(
        generated_at: DateTime<Utc>,
        history: &[MoodEvent],
        window: WindowStats,
        alert: AlertState,
    ) -> Self {
        let statistics = MoodStats::from_history(history);
        let recommendation = statistics.recommendation();
        Self {
            generated_at,
            statistics,
            window,
            alert,
            recommendation,
        }
    }
}
