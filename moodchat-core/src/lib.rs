//! moodchat-core: trend-evaluation and alerting engine for mood journaling.
//!
//! The core is pure domain logic: classified entries flow into a per-user
//! timeline, a rolling window turns the timeline into negative-day ratios,
//! and a per-user state machine decides whether a wellbeing alert fires and
//! which suggestion comes back. Classifier and storage are collaborator
//! traits implemented in sibling crates.

pub mod alert;
pub mod error;
pub mod event;
pub mod orchestrate;
pub mod policy;
pub mod stats;
pub mod suggest;
pub mod time;
pub mod trend;

pub use alert::{AlertDecision, AlertState, AlertStatus};
pub use error::{MoodError, Result};
pub use event::{MoodEvent, MoodLabel, MAX_STORED_TEXT};
pub use orchestrate::{
    AlertStore, Classification, Classifier, EntryResponse, EventStore, Orchestrator,
};
pub use policy::TrendPolicy;
pub use stats::{HealthReport, MoodStats, TrendDirection};
pub use suggest::{Suggestion, SuggestionCategory, SuggestionPools};
pub use trend::{compute_window, day_buckets, window_stats, DayBucket, WindowStats};
