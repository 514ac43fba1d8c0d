//! Orchestrator: glue binding classifier, store, trend, alert and
//! suggestion selection into one submission pipeline.
//!
//! Collaborators are traits; real adapters (HTTP classifier, CSV store)
//! live in sibling crates. The orchestrator holds no cross-call state of
//! its own beyond a per-user lock map: alert records are keyed by user
//! and serialized per key, never shared mutable globals.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};

use crate::alert::{AlertDecision, AlertState};
use crate::error::{MoodError, Result};
use crate::event::{MoodEvent, MoodLabel};
use crate::policy::TrendPolicy;
use crate::stats::HealthReport;
use crate::suggest::{Suggestion, SuggestionPools};
use crate::time::local_day;
use crate::trend::{self, WindowStats};

/// Classifier output for one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: MoodLabel,
    pub confidence: f64,
}

/// Text-classification capability. Must return one of the three labels
/// or fail explicitly; the contract forbids silently inventing labels.
pub trait Classifier {
    fn classify(&self, text: &str) -> Result<Classification>;
}

/// Append-only, per-user, time-ordered event log.
pub trait EventStore {
    fn append(&self, event: &MoodEvent) -> Result<()>;
    /// Events for `user_id` with `start <= timestamp < end`, ascending.
    fn query_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEvent>>;
    /// Full history for `user_id`, ascending.
    fn all_for_user(&self, user_id: &str) -> Result<Vec<MoodEvent>>;
}

/// Per-user alert record persistence. Only the orchestrator writes
/// through this, and only while holding the user's lock.
pub trait AlertStore {
    /// Load the record, or the initial NORMAL state for a new user.
    fn load(&self, user_id: &str) -> Result<AlertState>;
    fn save(&self, user_id: &str, state: &AlertState) -> Result<()>;
}

/// Characters of entry text handed to the classifier.
const CLASSIFY_INPUT_LIMIT: usize = 512;

/// Unified response for one submitted entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryResponse {
    pub event: MoodEvent,
    pub stats: WindowStats,
    /// True only when this submission crossed the alert threshold and was
    /// not de-duplicated; the caller owns delivery.
    pub alert_fired: bool,
    pub suggestion: Suggestion,
}

pub struct Orchestrator<C: Classifier, S: EventStore, A: AlertStore> {
    classifier: C,
    events: S,
    alerts: A,
    policy: TrendPolicy,
    pools: SuggestionPools,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<C: Classifier, S: EventStore, A: AlertStore> Orchestrator<C, S, A> {
    /// Policy is validated here; bad thresholds fail fast at startup.
    pub fn new(
        classifier: C,
        events: S,
        alerts: A,
        policy: TrendPolicy,
        pools: SuggestionPools,
    ) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            classifier,
            events,
            alerts,
            policy,
            pools,
            user_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn policy(&self) -> &TrendPolicy {
        &self.policy
    }

    /// Classify, append, recompute the window, evaluate the alert state
    /// and pick a suggestion.
    ///
    /// Classification failure aborts before anything is appended; a store
    /// failure aborts the rest of the chain.
    pub fn submit_entry(
        &self,
        user_id: &str,
        text: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<EntryResponse> {
        if text.trim().is_empty() {
            return Err(MoodError::Classification(
                "entry text is empty".to_string(),
            ));
        }

        let excerpt: String = text.chars().take(CLASSIFY_INPUT_LIMIT).collect();
        let classification = self.classifier.classify(&excerpt)?;

        let ts = timestamp.unwrap_or_else(Utc::now);
        let event = MoodEvent::new(
            user_id,
            ts,
            text,
            classification.label,
            classification.confidence,
        );
        event.validate().map_err(MoodError::Classification)?;

        let lock = self.user_lock(user_id);
        let _guard = hold(&lock);

        self.events.append(&event)?;

        let as_of = local_day(ts, &self.policy.timezone)?;
        let stats = trend::compute_window(&self.events, user_id, as_of, &self.policy)?;

        let mut state = self.alerts.load(user_id)?;
        let decision = state.evaluate(&stats, &self.policy);
        self.alerts.save(user_id, &state)?;

        let rotation = self.events.all_for_user(user_id)?.len();
        let suggestion = self
            .pools
            .select(classification.label, decision.status, rotation);

        Ok(EntryResponse {
            event,
            stats,
            alert_fired: decision.fired,
            suggestion,
        })
    }

    /// Scheduled-tick evaluation for a day with no new entry. Idempotent
    /// for a given `as_of`.
    pub fn evaluate_day(&self, user_id: &str, as_of: NaiveDate) -> Result<(WindowStats, AlertDecision)> {
        let lock = self.user_lock(user_id);
        let _guard = hold(&lock);

        let stats = trend::compute_window(&self.events, user_id, as_of, &self.policy)?;
        let mut state = self.alerts.load(user_id)?;
        let decision = state.evaluate(&stats, &self.policy);
        self.alerts.save(user_id, &state)?;
        Ok((stats, decision))
    }

    /// Explicit user/clinician acknowledgment.
    pub fn reset_alert(&self, user_id: &str) -> Result<AlertState> {
        let lock = self.user_lock(user_id);
        let _guard = hold(&lock);

        let mut state = self.alerts.load(user_id)?;
        state.reset();
        self.alerts.save(user_id, &state)?;
        Ok(state)
    }

    pub fn history(&self, user_id: &str) -> Result<Vec<MoodEvent>> {
        self.events.all_for_user(user_id)
    }

    pub fn current_alert(&self, user_id: &str) -> Result<AlertState> {
        self.alerts.load(user_id)
    }

    /// Full statistics + window + alert snapshot as of `now`.
    pub fn health_report(&self, user_id: &str, now: DateTime<Utc>) -> Result<HealthReport> {
        let history = self.events.all_for_user(user_id)?;
        let as_of = local_day(now, &self.policy.timezone)?;
        let window = trend::compute_window(&self.events, user_id, as_of, &self.policy)?;
        let alert = self.alerts.load(user_id)?;
        Ok(HealthReport::assemble(now, &history, window, alert))
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut map = self
            .user_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

fn hold(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
