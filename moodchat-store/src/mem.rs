//! In-memory store implementations for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use moodchat_core::{AlertState, AlertStore, EventStore, MoodEvent, Result};

#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<MoodEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventStore for MemoryEventStore {
    fn append(&self, event: &MoodEvent) -> Result<()> {
        self.events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(event.clone());
        Ok(())
    }

    fn query_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEvent>> {
        let mut out: Vec<MoodEvent> = self
            .events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .filter(|e| e.user_id == user_id && e.timestamp >= start && e.timestamp < end)
            .cloned()
            .collect();
        out.sort_by_key(|e| e.timestamp);
        Ok(out)
    }

    fn all_for_user(&self, user_id: &str) -> Result<Vec<MoodEvent>> {
        let mut out: Vec<MoodEvent> = self
            .events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by_key(|e| e.timestamp);
        Ok(out)
    }
}

#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    states: Mutex<HashMap<String, AlertState>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertStore for MemoryAlertStore {
    fn load(&self, user_id: &str) -> Result<AlertState> {
        Ok(self
            .states
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, user_id: &str, state: &AlertState) -> Result<()> {
        self.states
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(user_id.to_string(), state.clone());
        Ok(())
    }
}
