//! Per-user alert-state records as small JSON files.

use std::path::PathBuf;

use moodchat_core::{AlertState, AlertStore, MoodError, Result};

use crate::user_file_stem;

#[derive(Debug, Clone)]
pub struct JsonAlertStore {
    dir: PathBuf,
}

impl JsonAlertStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| MoodError::Store(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn user_path(&self, user_id: &str) -> Result<PathBuf> {
        let stem = user_file_stem(user_id)?;
        Ok(self.dir.join(format!("{stem}.alert.json")))
    }
}

impl AlertStore for JsonAlertStore {
    fn load(&self, user_id: &str) -> Result<AlertState> {
        let path = self.user_path(user_id)?;
        if !path.exists() {
            // New user: initial NORMAL state.
            return Ok(AlertState::new());
        }
        let s = std::fs::read_to_string(&path)
            .map_err(|e| MoodError::Store(format!("read {}: {e}", path.display())))?;
        serde_json::from_str(&s)
            .map_err(|e| MoodError::Store(format!("parse {}: {e}", path.display())))
    }

    fn save(&self, user_id: &str, state: &AlertState) -> Result<()> {
        let path = self.user_path(user_id)?;
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| MoodError::Store(format!("serialize alert state: {e}")))?;
        std::fs::write(&path, json)
            .map_err(|e| MoodError::Store(format!("write {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moodchat_core::AlertStatus;

    fn temp_store(tag: &str) -> JsonAlertStore {
        let dir = std::env::temp_dir().join(format!(
            "moodchat-alert-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        JsonAlertStore::open(dir).unwrap()
    }

    #[test]
    fn missing_record_is_initial_state() {
        let store = temp_store("fresh");
        let state = store.load("newcomer").unwrap();
        assert_eq!(state.status, AlertStatus::Normal);
        assert_eq!(state.last_alert_at, None);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let store = temp_store("roundtrip");
        let state = AlertState {
            status: AlertStatus::Alerted,
            last_alert_at: NaiveDate::from_ymd_opt(2026, 3, 10),
            last_evaluated_window_end: NaiveDate::from_ymd_opt(2026, 3, 10),
        };
        store.save("u1", &state).unwrap();
        assert_eq!(store.load("u1").unwrap(), state);
    }
}
