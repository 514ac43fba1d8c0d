//! Append-only CSV event log, one file per user.
//!
//! Columns: user_id,timestamp,raw_text,label,confidence (serde order of
//! `MoodEvent`). Rows are never rewritten or deleted; the log is the
//! audit trail. Unparseable rows are skipped on read rather than failing
//! the whole query.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use moodchat_core::{EventStore, MoodError, MoodEvent, Result};

use crate::user_file_stem;

#[derive(Debug, Clone)]
pub struct CsvEventStore {
    dir: PathBuf,
}

impl CsvEventStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| MoodError::Store(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn user_path(&self, user_id: &str) -> Result<PathBuf> {
        let stem = user_file_stem(user_id)?;
        Ok(self.dir.join(format!("{stem}.csv")))
    }

    fn read_all(&self, path: &Path) -> Result<Vec<MoodEvent>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| MoodError::Store(format!("open {}: {e}", path.display())))?;

        let mut events = Vec::new();
        for row in rdr.deserialize::<MoodEvent>() {
            match row {
                Ok(ev) => events.push(ev),
                Err(_) => continue, // skip unparseable rows
            }
        }
        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }
}

impl EventStore for CsvEventStore {
    fn append(&self, event: &MoodEvent) -> Result<()> {
        let path = self.user_path(&event.user_id)?;
        let new_file = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| MoodError::Store(format!("open {}: {e}", path.display())))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(new_file)
            .from_writer(file);
        wtr.serialize(event)
            .map_err(|e| MoodError::Store(format!("append {}: {e}", path.display())))?;
        wtr.flush()
            .map_err(|e| MoodError::Store(format!("flush {}: {e}", path.display())))?;
        Ok(())
    }

    fn query_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEvent>> {
        let path = self.user_path(user_id)?;
        let mut events = self.read_all(&path)?;
        events.retain(|e| e.timestamp >= start && e.timestamp < end);
        Ok(events)
    }

    fn all_for_user(&self, user_id: &str) -> Result<Vec<MoodEvent>> {
        let path = self.user_path(user_id)?;
        self.read_all(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use moodchat_core::MoodLabel;

    fn temp_store(tag: &str) -> CsvEventStore {
        let dir = std::env::temp_dir().join(format!(
            "moodchat-csv-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        CsvEventStore::open(dir).unwrap()
    }

    fn ev(user: &str, d: u32, h: u32, label: MoodLabel) -> MoodEvent {
        MoodEvent::new(
            user,
            Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap(),
            "some entry, with a comma and \"quotes\"",
            label,
            0.91,
        )
    }

    #[test]
    fn append_then_read_back() {
        let store = temp_store("roundtrip");
        let event = ev("u1", 2, 9, MoodLabel::Positive);
        store.append(&event).unwrap();
        store.append(&ev("u1", 3, 9, MoodLabel::Negative)).unwrap();

        let all = store.all_for_user("u1").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], event);
    }

    #[test]
    fn range_query_is_half_open_and_ascending() {
        let store = temp_store("range");
        // Append out of order; reads must come back ascending.
        store.append(&ev("u1", 5, 9, MoodLabel::Neutral)).unwrap();
        store.append(&ev("u1", 3, 9, MoodLabel::Neutral)).unwrap();
        store.append(&ev("u1", 4, 9, MoodLabel::Neutral)).unwrap();

        let start = Utc.with_ymd_and_hms(2026, 3, 3, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
        let got = store.query_range("u1", start, end).unwrap();
        assert_eq!(got.len(), 2);
        assert!(got[0].timestamp < got[1].timestamp);
    }

    #[test]
    fn users_do_not_see_each_other() {
        let store = temp_store("isolation");
        store.append(&ev("u1", 2, 9, MoodLabel::Negative)).unwrap();
        store.append(&ev("u2", 2, 9, MoodLabel::Positive)).unwrap();

        assert_eq!(store.all_for_user("u1").unwrap().len(), 1);
        assert_eq!(store.all_for_user("u2").unwrap().len(), 1);
        assert_eq!(store.all_for_user("u3").unwrap().len(), 0);
    }

    #[test]
    fn unsafe_user_id_is_a_store_error() {
        let store = temp_store("unsafe");
        let err = store.all_for_user("../../etc").unwrap_err();
        assert!(matches!(err, MoodError::Store(_)));
    }
}
