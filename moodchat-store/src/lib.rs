//! moodchat-store: persistence for mood events and alert records.
//!
//! File-backed implementations of the core store traits (append-only CSV
//! event log, per-user JSON alert records) plus in-memory equivalents for
//! tests and ephemeral runs.

pub mod alert_record;
pub mod csv_log;
pub mod mem;

pub use alert_record::JsonAlertStore;
pub use csv_log::CsvEventStore;
pub use mem::{MemoryAlertStore, MemoryEventStore};

use moodchat_core::MoodError;

/// Events and alert records are stored in files derived from the user id,
/// so the id is restricted to a filesystem-safe alphabet.
pub(crate) fn user_file_stem(user_id: &str) -> Result<&str, MoodError> {
    if user_id.is_empty()
        || !user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MoodError::Store(format!(
            "user_id not filesystem-safe: {user_id:?}"
        )));
    }
    Ok(user_id)
}
