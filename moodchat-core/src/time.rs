//! Time utilities: timezone-aware calendar-day assignment.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::MoodError;

/// Map a UTC instant to the calendar day it falls on in an IANA tz
/// like "America/Chicago".
///
/// Day buckets are keyed by the user's local day; a 23:30 entry should
/// not count toward the following morning.
pub fn local_day(ts: DateTime<Utc>, tz: &str) -> Result<NaiveDate, MoodError> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| MoodError::Configuration(format!("invalid timezone: {tz}")))?;
    Ok(ts.with_timezone(&tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_utc_evening_is_previous_chicago_day() {
        // 04:30 UTC on Mar 2 is 22:30 CST on Mar 1.
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 4, 30, 0).unwrap();
        let day = local_day(ts, "America/Chicago").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn utc_day_is_identity() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 4, 30, 0).unwrap();
        assert_eq!(
            local_day(ts, "UTC").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn bad_timezone_errors() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 4, 30, 0).unwrap();
        assert!(local_day(ts, "Nowhere/Nothing").is_err());
    }
}
