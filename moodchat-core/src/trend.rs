//! Trend aggregator: rolling-window negative-day ratios.
//!
//! Pure function of stored history and `as_of`; no side effects, safe to
//! call concurrently for different users or repeatedly for the same user.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MoodError, Result};
use crate::event::{MoodEvent, MoodLabel};
use crate::orchestrate::EventStore;
use crate::policy::TrendPolicy;
use crate::time::local_day;

/// Per-day label tallies for one user.
///
/// Multiple entries on the same calendar day collapse to one bucket for
/// window math. Absent day = no data, not a bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayBucket {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

impl DayBucket {
    fn tally(&mut self, label: MoodLabel) {
        match label {
            MoodLabel::Positive => self.positive += 1,
            MoodLabel::Neutral => self.neutral += 1,
            MoodLabel::Negative => self.negative += 1,
        }
    }

    /// Majority vote over the day's labels, ties broken toward NEGATIVE.
    pub fn is_negative(&self) -> bool {
        self.negative > 0 && self.negative >= self.positive && self.negative >= self.neutral
    }
}

/// Aggregate view of one rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub as_of: NaiveDate,
    pub window_days: u32,
    pub days_with_data: u32,
    pub negative_days: u32,
    /// negative_days / days_with_data, or 0.0 with no data.
    pub negative_ratio: f64,
}

/// Collapse events into per-day buckets keyed by local calendar day.
pub fn day_buckets(events: &[MoodEvent], tz: &str) -> Result<BTreeMap<NaiveDate, DayBucket>> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for ev in events {
        let day = local_day(ev.timestamp, tz)?;
        buckets.entry(day).or_default().tally(ev.label);
    }
    Ok(buckets)
}

/// Compute `WindowStats` over `[as_of - window_days, as_of]` inclusive
/// from events held in `events`.
///
/// Days with zero entries are excluded from both numerator and denominator:
/// no data is not negative data.
pub fn window_stats(
    events: &[MoodEvent],
    as_of: NaiveDate,
    policy: &TrendPolicy,
) -> Result<WindowStats> {
    if policy.window_days == 0 {
        return Err(MoodError::Configuration(
            "window_days must be > 0".to_string(),
        ));
    }

    let start = as_of - Duration::days(policy.window_days as i64);
    let buckets = day_buckets(events, &policy.timezone)?;

    let mut days_with_data = 0u32;
    let mut negative_days = 0u32;
    for (_day, bucket) in buckets.range(start..=as_of) {
        days_with_data += 1;
        if bucket.is_negative() {
            negative_days += 1;
        }
    }

    let negative_ratio = if days_with_data > 0 {
        negative_days as f64 / days_with_data as f64
    } else {
        0.0
    };

    Ok(WindowStats {
        as_of,
        window_days: policy.window_days,
        days_with_data,
        negative_days,
        negative_ratio,
    })
}

/// Pull the window's events from the store and aggregate them.
///
/// The UTC query range is padded by a day on each side so that timezone
/// offsets cannot drop edge events; the local-day filter inside
/// `window_stats` trims the excess.
pub fn compute_window<S: EventStore>(
    store: &S,
    user_id: &str,
    as_of: NaiveDate,
    policy: &TrendPolicy,
) -> Result<WindowStats> {
    if policy.window_days == 0 {
        return Err(MoodError::Configuration(
            "window_days must be > 0".to_string(),
        ));
    }

    let start = as_of - Duration::days(policy.window_days as i64 + 1);
    let end = as_of + Duration::days(2);
    let start_utc = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
    let end_utc = Utc.from_utc_datetime(&end.and_time(NaiveTime::MIN));

    let events = store.query_range(user_id, start_utc, end_utc)?;
    window_stats(&events, as_of, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ev(user: &str, y: i32, m: u32, d: u32, label: MoodLabel) -> MoodEvent {
        MoodEvent::new(
            user,
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            "entry",
            label,
            0.9,
        )
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_negative_entry_makes_day_negative() {
        let events = vec![ev("u1", 2026, 3, 2, MoodLabel::Negative)];
        let buckets = day_buckets(&events, "UTC").unwrap();
        assert!(buckets[&day(2026, 3, 2)].is_negative());
    }

    #[test]
    fn tie_breaks_toward_negative() {
        let events = vec![
            ev("u1", 2026, 3, 2, MoodLabel::Negative),
            ev("u1", 2026, 3, 2, MoodLabel::Positive),
        ];
        let buckets = day_buckets(&events, "UTC").unwrap();
        assert!(buckets[&day(2026, 3, 2)].is_negative());
    }

    #[test]
    fn neutral_majority_is_not_negative() {
        let events = vec![
            ev("u1", 2026, 3, 2, MoodLabel::Negative),
            ev("u1", 2026, 3, 2, MoodLabel::Neutral),
            ev("u1", 2026, 3, 2, MoodLabel::Neutral),
        ];
        let buckets = day_buckets(&events, "UTC").unwrap();
        assert!(!buckets[&day(2026, 3, 2)].is_negative());
    }

    #[test]
    fn sparse_days_are_excluded_from_denominator() {
        // 10 data-days in a 14-day window, 8 of them negative.
        let mut events = Vec::new();
        for d in 1..=8 {
            events.push(ev("u1", 2026, 3, d, MoodLabel::Negative));
        }
        events.push(ev("u1", 2026, 3, 9, MoodLabel::Positive));
        events.push(ev("u1", 2026, 3, 10, MoodLabel::Positive));

        let stats = window_stats(&events, day(2026, 3, 10), &TrendPolicy::default()).unwrap();
        assert_eq!(stats.days_with_data, 10);
        assert_eq!(stats.negative_days, 8);
        assert!((stats.negative_ratio - 0.8).abs() < 1e-9);
    }

    #[test]
    fn empty_window_has_zero_ratio() {
        let stats = window_stats(&[], day(2026, 3, 10), &TrendPolicy::default()).unwrap();
        assert_eq!(stats.days_with_data, 0);
        assert_eq!(stats.negative_ratio, 0.0);
    }

    #[test]
    fn events_outside_window_are_ignored() {
        let events = vec![
            ev("u1", 2026, 1, 1, MoodLabel::Negative),
            ev("u1", 2026, 3, 10, MoodLabel::Positive),
        ];
        let stats = window_stats(&events, day(2026, 3, 10), &TrendPolicy::default()).unwrap();
        assert_eq!(stats.days_with_data, 1);
        assert_eq!(stats.negative_days, 0);
    }

    #[test]
    fn window_stats_is_idempotent() {
        let events = vec![
            ev("u1", 2026, 3, 8, MoodLabel::Negative),
            ev("u1", 2026, 3, 9, MoodLabel::Neutral),
        ];
        let policy = TrendPolicy::default();
        let a = window_stats(&events, day(2026, 3, 10), &policy).unwrap();
        let b = window_stats(&events, day(2026, 3, 10), &policy).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ratio_stays_in_unit_interval() {
        let events = vec![
            ev("u1", 2026, 3, 7, MoodLabel::Negative),
            ev("u1", 2026, 3, 8, MoodLabel::Negative),
            ev("u1", 2026, 3, 9, MoodLabel::Positive),
        ];
        let stats = window_stats(&events, day(2026, 3, 10), &TrendPolicy::default()).unwrap();
        assert!((0.0..=1.0).contains(&stats.negative_ratio));
    }

    #[test]
    fn chicago_evening_entry_lands_on_local_day() {
        // 04:30 UTC Mar 3 = 22:30 CST Mar 2.
        let late = MoodEvent::new(
            "u1",
            Utc.with_ymd_and_hms(2026, 3, 3, 4, 30, 0).unwrap(),
            "late entry",
            MoodLabel::Negative,
            0.9,
        );
        let policy = TrendPolicy {
            timezone: "America/Chicago".to_string(),
            ..TrendPolicy::default()
        };
        let buckets = day_buckets(std::slice::from_ref(&late), &policy.timezone).unwrap();
        assert!(buckets.contains_key(&day(2026, 3, 2)));
    }
}
