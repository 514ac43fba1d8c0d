//! Trend/alert policy constants, overridable via configuration.

use serde::{Deserialize, Serialize};

use crate::error::MoodError;

/// Rolling-window and alert thresholds.
///
/// Defaults preserve the historical "2+ weeks, 70% negative" rule, with
/// the sparse-data and repeat-alert edge cases made explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPolicy {
    /// Trailing window length in days.
    pub window_days: u32,
    /// Negative-day ratio at or above which an alert fires.
    pub alert_ratio_threshold: f64,
    /// Lower bound of the WATCH band (soft signal, no alert).
    pub watch_ratio_threshold: f64,
    /// Minimum data-days in the window before any alert can fire.
    pub min_days_with_data: u32,
    /// Days after a fired alert during which a repeat is suppressed.
    pub cooldown_days: u32,
    /// IANA timezone used to assign events to calendar days.
    pub timezone: String,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            window_days: 14,
            alert_ratio_threshold: 0.70,
            watch_ratio_threshold: 0.40,
            min_days_with_data: 7,
            cooldown_days: 7,
            timezone: "UTC".to_string(),
        }
    }
}

impl TrendPolicy {
    /// Fail fast on nonsensical thresholds. Call at startup.
    pub fn validate(&self) -> Result<(), MoodError> {
        if self.window_days == 0 {
            return Err(MoodError::Configuration(
                "window_days must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.alert_ratio_threshold) {
            return Err(MoodError::Configuration(format!(
                "alert_ratio_threshold out of [0,1]: {}",
                self.alert_ratio_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.watch_ratio_threshold) {
            return Err(MoodError::Configuration(format!(
                "watch_ratio_threshold out of [0,1]: {}",
                self.watch_ratio_threshold
            )));
        }
        if self.watch_ratio_threshold > self.alert_ratio_threshold {
            return Err(MoodError::Configuration(
                "watch_ratio_threshold must not exceed alert_ratio_threshold".to_string(),
            ));
        }
        if self.min_days_with_data == 0 {
            return Err(MoodError::Configuration(
                "min_days_with_data must be > 0".to_string(),
            ));
        }
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(MoodError::Configuration(format!(
                "invalid timezone: {}",
                self.timezone
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        TrendPolicy::default().validate().unwrap();
    }

    #[test]
    fn zero_window_is_rejected() {
        let p = TrendPolicy {
            window_days: 0,
            ..TrendPolicy::default()
        };
        assert!(matches!(p.validate(), Err(MoodError::Configuration(_))));
    }

    #[test]
    fn inverted_bands_are_rejected() {
        let p = TrendPolicy {
            watch_ratio_threshold: 0.9,
            ..TrendPolicy::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn bad_timezone_is_rejected() {
        let p = TrendPolicy {
            timezone: "Mars/Olympus".to_string(),
            ..TrendPolicy::default()
        };
        assert!(p.validate().is_err());
    }
}
