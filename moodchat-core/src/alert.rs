//! Alert state machine: NORMAL → WATCH → ALERTED with cooldown
//! de-duplication.
//!
//! `AlertState` is the one piece of stateful, temporal logic in the
//! system. It is mutated here and nowhere else; persistence layers only
//! load and save it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::policy::TrendPolicy;
use crate::trend::WindowStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertStatus {
    #[default]
    Normal,
    Watch,
    Alerted,
}

/// Per-user alert record. Lives for the lifetime of the account; only
/// `reset` (user/clinician acknowledgment) clears it outside evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    pub status: AlertStatus,
    /// Day the last alert actually fired; None once recovered.
    pub last_alert_at: Option<NaiveDate>,
    /// End of the most recently evaluated window, for idempotent re-runs.
    pub last_evaluated_window_end: Option<NaiveDate>,
}

/// Outcome of one evaluation.
///
/// `fired` is true only for an ALERTED transition that was not suppressed
/// by the cooldown; the caller owns delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertDecision {
    pub status: AlertStatus,
    pub fired: bool,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one window's stats to the state machine.
    ///
    /// Transition rules, in order:
    /// 1. too few data-days: no transition (insufficient evidence)
    /// 2. ratio >= alert threshold: ALERTED; fire unless within cooldown
    /// 3. ratio in the watch band: WATCH (soft signal, never fires)
    /// 4. otherwise: NORMAL, clearing `last_alert_at`
    pub fn evaluate(&mut self, stats: &WindowStats, policy: &TrendPolicy) -> AlertDecision {
        let as_of = stats.as_of;
        let mut fired = false;

        if stats.days_with_data >= policy.min_days_with_data {
            if stats.negative_ratio >= policy.alert_ratio_threshold {
                let in_cooldown = self.status == AlertStatus::Alerted
                    && self.last_alert_at.is_some_and(|fired_on| {
                        (as_of - fired_on).num_days() < policy.cooldown_days as i64
                    });
                self.status = AlertStatus::Alerted;
                if !in_cooldown {
                    self.last_alert_at = Some(as_of);
                    fired = true;
                }
            } else if stats.negative_ratio >= policy.watch_ratio_threshold {
                self.status = AlertStatus::Watch;
            } else {
                self.status = AlertStatus::Normal;
                self.last_alert_at = None;
            }
        }

        self.last_evaluated_window_end = Some(as_of);

        AlertDecision {
            status: self.status,
            fired,
        }
    }

    /// Explicit acknowledgment: back to NORMAL regardless of ratio.
    pub fn reset(&mut self) {
        self.status = AlertStatus::Normal;
        self.last_alert_at = None;
    }
}
