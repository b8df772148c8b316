//! At-completion duration.
//!
//! The at-completion duration is how long an activity is known or
//! projected to take as of the update. The regime is chosen from which
//! actual dates are present, checked in this order:
//!
//! 1. actual start and actual finish → actual finish − actual start
//! 2. actual start only → early finish − actual start
//! 3. neither → early finish − early start
//!
//! An actual finish without an actual start matches no regime and yields
//! no duration.
//!
//! # Zero-actual repair
//! Some exports log a completed activity with identical actual start and
//! finish. With repair enabled the actual start is moved back to
//! `actual finish − baseline duration` before the regime is evaluated.

use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;

use crate::models::{ActivityRecord, DateField, Dated};

/// A matched update activity with its baseline and at-completion durations.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredActivity {
    /// Update-side record (actual start possibly repaired).
    pub record: ActivityRecord,
    /// Baseline early finish − early start, from the matching baseline row.
    pub baseline_duration: Option<Duration>,
    /// Duration under the record's status regime.
    pub at_completion_duration: Option<Duration>,
}

impl ScoredActivity {
    /// Wraps a record with no durations (update-only activities).
    pub fn unscored(record: ActivityRecord) -> Self {
        Self {
            record,
            baseline_duration: None,
            at_completion_duration: None,
        }
    }

    /// Sets the baseline duration.
    pub fn with_baseline_duration(mut self, duration: Duration) -> Self {
        self.baseline_duration = Some(duration);
        self
    }

    /// `baseline / at_completion`, when both are positive.
    pub fn earning_ratio(&self) -> Option<f64> {
        let baseline = self.baseline_duration?.num_milliseconds();
        let at_completion = self.at_completion_duration?.num_milliseconds();
        if baseline <= 0 || at_completion <= 0 {
            return None;
        }
        Some(baseline as f64 / at_completion as f64)
    }
}

impl Dated for ScoredActivity {
    const TABLE: &'static str = "matched_update";

    fn activity_id(&self) -> &str {
        &self.record.id
    }

    fn has_field(field: DateField) -> bool {
        ActivityRecord::has_field(field)
    }

    fn date(&self, field: DateField) -> Option<NaiveDateTime> {
        self.record.date(field)
    }
}

/// Attaches each matched baseline row's duration to its update row.
///
/// Left join on identifier: update rows without a baseline row, or whose
/// baseline early dates are incomplete, get no baseline duration.
pub fn attach_baseline_durations(
    matched_update: &[ActivityRecord],
    matched_baseline: &[ActivityRecord],
) -> Vec<ScoredActivity> {
    let durations: HashMap<&str, Option<Duration>> = matched_baseline
        .iter()
        .map(|b| (b.id.as_str(), b.early_duration()))
        .collect();

    matched_update
        .iter()
        .map(|u| ScoredActivity {
            record: u.clone(),
            baseline_duration: durations.get(u.id.as_str()).copied().flatten(),
            at_completion_duration: None,
        })
        .collect()
}

/// Applies the optional zero-actual repair, then computes each row's
/// at-completion duration.
pub fn at_completion(rows: &[ScoredActivity], fix_zero_actual: bool) -> Vec<ScoredActivity> {
    rows.iter()
        .map(|row| {
            let mut scored = if fix_zero_actual {
                repair_zero_actual(row)
            } else {
                row.clone()
            };
            scored.at_completion_duration = at_completion_duration(&scored.record);
            scored
        })
        .collect()
}

/// Moves a zero-length actual interval's start back by the baseline duration.
///
/// Rows without equal actual start/finish, or without a baseline
/// duration, are returned unchanged.
pub fn repair_zero_actual(row: &ScoredActivity) -> ScoredActivity {
    let mut repaired = row.clone();
    if let (Some(start), Some(finish), Some(baseline)) = (
        row.record.actual_start,
        row.record.actual_finish,
        row.baseline_duration,
    ) {
        if start == finish {
            log::debug!(
                "{}: zero actual duration, moving actual start back {} days",
                row.record.id,
                baseline.num_days()
            );
            repaired.record.actual_start = Some(finish - baseline);
        }
    }
    repaired
}

/// Duration of `record` under its status regime.
pub fn at_completion_duration(record: &ActivityRecord) -> Option<Duration> {
    match (record.actual_start, record.actual_finish) {
        (Some(start), Some(finish)) => Some(finish - start),
        (Some(start), None) => Some(record.early_finish? - start),
        (None, None) => record.early_duration(),
        (None, Some(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, ActivityStatus};

    fn dt(s: &str) -> NaiveDateTime {
        parse_date(s).unwrap().unwrap()
    }

    #[test]
    fn test_complete_regime() {
        let rec = ActivityRecord::new("T1", ActivityStatus::Complete)
            .with_early(dt("2024-01-01"), dt("2024-01-05"))
            .with_actual_start(dt("2024-01-20"))
            .with_actual_finish(dt("2024-03-10"));
        assert_eq!(at_completion_duration(&rec), Some(Duration::days(50)));
    }

    #[test]
    fn test_in_progress_regime() {
        let rec = ActivityRecord::new("T3", ActivityStatus::InProgress)
            .with_early(dt("2024-02-20"), dt("2024-03-01"))
            .with_actual_start(dt("2024-02-01"));
        assert_eq!(at_completion_duration(&rec), Some(Duration::days(29)));

        let no_early = ActivityRecord::new("T3", ActivityStatus::InProgress)
            .with_actual_start(dt("2024-02-01"));
        assert_eq!(at_completion_duration(&no_early), None);
    }

    #[test]
    fn test_not_started_regime() {
        let rec = ActivityRecord::new("T4", ActivityStatus::NotStarted)
            .with_early(dt("2024-04-01"), dt("2024-04-11"));
        assert_eq!(at_completion_duration(&rec), Some(Duration::days(10)));
    }

    #[test]
    fn test_finish_without_start_has_no_regime() {
        let rec = ActivityRecord::new("T5", ActivityStatus::Complete)
            .with_early(dt("2024-04-01"), dt("2024-04-11"))
            .with_actual_finish(dt("2024-04-11"));
        assert_eq!(at_completion_duration(&rec), None);
    }

    #[test]
    fn test_zero_actual_repair() {
        let rec = ActivityRecord::new("T6", ActivityStatus::Complete)
            .with_actual_start(dt("2024-02-10"))
            .with_actual_finish(dt("2024-02-10"));
        let row = ScoredActivity::unscored(rec).with_baseline_duration(Duration::days(10));

        let fixed = at_completion(std::slice::from_ref(&row), true);
        assert_eq!(fixed[0].record.actual_start, Some(dt("2024-01-31")));
        assert_eq!(fixed[0].at_completion_duration, Some(Duration::days(10)));

        let unfixed = at_completion(std::slice::from_ref(&row), false);
        assert_eq!(unfixed[0].record.actual_start, Some(dt("2024-02-10")));
        assert_eq!(unfixed[0].at_completion_duration, Some(Duration::zero()));
        assert_eq!(unfixed[0].earning_ratio(), None);
    }

    #[test]
    fn test_repair_needs_baseline_duration() {
        let rec = ActivityRecord::new("T7", ActivityStatus::Complete)
            .with_actual_start(dt("2024-02-10"))
            .with_actual_finish(dt("2024-02-10"));
        let row = ScoredActivity::unscored(rec);
        assert_eq!(repair_zero_actual(&row), row);
    }

    #[test]
    fn test_attach_baseline_durations() {
        let baseline = vec![
            ActivityRecord::new("A", ActivityStatus::NotStarted)
                .with_early(dt("2024-01-15"), dt("2024-03-15")),
            ActivityRecord::new("B", ActivityStatus::NotStarted),
        ];
        let update = vec![
            ActivityRecord::new("B", ActivityStatus::NotStarted),
            ActivityRecord::new("A", ActivityStatus::InProgress),
        ];
        let scored = attach_baseline_durations(&update, &baseline);
        assert_eq!(scored[0].baseline_duration, None);
        assert_eq!(scored[1].baseline_duration, Some(Duration::days(60)));
        assert!(scored.iter().all(|s| s.at_completion_duration.is_none()));
    }

    #[test]
    fn test_earning_ratio() {
        let mut row = ScoredActivity::unscored(ActivityRecord::new("A", ActivityStatus::Complete))
            .with_baseline_duration(Duration::days(60));
        row.at_completion_duration = Some(Duration::days(50));
        assert!((row.earning_ratio().unwrap() - 1.2).abs() < 1e-12);
    }
}
