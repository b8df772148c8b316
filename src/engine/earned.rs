//! Earned-duration orchestrator.
//!
//! # Algorithm
//!
//! 1. (optional) Normalize the update's actualized dates.
//! 2. Match baseline and update by identifier.
//! 3. Attach each matched baseline row's duration to its update row.
//! 4. Repair zero actual durations, then compute at-completion durations.
//! 5. Polarize matched update rows into plan and actual views.
//! 6. Time-phase baseline early/late, update actual, update plan
//!    early/late, and, when present, removed and added activities.
//! 7. Prorate the matched actual matrix by `baseline / at-completion`.
//!
//! Earning credits progress at the rate the work was planned to take: an
//! activity that took 50 days against a 60-day baseline earns 1.2 days
//! per actual day, so its earned row sums to the baseline duration once
//! complete.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    at_completion, attach_baseline_durations, match_activities, normalize, polarize, ActualRow,
    MatchResult, ScoredActivity,
};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{
    DateField, DiagnosticReason, DiagnosticReport, MatrixKind, Snapshot, TimePhasedMatrix,
};
use crate::phasing::phase;
use crate::source::{snapshot_from_xer, XerDocument};

/// Baseline and update snapshots for one run.
#[derive(Debug, Clone)]
pub struct EarnedDurationRequest {
    pub baseline: Snapshot,
    pub update: Snapshot,
}

impl EarnedDurationRequest {
    pub fn new(baseline: Snapshot, update: Snapshot) -> Self {
        Self { baseline, update }
    }
}

/// Everything one run produces.
///
/// `removed` is `None` when no baseline activity was removed; `added_plan`
/// and `added_actual` are `None` when no activity was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedDurationReport {
    pub baseline_early: TimePhasedMatrix,
    pub baseline_late: TimePhasedMatrix,
    pub update_actual: TimePhasedMatrix,
    pub update_plan_early: TimePhasedMatrix,
    pub update_plan_late: TimePhasedMatrix,
    pub removed: Option<TimePhasedMatrix>,
    pub added_plan: Option<TimePhasedMatrix>,
    pub added_actual: Option<TimePhasedMatrix>,
    /// Matched actual progress rescaled to baseline duration.
    pub earned: TimePhasedMatrix,
    /// Data date of the update snapshot.
    pub data_date: NaiveDateTime,
    /// Rows skipped along the way.
    pub diagnostics: DiagnosticReport,
}

impl EarnedDurationReport {
    /// All present matrices, in report order.
    pub fn matrices(&self) -> Vec<&TimePhasedMatrix> {
        let mut all = vec![
            &self.baseline_early,
            &self.baseline_late,
            &self.update_actual,
            &self.update_plan_early,
            &self.update_plan_late,
        ];
        all.extend(self.removed.iter());
        all.extend(self.added_plan.iter());
        all.extend(self.added_actual.iter());
        all.push(&self.earned);
        all
    }

    /// Looks up a matrix by kind.
    pub fn matrix(&self, kind: MatrixKind) -> Option<&TimePhasedMatrix> {
        self.matrices().into_iter().find(|m| m.kind == kind)
    }
}

/// Earned-duration engine.
///
/// Stateless between runs; every call allocates its own intermediates.
///
/// # Example
///
/// ```
/// use u_earned_duration::engine::EarnedDurationEngine;
/// use u_earned_duration::models::{parse_date, ActivityRecord, ActivityStatus, Snapshot};
///
/// let d = |s: &str| parse_date(s).unwrap().unwrap();
/// let baseline = Snapshot::new(d("2024-01-01")).with_activity(
///     ActivityRecord::new("T1", ActivityStatus::NotStarted)
///         .with_early(d("2024-01-15"), d("2024-03-15")),
/// );
/// let update = Snapshot::new(d("2024-04-01")).with_activity(
///     ActivityRecord::new("T1", ActivityStatus::Complete)
///         .with_actual_start(d("2024-01-20"))
///         .with_actual_finish(d("2024-03-10")),
/// );
///
/// let report = EarnedDurationEngine::new().run(&baseline, &update).unwrap();
/// assert!((report.earned.total() - 60.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EarnedDurationEngine {
    config: EngineConfig,
}

impl EarnedDurationEngine {
    /// Creates an engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a request.
    pub fn run_request(&self, request: &EarnedDurationRequest) -> Result<EarnedDurationReport> {
        self.run(&request.baseline, &request.update)
    }

    /// Reads both XER exports with the configured column map, then runs.
    ///
    /// # Errors
    /// Any table or cell error from reading either export.
    pub fn run_xer(
        &self,
        baseline: &XerDocument,
        update: &XerDocument,
    ) -> Result<EarnedDurationReport> {
        let baseline = snapshot_from_xer(baseline, &self.config.columns)?;
        let update = snapshot_from_xer(update, &self.config.columns)?;
        self.run(&baseline, &update)
    }

    /// Computes every matrix for one baseline/update pair.
    pub fn run(&self, baseline: &Snapshot, update: &Snapshot) -> Result<EarnedDurationReport> {
        let mut diagnostics = DiagnosticReport::new();

        let normalized;
        let update_activities = if self.config.normalize_update {
            normalized = normalize(&update.activities);
            &normalized
        } else {
            &update.activities
        };

        let matching: MatchResult = match_activities(&baseline.activities, update_activities);

        let scored = at_completion(
            &attach_baseline_durations(&matching.matched_update, &matching.matched_baseline),
            self.config.fix_zero_actual_duration,
        );
        let (matched_plan, matched_actual) = polarize(&scored, update.data_date);

        let baseline_early = phase(
            &matching.matched_baseline,
            MatrixKind::BaselineEarly,
            DateField::EarlyStart,
            DateField::EarlyFinish,
            &mut diagnostics,
        )?;
        let baseline_late = phase(
            &matching.matched_baseline,
            MatrixKind::BaselineLate,
            DateField::LateStart,
            DateField::LateFinish,
            &mut diagnostics,
        )?;
        let update_actual = phase(
            &matched_actual,
            MatrixKind::UpdateActual,
            DateField::ActualStartAdjusted,
            DateField::ActualFinishAdjusted,
            &mut diagnostics,
        )?;
        let update_plan_early = phase(
            &matched_plan,
            MatrixKind::UpdatePlanEarly,
            DateField::EarlyStartAdjusted,
            DateField::EarlyFinishAdjusted,
            &mut diagnostics,
        )?;
        let update_plan_late = phase(
            &matched_plan,
            MatrixKind::UpdatePlanLate,
            DateField::LateStartAdjusted,
            DateField::LateFinishAdjusted,
            &mut diagnostics,
        )?;

        let removed = if matching.removed.is_empty() {
            log::debug!("no removed activities");
            None
        } else {
            Some(phase(
                &matching.removed,
                MatrixKind::Removed,
                DateField::EarlyStart,
                DateField::EarlyFinish,
                &mut diagnostics,
            )?)
        };

        let (added_plan, added_actual) = if matching.added.is_empty() {
            log::debug!("no added activities");
            (None, None)
        } else {
            let added: Vec<ScoredActivity> = matching
                .added
                .iter()
                .cloned()
                .map(ScoredActivity::unscored)
                .collect();
            let (plan, actual) = polarize(&added, update.data_date);
            let added_plan = phase(
                &plan,
                MatrixKind::AddedPlan,
                DateField::EarlyStartAdjusted,
                DateField::EarlyFinishAdjusted,
                &mut diagnostics,
            )?;
            let added_actual = phase(
                &actual,
                MatrixKind::AddedActual,
                DateField::ActualStartAdjusted,
                DateField::ActualFinishAdjusted,
                &mut diagnostics,
            )?;
            (Some(added_plan), Some(added_actual))
        };

        let earned = prorate_earned(&update_actual, &matched_actual, &mut diagnostics);

        log::info!(
            "earned duration: {} matched, {} added, {} removed, {} earned rows, {} diagnostics",
            matching.matched_count(),
            matching.added.len(),
            matching.removed.len(),
            earned.len(),
            diagnostics.len()
        );

        Ok(EarnedDurationReport {
            baseline_early,
            baseline_late,
            update_actual,
            update_plan_early,
            update_plan_late,
            removed,
            added_plan,
            added_actual,
            earned,
            data_date: update.data_date,
            diagnostics,
        })
    }
}

/// Rescales each actual row by `baseline / at-completion`.
///
/// Rows whose baseline or at-completion duration is zero are dropped
/// without a diagnostic. Rows where either duration is unknown or
/// negative are dropped and recorded.
pub fn prorate_earned(
    actual: &TimePhasedMatrix,
    actual_rows: &[ActualRow],
    diagnostics: &mut DiagnosticReport,
) -> TimePhasedMatrix {
    let durations: HashMap<&str, &ScoredActivity> = actual_rows
        .iter()
        .map(|r| (r.activity.record.id.as_str(), &r.activity))
        .collect();

    let mut earned = TimePhasedMatrix::new(MatrixKind::Earned);
    for row in &actual.rows {
        let Some(scored) = durations.get(row.activity_id.as_str()) else {
            continue;
        };
        let Some(baseline) = scored.baseline_duration else {
            diagnostics.record(
                &row.activity_id,
                DiagnosticReason::MissingBaselineDuration,
                MatrixKind::Earned,
            );
            continue;
        };
        let Some(at_completion) = scored.at_completion_duration else {
            diagnostics.record(
                &row.activity_id,
                DiagnosticReason::MissingAtCompletion,
                MatrixKind::Earned,
            );
            continue;
        };
        if baseline == Duration::zero() || at_completion == Duration::zero() {
            log::debug!("{}: zero duration, not earned", row.activity_id);
            continue;
        }
        if baseline < Duration::zero() || at_completion < Duration::zero() {
            diagnostics.record(
                &row.activity_id,
                DiagnosticReason::NegativeDuration,
                MatrixKind::Earned,
            );
            continue;
        }
        if let Some(ratio) = scored.earning_ratio() {
            earned.push(row.scaled(ratio));
        }
    }
    earned
}
