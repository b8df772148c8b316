//! Per-run diagnostics channel.
//!
//! Row-level anomalies never abort a run. Each skip event is recorded with
//! the activity, the reason, and the matrix it was dropped from, and the
//! whole report is returned alongside the matrices.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DateField, MatrixKind};

/// Why a row was left out of a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticReason {
    /// The interval's start date is absent.
    MissingStart(DateField),
    /// The interval's finish date is absent.
    MissingFinish(DateField),
    /// Start equals finish; nothing to spread.
    ZeroDuration,
    /// Finish is earlier than start.
    InvertedInterval,
    /// Baseline early dates were incomplete, so no baseline duration.
    MissingBaselineDuration,
    /// At-completion duration could not be computed for the row's regime.
    MissingAtCompletion,
    /// Baseline or at-completion duration is negative.
    NegativeDuration,
}

impl fmt::Display for DiagnosticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart(field) => write!(f, "blank start date ({field})"),
            Self::MissingFinish(field) => write!(f, "blank finish date ({field})"),
            Self::ZeroDuration => f.write_str("zero duration"),
            Self::InvertedInterval => f.write_str("finish before start"),
            Self::MissingBaselineDuration => f.write_str("baseline duration unavailable"),
            Self::MissingAtCompletion => f.write_str("at-completion duration unavailable"),
            Self::NegativeDuration => f.write_str("negative duration"),
        }
    }
}

/// One skip event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Affected activity.
    pub activity_id: String,
    /// Why it was skipped.
    pub reason: DiagnosticReason,
    /// Matrix the row was dropped from.
    pub matrix: MatrixKind,
}

/// All skip events of one run, in the order they occurred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub entries: Vec<Diagnostic>,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skip event and logs it.
    pub fn record(&mut self, activity_id: &str, reason: DiagnosticReason, matrix: MatrixKind) {
        log::warn!("{matrix}: skipping activity {activity_id}: {reason}");
        self.entries.push(Diagnostic {
            activity_id: activity_id.to_string(),
            reason,
            matrix,
        });
    }

    /// Appends another report's entries.
    pub fn extend(&mut self, other: DiagnosticReport) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries recorded against one matrix.
    pub fn for_matrix(&self, matrix: MatrixKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.matrix == matrix)
    }

    /// Entries recorded against one activity.
    pub fn for_activity<'a>(&'a self, activity_id: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.activity_id == activity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_filter() {
        let mut report = DiagnosticReport::new();
        report.record(
            "A1",
            DiagnosticReason::MissingStart(DateField::EarlyStart),
            MatrixKind::BaselineEarly,
        );
        report.record("A2", DiagnosticReason::ZeroDuration, MatrixKind::UpdateActual);
        report.record("A1", DiagnosticReason::ZeroDuration, MatrixKind::UpdateActual);

        assert_eq!(report.len(), 3);
        assert_eq!(report.for_matrix(MatrixKind::UpdateActual).count(), 2);
        assert_eq!(report.for_activity("A1").count(), 2);
    }

    #[test]
    fn test_extend() {
        let mut a = DiagnosticReport::new();
        let mut b = DiagnosticReport::new();
        b.record("X", DiagnosticReason::InvertedInterval, MatrixKind::Removed);
        a.extend(b);
        assert!(!a.is_empty());
        assert_eq!(a.entries[0].activity_id, "X");
    }

    #[test]
    fn test_reason_display() {
        let reason = DiagnosticReason::MissingFinish(DateField::ActualFinishAdjusted);
        assert_eq!(reason.to_string(), "blank finish date (act_end_date_adjusted)");
    }
}
