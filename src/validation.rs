//! Snapshot data-quality checks.
//!
//! Checks the activities of a snapshot before a run. Detects:
//! - Duplicate activity IDs
//! - Finish dates before their start dates
//! - Status codes that disagree with the actual dates
//! - Actual dates after the data date
//!
//! The engine does not require a snapshot to pass; it skips the rows it
//! cannot phase and reports them as diagnostics. Validation is for
//! callers that want to reject bad exports up front.

use chrono::NaiveDateTime;
use std::collections::HashSet;

use crate::models::{ActivityRecord, ActivityStatus, Snapshot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending activity.
    pub activity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two activities share the same ID.
    DuplicateId,
    /// A finish date precedes its start date.
    InvertedInterval,
    /// Status disagrees with the presence of actual dates.
    StatusMismatch,
    /// An actual date is later than the data date.
    ActualAfterDataDate,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, activity_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            activity_id: activity_id.to_string(),
            message: message.into(),
        }
    }
}

/// Validates every activity of a snapshot.
///
/// Checks:
/// 1. No duplicate activity IDs
/// 2. Early, late, target and actual finishes are not before their starts
/// 3. Complete activities carry both actuals; in-progress ones an actual
///    start and no actual finish; not-started ones no actuals
/// 4. No actual date is after the data date
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for act in &snapshot.activities {
        if !ids.insert(act.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &act.id,
                format!("Duplicate activity ID: {}", act.id),
            ));
        }
        check_intervals(act, &mut errors);
        check_status(act, &mut errors);
        check_data_date(act, snapshot.data_date, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        log::debug!("snapshot validation found {} issues", errors.len());
        Err(errors)
    }
}

fn check_intervals(act: &ActivityRecord, errors: &mut Vec<ValidationError>) {
    let pairs = [
        ("early", act.early_start, act.early_finish),
        ("late", act.late_start, act.late_finish),
        ("target", act.target_start, act.target_finish),
        ("actual", act.actual_start, act.actual_finish),
    ];
    for (label, start, finish) in pairs {
        if let (Some(s), Some(f)) = (start, finish) {
            if f < s {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedInterval,
                    &act.id,
                    format!("Activity '{}' {label} finish {f} precedes start {s}", act.id),
                ));
            }
        }
    }
}

fn check_status(act: &ActivityRecord, errors: &mut Vec<ValidationError>) {
    let has_start = act.actual_start.is_some();
    let has_finish = act.actual_finish.is_some();
    let problem = match act.status {
        ActivityStatus::Complete if !(has_start && has_finish) => {
            Some("is complete but lacks an actual start or finish")
        }
        ActivityStatus::InProgress if !has_start => Some("is in progress without an actual start"),
        ActivityStatus::InProgress if has_finish => Some("is in progress with an actual finish"),
        ActivityStatus::NotStarted if has_start || has_finish => {
            Some("is not started but has actual dates")
        }
        _ => None,
    };
    if let Some(problem) = problem {
        errors.push(ValidationError::new(
            ValidationErrorKind::StatusMismatch,
            &act.id,
            format!("Activity '{}' {problem}", act.id),
        ));
    }
}

fn check_data_date(act: &ActivityRecord, data_date: NaiveDateTime, errors: &mut Vec<ValidationError>) {
    for (label, date) in [("start", act.actual_start), ("finish", act.actual_finish)] {
        if let Some(d) = date.filter(|d| *d > data_date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ActualAfterDataDate,
                &act.id,
                format!("Activity '{}' actual {label} {d} is after data date {data_date}", act.id),
            ));
        }
    }
}
