//! Update polarization.
//!
//! Splits an update activity set into an actual view (progress to date)
//! and a plan view (remaining work):
//!
//! | Status | plan view | actual view | actual interval |
//! |--------|-----------|-------------|-----------------|
//! | NotStarted | yes | no | - |
//! | InProgress | yes | yes | actual start → data date |
//! | Complete | no | yes | actual start → actual finish |

use chrono::NaiveDateTime;

use super::ScoredActivity;
use crate::models::{ActivityRecord, ActivityStatus, DateField, Dated};

/// Remaining work of a not-started or in-progress activity.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRow {
    pub activity: ScoredActivity,
    pub early_start_adjusted: Option<NaiveDateTime>,
    pub early_finish_adjusted: Option<NaiveDateTime>,
    pub late_start_adjusted: Option<NaiveDateTime>,
    pub late_finish_adjusted: Option<NaiveDateTime>,
}

/// Progress to date of an in-progress or complete activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActualRow {
    pub activity: ScoredActivity,
    /// Actual start.
    pub act_start_adjusted: Option<NaiveDateTime>,
    /// Data date while in progress; actual finish once complete.
    pub act_end_adjusted: Option<NaiveDateTime>,
}

impl Dated for PlanRow {
    const TABLE: &'static str = "update_plan";

    fn activity_id(&self) -> &str {
        &self.activity.record.id
    }

    fn has_field(field: DateField) -> bool {
        ActivityRecord::has_field(field)
            || matches!(
                field,
                DateField::EarlyStartAdjusted
                    | DateField::EarlyFinishAdjusted
                    | DateField::LateStartAdjusted
                    | DateField::LateFinishAdjusted
            )
    }

    fn date(&self, field: DateField) -> Option<NaiveDateTime> {
        match field {
            DateField::EarlyStartAdjusted => self.early_start_adjusted,
            DateField::EarlyFinishAdjusted => self.early_finish_adjusted,
            DateField::LateStartAdjusted => self.late_start_adjusted,
            DateField::LateFinishAdjusted => self.late_finish_adjusted,
            other => self.activity.record.date(other),
        }
    }
}

impl Dated for ActualRow {
    const TABLE: &'static str = "update_actual";

    fn activity_id(&self) -> &str {
        &self.activity.record.id
    }

    fn has_field(field: DateField) -> bool {
        ActivityRecord::has_field(field)
            || matches!(
                field,
                DateField::ActualStartAdjusted | DateField::ActualFinishAdjusted
            )
    }

    fn date(&self, field: DateField) -> Option<NaiveDateTime> {
        match field {
            DateField::ActualStartAdjusted => self.act_start_adjusted,
            DateField::ActualFinishAdjusted => self.act_end_adjusted,
            other => self.activity.record.date(other),
        }
    }
}

/// Splits `rows` into `(plan_view, actual_view)` as of `data_date`.
///
/// Both views keep input order.
pub fn polarize(rows: &[ScoredActivity], data_date: NaiveDateTime) -> (Vec<PlanRow>, Vec<ActualRow>) {
    let mut plan = Vec::new();
    let mut actual = Vec::new();

    for row in rows {
        let rec = &row.record;
        if rec.status != ActivityStatus::NotStarted {
            let act_end_adjusted = match rec.status {
                ActivityStatus::InProgress => Some(data_date),
                _ => rec.actual_finish,
            };
            actual.push(ActualRow {
                activity: row.clone(),
                act_start_adjusted: rec.actual_start,
                act_end_adjusted,
            });
        }
        if rec.status != ActivityStatus::Complete {
            plan.push(PlanRow {
                activity: row.clone(),
                early_start_adjusted: rec.early_start,
                early_finish_adjusted: rec.early_finish,
                late_start_adjusted: rec.late_start,
                late_finish_adjusted: rec.late_finish,
            });
        }
    }

    (plan, actual)
}
