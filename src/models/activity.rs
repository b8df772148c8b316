//! Activity record model.
//!
//! An activity record is one row of a schedule snapshot: an identifier, a
//! progress status, and four pairs of dates (early, late, target, actual).
//! Actual dates are optional; an absent actual date means the event has
//! not occurred yet. Any schedule date may be absent in a damaged export,
//! so every date is an `Option`.
//!
//! # Status Model
//! | Status | Actual start | Actual finish |
//! |--------|--------------|---------------|
//! | NotStarted | absent | absent |
//! | InProgress | present | absent |
//! | Complete | present | present |

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{EdmError, Result};

/// Progress status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    /// No work performed yet.
    NotStarted,
    /// Started, not finished.
    InProgress,
    /// Finished.
    Complete,
}

impl ActivityStatus {
    /// Parses a status code.
    ///
    /// Accepts the Primavera codes (`TK_NotStart`, `TK_Active`,
    /// `TK_Complete`) as well as the variant names.
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim() {
            "TK_NotStart" | "NotStarted" => Ok(Self::NotStarted),
            "TK_Active" | "InProgress" => Ok(Self::InProgress),
            "TK_Complete" | "Complete" => Ok(Self::Complete),
            other => Err(EdmError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }

    /// The Primavera status code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotStarted => "TK_NotStart",
            Self::InProgress => "TK_Active",
            Self::Complete => "TK_Complete",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Named date fields addressable on activity rows.
///
/// The `*Adjusted` fields exist only on polarized rows; plain records
/// carry the eight source fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateField {
    EarlyStart,
    EarlyFinish,
    LateStart,
    LateFinish,
    TargetStart,
    TargetFinish,
    ActualStart,
    ActualFinish,
    EarlyStartAdjusted,
    EarlyFinishAdjusted,
    LateStartAdjusted,
    LateFinishAdjusted,
    ActualStartAdjusted,
    ActualFinishAdjusted,
}

impl DateField {
    /// Column name of this field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EarlyStart => "early_start_date",
            Self::EarlyFinish => "early_end_date",
            Self::LateStart => "late_start_date",
            Self::LateFinish => "late_end_date",
            Self::TargetStart => "target_start_date",
            Self::TargetFinish => "target_end_date",
            Self::ActualStart => "act_start_date",
            Self::ActualFinish => "act_end_date",
            Self::EarlyStartAdjusted => "early_start_date_adjusted",
            Self::EarlyFinishAdjusted => "early_end_date_adjusted",
            Self::LateStartAdjusted => "late_start_date_adjusted",
            Self::LateFinishAdjusted => "late_end_date_adjusted",
            Self::ActualStartAdjusted => "act_start_date_adjusted",
            Self::ActualFinishAdjusted => "act_end_date_adjusted",
        }
    }

    /// Whether this is one of the eight source fields of a record.
    pub fn is_source_field(&self) -> bool {
        matches!(
            self,
            Self::EarlyStart
                | Self::EarlyFinish
                | Self::LateStart
                | Self::LateFinish
                | Self::TargetStart
                | Self::TargetFinish
                | Self::ActualStart
                | Self::ActualFinish
        )
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row type whose dates can be addressed by [`DateField`].
///
/// The time-phaser works on any `Dated` row, so the caller decides what a
/// start/finish pair means (baseline, plan, actual) by choosing fields.
pub trait Dated {
    /// Name of the row type, used in schema errors.
    const TABLE: &'static str;

    /// Activity identifier.
    fn activity_id(&self) -> &str;

    /// Whether rows of this type carry `field` at all.
    fn has_field(field: DateField) -> bool;

    /// Value of `field`; `None` when absent on this row or unsupported.
    fn date(&self, field: DateField) -> Option<NaiveDateTime>;
}

/// One activity of a schedule snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Identifier, unique within a snapshot.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning WBS node, if known.
    pub wbs_id: Option<String>,
    /// Progress status.
    pub status: ActivityStatus,
    pub early_start: Option<NaiveDateTime>,
    pub early_finish: Option<NaiveDateTime>,
    pub late_start: Option<NaiveDateTime>,
    pub late_finish: Option<NaiveDateTime>,
    pub target_start: Option<NaiveDateTime>,
    pub target_finish: Option<NaiveDateTime>,
    pub actual_start: Option<NaiveDateTime>,
    pub actual_finish: Option<NaiveDateTime>,
    /// Remaining source columns, untouched.
    pub attributes: HashMap<String, String>,
}

impl ActivityRecord {
    /// Creates a record with no dates.
    pub fn new(id: impl Into<String>, status: ActivityStatus) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            wbs_id: None,
            status,
            early_start: None,
            early_finish: None,
            late_start: None,
            late_finish: None,
            target_start: None,
            target_finish: None,
            actual_start: None,
            actual_finish: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning WBS node.
    pub fn with_wbs(mut self, wbs_id: impl Into<String>) -> Self {
        self.wbs_id = Some(wbs_id.into());
        self
    }

    /// Sets early start and finish.
    pub fn with_early(mut self, start: NaiveDateTime, finish: NaiveDateTime) -> Self {
        self.early_start = Some(start);
        self.early_finish = Some(finish);
        self
    }

    /// Sets late start and finish.
    pub fn with_late(mut self, start: NaiveDateTime, finish: NaiveDateTime) -> Self {
        self.late_start = Some(start);
        self.late_finish = Some(finish);
        self
    }

    /// Sets target (planned) start and finish.
    pub fn with_target(mut self, start: NaiveDateTime, finish: NaiveDateTime) -> Self {
        self.target_start = Some(start);
        self.target_finish = Some(finish);
        self
    }

    /// Sets the actual start.
    pub fn with_actual_start(mut self, start: NaiveDateTime) -> Self {
        self.actual_start = Some(start);
        self
    }

    /// Sets the actual finish.
    pub fn with_actual_finish(mut self, finish: NaiveDateTime) -> Self {
        self.actual_finish = Some(finish);
        self
    }

    /// Adds a pass-through attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Early finish minus early start.
    ///
    /// On a baseline record this is the activity's baseline duration.
    pub fn early_duration(&self) -> Option<Duration> {
        Some(self.early_finish? - self.early_start?)
    }

    /// Target finish minus target start.
    pub fn planned_duration(&self) -> Option<Duration> {
        Some(self.target_finish? - self.target_start?)
    }
}

impl Dated for ActivityRecord {
    const TABLE: &'static str = "activity";

    fn activity_id(&self) -> &str {
        &self.id
    }

    fn has_field(field: DateField) -> bool {
        field.is_source_field()
    }

    fn date(&self, field: DateField) -> Option<NaiveDateTime> {
        match field {
            DateField::EarlyStart => self.early_start,
            DateField::EarlyFinish => self.early_finish,
            DateField::LateStart => self.late_start,
            DateField::LateFinish => self.late_finish,
            DateField::TargetStart => self.target_start,
            DateField::TargetFinish => self.target_finish,
            DateField::ActualStart => self.actual_start,
            DateField::ActualFinish => self.actual_finish,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn dt(s: &str) -> NaiveDateTime {
        parse_date(s).unwrap().unwrap()
    }

    #[test]
    fn test_record_builder() {
        let rec = ActivityRecord::new("A100", ActivityStatus::InProgress)
            .with_name("Pour footings")
            .with_wbs("W1")
            .with_early(dt("2024-01-15"), dt("2024-03-15"))
            .with_actual_start(dt("2024-01-20"))
            .with_attribute("clndr_id", "7");

        assert_eq!(rec.id, "A100");
        assert_eq!(rec.wbs_id.as_deref(), Some("W1"));
        assert_eq!(rec.early_duration(), Some(Duration::days(60)));
        assert_eq!(rec.actual_finish, None);
        assert_eq!(rec.attributes.get("clndr_id"), Some(&"7".to_string()));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ActivityStatus::from_code("TK_NotStart").unwrap(),
            ActivityStatus::NotStarted
        );
        assert_eq!(
            ActivityStatus::from_code(" TK_Active ").unwrap(),
            ActivityStatus::InProgress
        );
        assert_eq!(
            ActivityStatus::from_code("Complete").unwrap(),
            ActivityStatus::Complete
        );
        assert!(matches!(
            ActivityStatus::from_code("TK_Suspended"),
            Err(EdmError::UnknownStatus { .. })
        ));
        assert_eq!(ActivityStatus::Complete.to_string(), "TK_Complete");
    }

    #[test]
    fn test_dated_fields() {
        let rec = ActivityRecord::new("A1", ActivityStatus::Complete)
            .with_actual_start(dt("2024-01-20"))
            .with_actual_finish(dt("2024-03-10"));

        assert!(ActivityRecord::has_field(DateField::ActualFinish));
        assert!(!ActivityRecord::has_field(DateField::ActualFinishAdjusted));
        assert_eq!(rec.date(DateField::ActualStart), Some(dt("2024-01-20")));
        assert_eq!(rec.date(DateField::EarlyStart), None);
        assert_eq!(rec.early_duration(), None);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(DateField::EarlyFinish.name(), "early_end_date");
        assert_eq!(
            DateField::ActualFinishAdjusted.to_string(),
            "act_end_date_adjusted"
        );
    }
}
