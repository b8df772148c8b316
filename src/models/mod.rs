//! Earned-duration domain models.
//!
//! Provides the input records (activities, snapshots), the calendar month
//! axis, the time-phased matrices produced by a run, and the diagnostics
//! channel that collects skipped rows.
//!
//! # Domain Mappings
//!
//! | u-earned-duration | Primavera P6 | Generic |
//! |-------------------|--------------|---------|
//! | ActivityRecord | TASK row | Work item |
//! | Snapshot | XER export + `last_recalc_date` | Status report |
//! | MonthBucket | Reporting period | Calendar month |
//! | TimePhasedMatrix | Time-phased report | Activity × period grid |

mod activity;
mod calendar;
mod diagnostics;
mod matrix;
mod snapshot;

pub use activity::{ActivityRecord, ActivityStatus, DateField, Dated};
pub use calendar::{duration_days, parse_date, MonthBucket};
pub use diagnostics::{Diagnostic, DiagnosticReason, DiagnosticReport};
pub use matrix::{FilledMatrix, FilledRow, MatrixKind, TimePhasedMatrix, TimePhasedRow};
pub use snapshot::Snapshot;
