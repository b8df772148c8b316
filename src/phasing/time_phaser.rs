//! Interval → month-bucket time-phaser.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::error::{EdmError, Result};
use crate::models::{
    duration_days, DateField, Dated, DiagnosticReason, DiagnosticReport, MatrixKind, MonthBucket,
    TimePhasedMatrix, TimePhasedRow,
};

/// Time-phases `rows` on the `start`/`finish` date pair.
///
/// Produces one row per activity that has a positive-length interval.
/// Rows with a missing date, a zero-length interval, or a finish before
/// their start are skipped and recorded in `diagnostics` under `kind`.
///
/// # Errors
/// `EdmError::Schema` if the row type does not carry `start` or `finish`
/// at all.
pub fn phase<T: Dated>(
    rows: &[T],
    kind: MatrixKind,
    start: DateField,
    finish: DateField,
    diagnostics: &mut DiagnosticReport,
) -> Result<TimePhasedMatrix> {
    for field in [start, finish] {
        if !T::has_field(field) {
            return Err(EdmError::schema(T::TABLE, field.name()));
        }
    }

    let mut matrix = TimePhasedMatrix::new(kind);
    for row in rows {
        let id = row.activity_id();
        let (asd, afd) = match (row.date(start), row.date(finish)) {
            (None, _) => {
                diagnostics.record(id, DiagnosticReason::MissingStart(start), kind);
                continue;
            }
            (_, None) => {
                diagnostics.record(id, DiagnosticReason::MissingFinish(finish), kind);
                continue;
            }
            (Some(s), Some(f)) => (s, f),
        };

        if afd < asd {
            diagnostics.record(id, DiagnosticReason::InvertedInterval, kind);
            continue;
        }

        let cells = phase_interval(asd, afd);
        if cells.is_empty() {
            diagnostics.record(id, DiagnosticReason::ZeroDuration, kind);
            continue;
        }

        matrix.push(TimePhasedRow {
            activity_id: id.to_string(),
            cells,
        });
    }

    log::debug!(
        "{kind}: phased {} of {} rows on {start}..{finish}",
        matrix.len(),
        rows.len()
    );
    Ok(matrix)
}

/// Spreads `[start, finish)` over calendar months.
///
/// Every month from the one containing `start` to the one containing
/// `finish` gets an entry. A finish exactly at midnight on the first of a
/// month gives that month a `0.0` cell, which is distinct from a month
/// the interval never reaches. Empty when `finish <= start`.
pub fn phase_interval(start: NaiveDateTime, finish: NaiveDateTime) -> BTreeMap<MonthBucket, f64> {
    let mut cells = BTreeMap::new();
    if finish <= start {
        return cells;
    }

    let last = MonthBucket::of(finish);
    let mut cursor = Some(MonthBucket::of(start));
    while let Some(month) = cursor {
        if month > last {
            break;
        }
        let next = month.next();
        let window_start = month.start();
        let window_end = next.map_or(finish, |m| m.start());

        let lo = window_start.max(start);
        let hi = window_end.min(finish);
        if hi >= lo {
            cells.insert(month, duration_days(hi - lo));
        }
        cursor = next;
    }
    cells
}
