//! Activity table → activity records.

use chrono::NaiveDateTime;
use std::collections::HashSet;

use super::{RecordTable, XerDocument};
use crate::config::ColumnMap;
use crate::error::{EdmError, Result};
use crate::models::{parse_date, ActivityRecord, ActivityStatus, Snapshot};

/// Activity table of an XER export.
pub const TASK_TABLE: &str = "TASK";

/// Converts every row of `table` into an [`ActivityRecord`].
///
/// Columns not named by `columns` are carried into `attributes`.
///
/// # Errors
/// - `Schema` if any required column is absent from the table.
/// - `UnknownStatus` for an unrecognized status code.
/// - `InvalidDate` for a non-empty, unparseable date cell.
pub fn activities_from_table(table: &RecordTable, columns: &ColumnMap) -> Result<Vec<ActivityRecord>> {
    table.require_columns(columns.required())?;

    let mapped: HashSet<&str> = columns
        .required()
        .into_iter()
        .chain([columns.name.as_str(), columns.wbs_id.as_str()])
        .collect();

    let date = |raw: &str, field: &str| -> Result<Option<NaiveDateTime>> {
        parse_date(raw).map_err(|_| EdmError::InvalidDate {
            table: table.name.clone(),
            field: field.to_string(),
            value: raw.to_string(),
        })
    };
    let cell_date = |record: &super::Record<'_>, field: &str| date(record.text(field), field);

    let mut activities = Vec::with_capacity(table.len());
    for record in table.records() {
        let mut activity = ActivityRecord::new(
            record.text(&columns.id).trim(),
            ActivityStatus::from_code(record.text(&columns.status))?,
        );
        activity.name = record.text(&columns.name).to_string();
        activity.wbs_id = record.non_empty(&columns.wbs_id).map(str::to_string);
        activity.early_start = cell_date(&record, &columns.early_start)?;
        activity.early_finish = cell_date(&record, &columns.early_finish)?;
        activity.late_start = cell_date(&record, &columns.late_start)?;
        activity.late_finish = cell_date(&record, &columns.late_finish)?;
        activity.target_start = cell_date(&record, &columns.target_start)?;
        activity.target_finish = cell_date(&record, &columns.target_finish)?;
        activity.actual_start = cell_date(&record, &columns.actual_start)?;
        activity.actual_finish = cell_date(&record, &columns.actual_finish)?;
        activity.attributes = record
            .cells()
            .filter(|(column, _)| !mapped.contains(column))
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        activities.push(activity);
    }

    log::debug!("{}: read {} activities", table.name, activities.len());
    Ok(activities)
}

/// Builds a snapshot from an activity table and a data date.
pub fn snapshot_from_table(
    table: &RecordTable,
    data_date: NaiveDateTime,
    columns: &ColumnMap,
) -> Result<Snapshot> {
    Ok(Snapshot::new(data_date).with_activities(activities_from_table(table, columns)?))
}

/// Builds a snapshot from an XER export's TASK table and data date.
pub fn snapshot_from_xer(doc: &XerDocument, columns: &ColumnMap) -> Result<Snapshot> {
    snapshot_from_table(doc.require_table(TASK_TABLE)?, doc.data_date()?, columns)
}
