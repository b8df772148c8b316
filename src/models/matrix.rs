//! Time-phased duration matrices.
//!
//! A matrix has one row per activity and one column per calendar month.
//! A cell holds the fractional days of the activity's interval falling in
//! that month. Cells are sparse: a month an activity does not touch has no
//! entry, which is different from an entry of `0.0`.
//!
//! Month columns are tracked by [`MonthBucket`] keys, never by position,
//! so scaling "every month column" of a row touches exactly the month
//! cells and nothing else.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::MonthBucket;

/// Which matrix of an earned-duration run this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixKind {
    /// Matched baseline, early dates.
    BaselineEarly,
    /// Matched baseline, late dates.
    BaselineLate,
    /// Matched update, actual progress to date.
    UpdateActual,
    /// Matched update, remaining work on early dates.
    UpdatePlanEarly,
    /// Matched update, remaining work on late dates.
    UpdatePlanLate,
    /// Baseline-only activities, early dates.
    Removed,
    /// Update-only activities, remaining work on early dates.
    AddedPlan,
    /// Update-only activities, actual progress to date.
    AddedActual,
    /// Matched actual progress rescaled to baseline duration.
    Earned,
}

impl MatrixKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BaselineEarly => "baseline_early",
            Self::BaselineLate => "baseline_late",
            Self::UpdateActual => "update_actual",
            Self::UpdatePlanEarly => "update_plan_early",
            Self::UpdatePlanLate => "update_plan_late",
            Self::Removed => "removed",
            Self::AddedPlan => "added_plan",
            Self::AddedActual => "added_actual",
            Self::Earned => "earned",
        }
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One activity's monthly contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePhasedRow {
    /// Activity identifier.
    pub activity_id: String,
    /// Days per month; months the interval does not touch are absent.
    pub cells: BTreeMap<MonthBucket, f64>,
}

impl TimePhasedRow {
    pub fn new(activity_id: impl Into<String>) -> Self {
        Self {
            activity_id: activity_id.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Sum of all month cells (days).
    pub fn total(&self) -> f64 {
        self.cells.values().sum()
    }

    /// A copy of this row with every month cell multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            activity_id: self.activity_id.clone(),
            cells: self
                .cells
                .iter()
                .map(|(month, days)| (*month, days * factor))
                .collect(),
        }
    }
}

/// An activity × month matrix of durations in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePhasedMatrix {
    /// Which matrix this is.
    pub kind: MatrixKind,
    /// Rows in input order.
    pub rows: Vec<TimePhasedRow>,
}

impl TimePhasedMatrix {
    /// Creates an empty matrix.
    pub fn new(kind: MatrixKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push(&mut self, row: TimePhasedRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a row by activity.
    pub fn row(&self, activity_id: &str) -> Option<&TimePhasedRow> {
        self.rows.iter().find(|r| r.activity_id == activity_id)
    }

    /// Looks up one cell. `None` if the row or month is absent.
    pub fn get(&self, activity_id: &str, month: MonthBucket) -> Option<f64> {
        self.row(activity_id)?.cells.get(&month).copied()
    }

    /// Activity identifiers in row order.
    pub fn activity_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.activity_id.as_str())
    }

    /// Every month that appears in at least one row, ascending.
    pub fn columns(&self) -> BTreeSet<MonthBucket> {
        self.rows
            .iter()
            .flat_map(|r| r.cells.keys().copied())
            .collect()
    }

    /// Earliest and latest month present.
    pub fn month_span(&self) -> Option<(MonthBucket, MonthBucket)> {
        let columns = self.columns();
        Some((*columns.first()?, *columns.last()?))
    }

    /// Sum of each month column across rows.
    pub fn monthly_totals(&self) -> BTreeMap<MonthBucket, f64> {
        let mut totals = BTreeMap::new();
        for row in &self.rows {
            for (month, days) in &row.cells {
                *totals.entry(*month).or_insert(0.0) += days;
            }
        }
        totals
    }

    /// Sum of every cell.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(TimePhasedRow::total).sum()
    }
}

/// A matrix reindexed onto a contiguous month axis.
///
/// `None` cells mean "no activity scheduled in that month", which is kept
/// distinct from a zero contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledMatrix {
    pub kind: MatrixKind,
    /// Contiguous month axis, ascending.
    pub months: Vec<MonthBucket>,
    pub rows: Vec<FilledRow>,
}

/// One activity's values on the contiguous axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledRow {
    pub activity_id: String,
    /// Aligned with [`FilledMatrix::months`].
    pub values: Vec<Option<f64>>,
}

impl FilledMatrix {
    /// Looks up one cell.
    pub fn get(&self, activity_id: &str, month: MonthBucket) -> Option<f64> {
        let col = self.months.iter().position(|m| *m == month)?;
        let row = self.rows.iter().find(|r| r.activity_id == activity_id)?;
        row.values.get(col).copied().flatten()
    }

    /// Per-month totals; `None` for months no row touches.
    pub fn monthly_totals(&self) -> Vec<(MonthBucket, Option<f64>)> {
        self.months
            .iter()
            .enumerate()
            .map(|(col, month)| {
                let total = self
                    .rows
                    .iter()
                    .filter_map(|r| r.values.get(col).copied().flatten())
                    .fold(None, |acc: Option<f64>, v| Some(acc.unwrap_or(0.0) + v));
                (*month, total)
            })
            .collect()
    }
}
