//! Earned-duration performance indicators.
//!
//! Summarizes one run's matrices into headline figures.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total baseline | Sum of the baseline-early matrix (days) |
//! | Planned to date | Baseline-early days in months up to the data-date month |
//! | Total actual | Sum of the matched actual matrix (days) |
//! | Total earned | Sum of the earned matrix (days) |
//! | Percent earned | Earned / total baseline |
//! | Duration performance index | Earned / planned to date |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::EarnedDurationReport;
use crate::models::MonthBucket;

/// Slack for index comparisons; prorated cells do not sum exactly.
const INDEX_TOLERANCE: f64 = 1e-9;

/// Headline figures of an earned-duration run. All durations in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedDurationKpi {
    pub total_baseline_days: f64,
    pub planned_to_date_days: f64,
    pub total_actual_days: f64,
    pub total_earned_days: f64,
    /// Earned / total baseline. `None` if there is no baseline duration.
    pub percent_earned: Option<f64>,
    /// Earned / planned to date. `None` if nothing was planned yet.
    pub performance_index: Option<f64>,
    /// Earned days per month.
    pub earned_by_month: BTreeMap<MonthBucket, f64>,
}

impl EarnedDurationKpi {
    /// Computes KPIs as of `data_date`.
    pub fn calculate(report: &EarnedDurationReport, data_date: NaiveDateTime) -> Self {
        let cutoff = MonthBucket::of(data_date);
        let total_baseline_days = report.baseline_early.total();
        let planned_to_date_days: f64 = report
            .baseline_early
            .monthly_totals()
            .range(..=cutoff)
            .map(|(_, days)| days)
            .sum();
        let total_actual_days = report.update_actual.total();
        let total_earned_days = report.earned.total();

        let percent_earned = ratio(total_earned_days, total_baseline_days);
        let performance_index = ratio(total_earned_days, planned_to_date_days);

        Self {
            total_baseline_days,
            planned_to_date_days,
            total_actual_days,
            total_earned_days,
            percent_earned,
            performance_index,
            earned_by_month: report.earned.monthly_totals(),
        }
    }

    /// Computes KPIs as of the report's own data date.
    pub fn from_report(report: &EarnedDurationReport) -> Self {
        Self::calculate(report, report.data_date)
    }

    /// Whether the run is at or ahead of plan by the given index threshold.
    pub fn on_track(&self, min_index: f64) -> bool {
        self.performance_index
            .is_some_and(|spi| spi >= min_index - INDEX_TOLERANCE)
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}
