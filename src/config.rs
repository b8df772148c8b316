//! Engine configuration.
//!
//! Every field has a default, so `{}` is a valid configuration and any
//! subset of keys may be given in JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Earned-duration run options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Repair completed activities whose actual start equals their actual
    /// finish by moving the start back by the baseline duration.
    pub fix_zero_actual_duration: bool,
    /// Normalize actualized activities' early/late dates on the update
    /// snapshot before matching. Off by default: callers normally pass
    /// already-adjusted dates.
    pub normalize_update: bool,
    /// Column names used when reading activity tables, e.g. by
    /// [`EarnedDurationEngine::run_xer`](crate::engine::EarnedDurationEngine::run_xer).
    pub columns: ColumnMap,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fix_zero_actual_duration: true,
            normalize_update: false,
            columns: ColumnMap::default(),
        }
    }
}

impl EngineConfig {
    /// Decodes a configuration from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Sets the zero-actual-duration repair flag.
    pub fn with_fix_zero_actual_duration(mut self, enabled: bool) -> Self {
        self.fix_zero_actual_duration = enabled;
        self
    }

    /// Sets whether the update snapshot is normalized first.
    pub fn with_normalize_update(mut self, enabled: bool) -> Self {
        self.normalize_update = enabled;
        self
    }

    /// Sets the column mapping.
    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }
}

/// Column names of an activity table.
///
/// Defaults are the Primavera P6 TASK table names. The identifier column
/// defaults to `task_code` (the activity ID users see), which is stable
/// across exports where `task_id` is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub id: String,
    pub name: String,
    pub wbs_id: String,
    pub status: String,
    pub early_start: String,
    pub early_finish: String,
    pub late_start: String,
    pub late_finish: String,
    pub target_start: String,
    pub target_finish: String,
    pub actual_start: String,
    pub actual_finish: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: "task_code".into(),
            name: "task_name".into(),
            wbs_id: "wbs_id".into(),
            status: "status_code".into(),
            early_start: "early_start_date".into(),
            early_finish: "early_end_date".into(),
            late_start: "late_start_date".into(),
            late_finish: "late_end_date".into(),
            target_start: "target_start_date".into(),
            target_finish: "target_end_date".into(),
            actual_start: "act_start_date".into(),
            actual_finish: "act_end_date".into(),
        }
    }
}

impl ColumnMap {
    /// Sets the identifier column.
    pub fn with_id(mut self, column: impl Into<String>) -> Self {
        self.id = column.into();
        self
    }

    /// Columns that must exist in every activity table.
    ///
    /// Name and WBS columns are optional.
    pub fn required(&self) -> [&str; 10] {
        [
            self.id.as_str(),
            self.status.as_str(),
            self.early_start.as_str(),
            self.early_finish.as_str(),
            self.late_start.as_str(),
            self.late_finish.as_str(),
            self.target_start.as_str(),
            self.target_finish.as_str(),
            self.actual_start.as_str(),
            self.actual_finish.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert!(cfg.fix_zero_actual_duration);
        assert!(!cfg.normalize_update);
        assert_eq!(cfg.columns.id, "task_code");
        assert_eq!(cfg.columns.required().len(), 10);
    }

    #[test]
    fn test_partial_json() {
        let cfg = EngineConfig::from_json(
            r#"{"fix_zero_actual_duration": false, "columns": {"id": "task_id"}}"#,
        )
        .unwrap();
        assert!(!cfg.fix_zero_actual_duration);
        assert_eq!(cfg.columns.id, "task_id");
        assert_eq!(cfg.columns.status, "status_code");
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(EngineConfig::from_json("{\"normalize_update\": 3}").is_err());
    }

    #[test]
    fn test_builders() {
        let cfg = EngineConfig::default()
            .with_fix_zero_actual_duration(false)
            .with_normalize_update(true)
            .with_columns(ColumnMap::default().with_id("task_id"));
        assert!(cfg.normalize_update);
        assert_eq!(cfg.columns.id, "task_id");
    }
}
