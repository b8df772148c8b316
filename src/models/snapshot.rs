//! Schedule snapshot model.
//!
//! A snapshot is one export of a schedule: its activities plus the data
//! date it was statused as of. A run compares two snapshots of the same
//! schedule, the baseline and a later update.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ActivityRecord;

/// Activities of one schedule export and its data date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// As-of cutoff: work before it is actual, after it is planned.
    pub data_date: NaiveDateTime,
    /// Activities in export order.
    pub activities: Vec<ActivityRecord>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new(data_date: NaiveDateTime) -> Self {
        Self {
            data_date,
            activities: Vec::new(),
        }
    }

    /// Adds an activity.
    pub fn with_activity(mut self, activity: ActivityRecord) -> Self {
        self.activities.push(activity);
        self
    }

    /// Replaces the activity list.
    pub fn with_activities(mut self, activities: Vec<ActivityRecord>) -> Self {
        self.activities = activities;
        self
    }

    /// Looks up an activity by identifier.
    pub fn activity(&self, id: &str) -> Option<&ActivityRecord> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
