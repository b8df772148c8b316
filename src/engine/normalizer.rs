//! Early/late date normalization for actualized activities.
//!
//! Once an activity has started, its CPM early dates are stale. The
//! planned (target) dates take their place, and the late start is rebuilt
//! from the late finish and the planned duration so float is measured on
//! the planned duration.
//!
//! | Status | early start | early finish | late start | late finish |
//! |--------|-------------|--------------|------------|-------------|
//! | NotStarted | unchanged | unchanged | unchanged | unchanged |
//! | InProgress / Complete | target start | target finish | late finish − planned duration | unchanged |

use crate::models::{ActivityRecord, ActivityStatus};

/// Normalizes every activity. The input is left untouched.
pub fn normalize(activities: &[ActivityRecord]) -> Vec<ActivityRecord> {
    activities.iter().map(normalize_activity).collect()
}

/// Normalizes one activity.
///
/// A late start that cannot be rebuilt (late finish or either target date
/// absent) becomes absent.
pub fn normalize_activity(activity: &ActivityRecord) -> ActivityRecord {
    let mut adjusted = activity.clone();
    if activity.status == ActivityStatus::NotStarted {
        return adjusted;
    }

    adjusted.early_start = activity.target_start;
    adjusted.early_finish = activity.target_finish;
    adjusted.late_start = activity
        .late_finish
        .zip(activity.planned_duration())
        .map(|(late_finish, planned)| late_finish - planned);
    adjusted
}
