//! Baseline/update activity matching.
//!
//! Partitions two activity sets by identifier equality into matched,
//! added (update only) and removed (baseline only) subsets. Matching is a
//! pure set operation; identifiers are assumed unique within a snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::ActivityRecord;

/// Where an identifier sits in the baseline/update comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Present in both snapshots.
    Normal,
    /// Present only in the update.
    Added,
    /// Present only in the baseline.
    Removed,
}

/// Result of matching a baseline against an update.
///
/// Every subset keeps its snapshot's full records in snapshot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    /// Baseline records whose id is also in the update.
    pub matched_baseline: Vec<ActivityRecord>,
    /// Update records whose id is also in the baseline.
    pub matched_update: Vec<ActivityRecord>,
    /// Update records with no baseline counterpart.
    pub added: Vec<ActivityRecord>,
    /// Baseline records with no update counterpart.
    pub removed: Vec<ActivityRecord>,
}

impl MatchResult {
    /// Identifier → comparison status over the union of both snapshots.
    pub fn comparison(&self) -> BTreeMap<String, MatchStatus> {
        let mut map = BTreeMap::new();
        for rec in &self.matched_update {
            map.insert(rec.id.clone(), MatchStatus::Normal);
        }
        for rec in &self.added {
            map.insert(rec.id.clone(), MatchStatus::Added);
        }
        for rec in &self.removed {
            map.insert(rec.id.clone(), MatchStatus::Removed);
        }
        map
    }

    /// Number of matched identifiers.
    pub fn matched_count(&self) -> usize {
        self.matched_update.len()
    }
}

/// Matches `baseline` against `update` by activity identifier.
pub fn match_activities(baseline: &[ActivityRecord], update: &[ActivityRecord]) -> MatchResult {
    let baseline_ids: HashSet<&str> = baseline.iter().map(|a| a.id.as_str()).collect();
    let update_ids: HashSet<&str> = update.iter().map(|a| a.id.as_str()).collect();

    let (matched_baseline, removed): (Vec<_>, Vec<_>) = baseline
        .iter()
        .cloned()
        .partition(|a| update_ids.contains(a.id.as_str()));
    let (matched_update, added): (Vec<_>, Vec<_>) = update
        .iter()
        .cloned()
        .partition(|a| baseline_ids.contains(a.id.as_str()));

    log::debug!(
        "matched {} activities, {} added, {} removed",
        matched_update.len(),
        added.len(),
        removed.len()
    );

    MatchResult {
        matched_baseline,
        matched_update,
        added,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityStatus;

    fn recs(ids: &[&str]) -> Vec<ActivityRecord> {
        ids.iter()
            .map(|id| ActivityRecord::new(*id, ActivityStatus::NotStarted))
            .collect()
    }

    #[test]
    fn test_partition() {
        let baseline = recs(&["T1", "T2", "T4"]);
        let update = recs(&["T4", "T1", "T3"]);
        let result = match_activities(&baseline, &update);

        let ids = |v: &[ActivityRecord]| v.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&result.matched_baseline), vec!["T1", "T4"]);
        assert_eq!(ids(&result.matched_update), vec!["T4", "T1"]);
        assert_eq!(ids(&result.added), vec!["T3"]);
        assert_eq!(ids(&result.removed), vec!["T2"]);
        assert_eq!(result.matched_count(), 2);
    }

    #[test]
    fn test_comparison_status() {
        let result = match_activities(&recs(&["A", "B"]), &recs(&["B", "C"]));
        let cmp = result.comparison();
        assert_eq!(cmp.len(), 3);
        assert_eq!(cmp["A"], MatchStatus::Removed);
        assert_eq!(cmp["B"], MatchStatus::Normal);
        assert_eq!(cmp["C"], MatchStatus::Added);
    }

    #[test]
    fn test_empty_sides() {
        let result = match_activities(&[], &recs(&["X"]));
        assert!(result.matched_update.is_empty());
        assert_eq!(result.added.len(), 1);
        assert!(result.removed.is_empty());

        let result = match_activities(&recs(&["X"]), &[]);
        assert_eq!(result.removed.len(), 1);
        assert!(result.added.is_empty());
    }

    #[test]
    fn test_matched_keeps_full_records() {
        let baseline = vec![ActivityRecord::new("A", ActivityStatus::NotStarted).with_attribute("phase", "design")];
        let update = vec![ActivityRecord::new("A", ActivityStatus::Complete).with_attribute("phase", "build")];
        let result = match_activities(&baseline, &update);
        assert_eq!(result.matched_baseline[0].attributes["phase"], "design");
        assert_eq!(result.matched_update[0].status, ActivityStatus::Complete);
    }
}
