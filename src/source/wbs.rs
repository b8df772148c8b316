//! WBS path filtering.
//!
//! Selects the activities under chosen WBS branches. WBS paths are dotted
//! short names below the project node, e.g. `ENG.CIV` for the `CIV` node
//! under `ENG` in any project.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{Hierarchy, RecordTable, XerDocument, TASK_TABLE};
use crate::error::Result;

/// WBS table of an XER export.
pub const WBS_TABLE: &str = "PROJWBS";

const WBS_ID: &str = "wbs_id";
const PARENT_WBS_ID: &str = "parent_wbs_id";
const SHORT_NAME: &str = "wbs_short_name";
const PROJECT_NODE_FLAG: &str = "proj_node_flag";

/// WBS branches to keep and to drop.
///
/// A node is selected when it or an ancestor matches an inclusion and
/// neither it nor an ancestor matches an exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbsFilter {
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
}

impl WbsFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes a branch by path.
    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.inclusions.push(path.into());
        self
    }

    /// Excludes a branch by path.
    pub fn exclude(mut self, path: impl Into<String>) -> Self {
        self.exclusions.push(path.into());
        self
    }

    /// WBS ids selected from `wbs` (a PROJWBS table).
    pub fn select_wbs_ids(&self, wbs: &RecordTable) -> Result<HashSet<String>> {
        let hierarchy = Hierarchy::from_table(wbs, WBS_ID, PARENT_WBS_ID, SHORT_NAME)?;
        let paths = wbs_paths(wbs)?;

        let branch = |targets: &[String]| -> HashSet<String> {
            let mut ids = HashSet::new();
            for (id, path) in &paths {
                if targets.iter().any(|t| t == path) {
                    ids.insert(id.clone());
                    ids.extend(hierarchy.descendants(id).into_iter().map(str::to_string));
                }
            }
            ids
        };

        let included = branch(&self.inclusions);
        let excluded = branch(&self.exclusions);
        log::debug!(
            "WBS filter: {} included, {} excluded",
            included.len(),
            excluded.len()
        );
        Ok(included.difference(&excluded).cloned().collect())
    }

    /// TASK rows of `doc` whose WBS node is selected.
    pub fn filter_tasks(&self, doc: &XerDocument) -> Result<RecordTable> {
        let selected = self.select_wbs_ids(doc.require_table(WBS_TABLE)?)?;
        let tasks = doc.require_table(TASK_TABLE)?;
        tasks.require_columns([WBS_ID])?;
        Ok(tasks.filtered(|r| selected.contains(r.text(WBS_ID))))
    }
}

/// Path of every WBS node below a project node, keyed by WBS id.
///
/// Paths are built per project node (`proj_node_flag == "Y"`) and do not
/// include the project node itself.
pub fn wbs_paths(wbs: &RecordTable) -> Result<BTreeMap<String, String>> {
    wbs.require_columns([WBS_ID, PARENT_WBS_ID, SHORT_NAME, PROJECT_NODE_FLAG])?;
    let hierarchy = Hierarchy::from_table(wbs, WBS_ID, PARENT_WBS_ID, SHORT_NAME)?;

    let mut paths = BTreeMap::new();
    for project in wbs.records().filter(|r| r.text(PROJECT_NODE_FLAG) == "Y") {
        for node in hierarchy.paths_from(project.text(WBS_ID), "") {
            paths.insert(node.id, node.path);
        }
    }
    Ok(paths)
}
