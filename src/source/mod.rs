//! Schedule export sources.
//!
//! Reads Primavera P6 XER exports into named record tables and converts
//! them into snapshots the engine can run on. Also resolves the two
//! self-referential hierarchies of an export: WBS paths (for filtering
//! activities by branch) and activity code paths.
//!
//! # Tables used
//!
//! | Table | Used for |
//! |-------|----------|
//! | `PROJECT` | Data date (`last_recalc_date`) |
//! | `TASK` | Activities |
//! | `PROJWBS` | WBS paths and filtering |
//! | `ACTVTYPE`, `ACTVCODE`, `TASKACTV` | Activity code assignments |

mod activity_codes;
mod hierarchy;
mod table;
mod tasks;
mod wbs;
mod xer;

pub use activity_codes::{
    activity_code_assignments, CodeAssignment, ASSIGNMENT_TABLE, CODE_TABLE, CODE_TYPE_TABLE,
};
pub use hierarchy::{Hierarchy, HierarchyNode, NodePath};
pub use table::{Record, RecordTable};
pub use tasks::{activities_from_table, snapshot_from_table, snapshot_from_xer, TASK_TABLE};
pub use wbs::{wbs_paths, WbsFilter, WBS_TABLE};
pub use xer::{XerDocument, DATA_DATE_COLUMN, PROJECT_TABLE};
