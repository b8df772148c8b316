//! Activity code assignments.
//!
//! Resolves which activity code of a given code type each task carries,
//! together with the code's dotted path in the code hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Hierarchy, HierarchyNode, XerDocument};
use crate::error::{EdmError, Result};

/// Activity code types.
pub const CODE_TYPE_TABLE: &str = "ACTVTYPE";
/// Activity code values.
pub const CODE_TABLE: &str = "ACTVCODE";
/// Task ↔ code assignments.
pub const ASSIGNMENT_TABLE: &str = "TASKACTV";

const TYPE_ID: &str = "actv_code_type_id";
const TYPE_NAME: &str = "actv_code_type";
const CODE_ID: &str = "actv_code_id";
const CODE_NAME: &str = "actv_code_name";
const SHORT_NAME: &str = "short_name";
const PARENT_CODE_ID: &str = "parent_actv_code_id";
const TASK_ID: &str = "task_id";

/// One task's assignment to a code value.
///
/// Code details are `None` when the assigned code is missing from the
/// code table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAssignment {
    pub task_id: String,
    pub code_id: String,
    pub code_name: Option<String>,
    pub short_name: Option<String>,
    /// Dotted short names from the top-level code down.
    pub path: Option<String>,
}

struct CodeValue {
    name: String,
    short_name: String,
    path: Option<String>,
}

/// Assignments of the code type named `code_type_name`, in assignment order.
///
/// # Errors
/// - `MissingTable` / `Schema` if the code tables or their columns are absent.
/// - `UnknownCodeType` if no code type has that name.
pub fn activity_code_assignments(
    doc: &XerDocument,
    code_type_name: &str,
) -> Result<Vec<CodeAssignment>> {
    let types = doc.require_table(CODE_TYPE_TABLE)?;
    types.require_columns([TYPE_ID, TYPE_NAME])?;
    let type_id = types
        .records()
        .find(|r| r.text(TYPE_NAME) == code_type_name)
        .map(|r| r.text(TYPE_ID))
        .ok_or_else(|| EdmError::UnknownCodeType {
            name: code_type_name.to_string(),
        })?;

    let codes = doc.require_table(CODE_TABLE)?;
    codes.require_columns([TYPE_ID, CODE_ID, CODE_NAME, SHORT_NAME, PARENT_CODE_ID])?;
    let of_type: Vec<_> = codes.records().filter(|r| r.text(TYPE_ID) == type_id).collect();

    let hierarchy = Hierarchy::new(
        of_type
            .iter()
            .map(|r| {
                HierarchyNode::new(r.text(CODE_ID), r.non_empty(PARENT_CODE_ID), r.text(SHORT_NAME))
            })
            .collect(),
    );

    let mut paths: HashMap<String, String> = HashMap::new();
    for root in hierarchy.roots() {
        paths.insert(root.id.clone(), root.label.clone());
        for node in hierarchy.paths_from(&root.id, &root.label) {
            paths.insert(node.id, node.path);
        }
    }

    let values: HashMap<&str, CodeValue> = of_type
        .iter()
        .map(|r| {
            let id = r.text(CODE_ID);
            let value = CodeValue {
                name: r.text(CODE_NAME).to_string(),
                short_name: r.text(SHORT_NAME).to_string(),
                path: paths.get(id).cloned(),
            };
            (id, value)
        })
        .collect();

    let assignments = doc.require_table(ASSIGNMENT_TABLE)?;
    assignments.require_columns([TASK_ID, TYPE_ID, CODE_ID])?;
    let out: Vec<CodeAssignment> = assignments
        .records()
        .filter(|r| r.text(TYPE_ID) == type_id)
        .map(|r| {
            let code_id = r.text(CODE_ID);
            let value = values.get(code_id);
            CodeAssignment {
                task_id: r.text(TASK_ID).to_string(),
                code_id: code_id.to_string(),
                code_name: value.map(|v| v.name.clone()),
                short_name: value.map(|v| v.short_name.clone()),
                path: value.and_then(|v| v.path.clone()),
            }
        })
        .collect();

    log::debug!("{code_type_name}: {} code assignments", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RecordTable;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|c| c.to_string()).collect()
    }

    fn doc() -> XerDocument {
        let types = RecordTable::new(CODE_TYPE_TABLE, cols(&[TYPE_ID, TYPE_NAME]))
            .with_row(&[(TYPE_ID, "1"), (TYPE_NAME, "Area")])
            .with_row(&[(TYPE_ID, "2"), (TYPE_NAME, "Phase")]);
        let codes = RecordTable::new(
            CODE_TABLE,
            cols(&[CODE_ID, TYPE_ID, CODE_NAME, SHORT_NAME, PARENT_CODE_ID]),
        )
        .with_row(&[(CODE_ID, "100"), (TYPE_ID, "1"), (CODE_NAME, "North"), (SHORT_NAME, "N")])
        .with_row(&[
            (CODE_ID, "101"),
            (TYPE_ID, "1"),
            (CODE_NAME, "North Yard"),
            (SHORT_NAME, "NY"),
            (PARENT_CODE_ID, "100"),
        ])
        .with_row(&[(CODE_ID, "200"), (TYPE_ID, "2"), (CODE_NAME, "Design"), (SHORT_NAME, "D")]);
        let assignments = RecordTable::new(ASSIGNMENT_TABLE, cols(&[TASK_ID, TYPE_ID, CODE_ID]))
            .with_row(&[(TASK_ID, "10"), (TYPE_ID, "1"), (CODE_ID, "101")])
            .with_row(&[(TASK_ID, "11"), (TYPE_ID, "1"), (CODE_ID, "100")])
            .with_row(&[(TASK_ID, "12"), (TYPE_ID, "2"), (CODE_ID, "200")])
            .with_row(&[(TASK_ID, "13"), (TYPE_ID, "1"), (CODE_ID, "999")]);
        XerDocument::default()
            .with_table(types)
            .with_table(codes)
            .with_table(assignments)
    }

    #[test]
    fn test_assignments_with_paths() {
        let rows = activity_code_assignments(&doc(), "Area").unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].task_id, "10");
        assert_eq!(rows[0].code_name.as_deref(), Some("North Yard"));
        assert_eq!(rows[0].path.as_deref(), Some("N.NY"));

        assert_eq!(rows[1].path.as_deref(), Some("N"));
        assert_eq!(rows[1].short_name.as_deref(), Some("N"));
    }

    #[test]
    fn test_dangling_code_has_no_details() {
        let rows = activity_code_assignments(&doc(), "Area").unwrap();
        let dangling = &rows[2];
        assert_eq!(dangling.code_id, "999");
        assert_eq!(dangling.code_name, None);
        assert_eq!(dangling.path, None);
    }

    #[test]
    fn test_unknown_code_type() {
        let err = activity_code_assignments(&doc(), "Discipline").unwrap_err();
        assert!(matches!(err, EdmError::UnknownCodeType { ref name } if name == "Discipline"));
    }

    #[test]
    fn test_missing_table() {
        let err = activity_code_assignments(&XerDocument::default(), "Area").unwrap_err();
        assert!(matches!(err, EdmError::MissingTable { .. }));
    }
}
