//! Hierarchy path builder.
//!
//! Works on self-referential tables (WBS, activity codes) where each node
//! names its parent. The parent → children index is built once; walks use
//! an explicit stack so deep hierarchies cannot overflow the call stack.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (Depth-first search)

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::RecordTable;
use crate::error::Result;

/// One node of a hierarchy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub id: String,
    /// `None` for top-level nodes.
    pub parent_id: Option<String>,
    /// Path segment contributed by this node.
    pub label: String,
}

impl HierarchyNode {
    pub fn new(id: impl Into<String>, parent_id: Option<&str>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.filter(|p| !p.is_empty()).map(str::to_string),
            label: label.into(),
        }
    }
}

/// A node's dotted path from some root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePath {
    pub id: String,
    pub path: String,
}

/// A parent-indexed hierarchy.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    index: HashMap<String, usize>,
    children: HashMap<String, Vec<usize>>,
}

impl Hierarchy {
    /// Indexes `nodes`. Children keep input order.
    pub fn new(nodes: Vec<HierarchyNode>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            index.insert(node.id.clone(), i);
            if let Some(parent) = &node.parent_id {
                children.entry(parent.clone()).or_default().push(i);
            }
        }
        Self {
            nodes,
            index,
            children,
        }
    }

    /// Reads nodes from a table.
    ///
    /// # Errors
    /// `Schema` if any of the three columns is absent.
    pub fn from_table(
        table: &RecordTable,
        id_column: &str,
        parent_column: &str,
        label_column: &str,
    ) -> Result<Self> {
        table.require_columns([id_column, parent_column, label_column])?;
        let nodes = table
            .records()
            .map(|r| {
                HierarchyNode::new(
                    r.text(id_column),
                    r.non_empty(parent_column),
                    r.text(label_column),
                )
            })
            .collect();
        Ok(Self::new(nodes))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node.
    pub fn node(&self, id: &str) -> Option<&HierarchyNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.iter().filter(|n| n.parent_id.is_none())
    }

    /// Direct children of `id`, in input order.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &HierarchyNode> {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(|&i| &self.nodes[i])
    }

    /// Dotted paths of every descendant of `root_id`, in pre-order.
    ///
    /// Each path is `root_label.child.grandchild...`; with an empty
    /// `root_label` paths start at the first child's label. The root
    /// itself is not included.
    pub fn paths_from(&self, root_id: &str, root_label: &str) -> Vec<NodePath> {
        let mut paths = Vec::new();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut stack: Vec<(usize, String)> = Vec::new();

        self.push_children(root_id, root_label, &mut stack);
        while let Some((i, prefix)) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }
            let node = &self.nodes[i];
            let path = join_path(&prefix, &node.label);
            self.push_children(&node.id, &path, &mut stack);
            paths.push(NodePath {
                id: node.id.clone(),
                path,
            });
        }
        paths
    }

    /// Every descendant of `id`, in pre-order.
    pub fn descendants(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut stack: Vec<usize> = Vec::new();
        if let Some(kids) = self.children.get(id) {
            stack.extend(kids.iter().rev());
        }
        while let Some(i) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }
            let node = &self.nodes[i];
            out.push(node.id.as_str());
            if let Some(kids) = self.children.get(&node.id) {
                stack.extend(kids.iter().rev());
            }
        }
        out
    }

    fn push_children(&self, parent_id: &str, prefix: &str, stack: &mut Vec<(usize, String)>) {
        if let Some(kids) = self.children.get(parent_id) {
            // reversed so the first child is popped first
            for &k in kids.iter().rev() {
                stack.push((k, prefix.to_string()));
            }
        }
    }
}

fn join_path(prefix: &str, label: &str) -> String {
    if prefix.is_empty() {
        label.to_string()
    } else {
        format!("{prefix}.{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hierarchy {
        Hierarchy::new(vec![
            HierarchyNode::new("P", None, "PROJ"),
            HierarchyNode::new("1", Some("P"), "ENG"),
            HierarchyNode::new("2", Some("P"), "CON"),
            HierarchyNode::new("11", Some("1"), "CIV"),
            HierarchyNode::new("12", Some("1"), "MEC"),
            HierarchyNode::new("21", Some("2"), "SITE"),
            HierarchyNode::new("111", Some("11"), "DWG"),
        ])
    }

    #[test]
    fn test_paths_preorder() {
        let h = sample();
        let paths: Vec<(String, String)> = h
            .paths_from("P", "PROJ")
            .into_iter()
            .map(|p| (p.id, p.path))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("1".into(), "PROJ.ENG".into()),
                ("11".into(), "PROJ.ENG.CIV".into()),
                ("111".into(), "PROJ.ENG.CIV.DWG".into()),
                ("12".into(), "PROJ.ENG.MEC".into()),
                ("2".into(), "PROJ.CON".into()),
                ("21".into(), "PROJ.CON.SITE".into()),
            ]
        );
    }

    #[test]
    fn test_paths_without_root_label() {
        let h = sample();
        let paths = h.paths_from("P", "");
        assert_eq!(paths[0].path, "ENG");
        assert_eq!(paths[2].path, "ENG.CIV.DWG");
    }

    #[test]
    fn test_descendants() {
        let h = sample();
        assert_eq!(h.descendants("1"), vec!["11", "111", "12"]);
        assert!(h.descendants("111").is_empty());
        assert!(h.descendants("unknown").is_empty());
    }

    #[test]
    fn test_roots_and_children() {
        let h = sample();
        let roots: Vec<&str> = h.roots().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["P"]);
        let kids: Vec<&str> = h.children("1").map(|n| n.label.as_str()).collect();
        assert_eq!(kids, vec!["CIV", "MEC"]);
        assert_eq!(h.node("21").unwrap().label, "SITE");
    }

    #[test]
    fn test_cycle_terminates() {
        let h = Hierarchy::new(vec![
            HierarchyNode::new("A", Some("B"), "a"),
            HierarchyNode::new("B", Some("A"), "b"),
        ]);
        let paths = h.paths_from("A", "");
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_deep_chain() {
        let mut nodes = vec![HierarchyNode::new("0", None, "n0")];
        for i in 1..50_000 {
            let parent = (i - 1).to_string();
            nodes.push(HierarchyNode::new(i.to_string(), Some(&parent), "n"));
        }
        let h = Hierarchy::new(nodes);
        assert_eq!(h.descendants("0").len(), 49_999);
    }

    #[test]
    fn test_empty_parent_is_root() {
        let table = RecordTable::new(
            "PROJWBS",
            vec!["wbs_id".into(), "parent_wbs_id".into(), "wbs_short_name".into()],
        )
        .with_row(&[("wbs_id", "1"), ("parent_wbs_id", ""), ("wbs_short_name", "TOP")])
        .with_row(&[("wbs_id", "2"), ("parent_wbs_id", "1"), ("wbs_short_name", "SUB")]);
        let h = Hierarchy::from_table(&table, "wbs_id", "parent_wbs_id", "wbs_short_name").unwrap();
        assert_eq!(h.roots().count(), 1);
        assert_eq!(h.paths_from("1", "TOP")[0].path, "TOP.SUB");
    }
}
