use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a [`GoalNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Pending,
    Active,
    Done,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalNode {
    pub id: GoalId,
    pub title: String,
    pub status: GoalStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<GoalNode>,
}

impl GoalNode {
    pub fn leaf(title: impl Into<String>) -> Self {
        Self {
            id: GoalId::random(),
            title: title.into(),
            status: GoalStatus::Pending,
            children: Vec::new(),
        }
    }
}

/// A goal tree planted by strategic decomposition: the root is the original
/// goal, the children the ordered subtasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalTree {
    pub root: GoalNode,
}

impl GoalTree {
    pub fn from_subtasks(goal: &str, subtasks: &[String]) -> Self {
        let mut root = GoalNode::leaf(goal);
        root.status = GoalStatus::Active;
        root.children = subtasks.iter().map(GoalNode::leaf).collect();
        Self { root }
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: GoalId) -> Option<&GoalNode> {
        fn walk(node: &GoalNode, id: GoalId) -> Option<&GoalNode> {
            if node.id == id {
                return Some(node);
            }
            node.children.iter().find_map(|child| walk(child, id))
        }
        walk(&self.root, id)
    }

    /// Update the status of a node by id. Returns false when the id is not in
    /// this tree.
    pub fn set_status(&mut self, id: GoalId, status: GoalStatus) -> bool {
        fn walk(node: &mut GoalNode, id: GoalId, status: GoalStatus) -> bool {
            if node.id == id {
                node.status = status;
                return true;
            }
            node.children
                .iter_mut()
                .any(|child| walk(child, id, status))
        }
        walk(&mut self.root, id, status)
    }
}
