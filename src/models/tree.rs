//! Transport-facing tree node
//!
//! The sole externally visible shape produced by the tree builders. The UI
//! layer renders these directly; nothing else about the internal models is
//! exposed.

use serde::{Deserialize, Serialize};

/// Generic tree node for UI consumption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    pub label: String,
    /// Opaque payload for the UI (e.g. a queryable resource reference).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    pub leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub expanded: bool,
}

impl TreeNode {
    pub fn branch(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: None,
            children: Vec::new(),
            leaf: false,
            icon: None,
            expanded: false,
        }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: None,
            children: Vec::new(),
            leaf: true,
            icon: None,
            expanded: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_node_serialization() {
        let node = TreeNode::branch("tables")
            .with_icon("folder")
            .with_children(vec![TreeNode::leaf("orders")]);
        let json = serde_json::to_string(&node).unwrap();
        let parsed: TreeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, parsed);
        assert!(!node.leaf);
        assert!(node.children[0].leaf);
    }
}
