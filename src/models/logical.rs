//! Logical model tree
//!
//! Logical models remap a physical partition into business-facing entities.
//! They form a tree of named models; a model without an explicit connection
//! inherits one from its ancestors.

use serde::{Deserialize, Serialize};

/// A named logical model over an underlying partition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogicalModel {
    pub name: String,
    /// Name of the parent model, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Explicit connection name; when absent the connection is inherited
    /// from the parent chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    /// Name of the partition this model is defined over.
    pub partition: String,
}

impl LogicalModel {
    pub fn new(name: impl Into<String>, partition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            connection: None,
            partition: partition.into(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Resolve the connection for this model, walking the parent chain in
    /// `all_models` until an explicit connection is found.
    pub fn effective_connection<'a>(&'a self, all_models: &'a [LogicalModel]) -> Option<&'a str> {
        if let Some(conn) = self.connection.as_deref() {
            return Some(conn);
        }
        let mut current = self.parent.as_deref();
        // Parent chains are short; a seen-list guards malformed input.
        let mut seen: Vec<&str> = vec![&self.name];
        while let Some(parent_name) = current {
            if seen.contains(&parent_name) {
                return None;
            }
            seen.push(parent_name);
            let parent = all_models.iter().find(|m| m.name == parent_name)?;
            if let Some(conn) = parent.connection.as_deref() {
                return Some(conn);
            }
            current = parent.parent.as_deref();
        }
        None
    }
}
