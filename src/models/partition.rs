//! Partition model: tables, joins, aliases and layout geometry

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Node geometry on the graph pane.
///
/// A freshly added table that has not been through layout carries the
/// unplaced sentinel `{-1, -1, -1, -1}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Sentinel for tables that have no position yet.
    pub const UNPLACED: Bounds = Bounds {
        x: -1.0,
        y: -1.0,
        width: -1.0,
        height: -1.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_placed(&self) -> bool {
        *self != Self::UNPLACED
    }

    /// Axis-aligned overlap test. Unplaced bounds never overlap anything.
    pub fn intersects(&self, other: &Bounds) -> bool {
        if !self.is_placed() || !other.is_placed() {
            return false;
        }
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNPLACED
    }
}

/// Closed set of physical table kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableKind {
    Table,
    View,
    Alias,
}

/// One node of the physical model graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartitionTable {
    /// Unique within the owning partition.
    pub name: String,
    pub kind: TableKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub bounds: Bounds,
    /// For alias-kind tables: the table this alias was created from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_table: Option<String>,
}

impl PartitionTable {
    pub fn new(name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sql: None,
            catalog: None,
            schema: None,
            bounds: Bounds::UNPLACED,
            source_table: None,
        }
    }
}

/// Join edge between two table columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinEdge {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

impl JoinEdge {
    pub fn new(
        from_table: impl Into<String>,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
        to_column: impl Into<String>,
    ) -> Self {
        Self {
            from_table: from_table.into(),
            from_column: from_column.into(),
            to_table: to_table.into(),
            to_column: to_column.into(),
        }
    }
}

/// Error raised by direct partition mutation.
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    #[error("Table already exists in partition: {0}")]
    DuplicateTable(String),
    #[error("Table not found in partition: {0}")]
    TableNotFound(String),
}

/// A physical data model: an ordered set of tables, the join edges between
/// them, and the alias map.
///
/// Invariant: every alias resolves, through zero or more hops of the alias
/// map, to a non-alias table; the alias map contains no cycle. The invariant
/// is maintained by [`crate::resolver::AliasResolver`], which is the only
/// writer of the alias map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partition {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<PartitionTable>,
    #[serde(default)]
    pub joins: Vec<JoinEdge>,
    /// alias name -> source table name
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl Partition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            joins: Vec::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name == name)
    }

    pub fn table(&self, name: &str) -> Option<&PartitionTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut PartitionTable> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    /// Insert a table, rejecting duplicate names.
    ///
    /// Omitted bounds default to [`Bounds::UNPLACED`].
    pub fn add_table(&mut self, table: PartitionTable) -> Result<(), PartitionError> {
        if self.contains_table(&table.name) {
            return Err(PartitionError::DuplicateTable(table.name));
        }
        self.tables.push(table);
        Ok(())
    }

    pub fn add_join(&mut self, join: JoinEdge) -> Result<(), PartitionError> {
        if !self.contains_table(&join.from_table) {
            return Err(PartitionError::TableNotFound(join.from_table));
        }
        if !self.contains_table(&join.to_table) {
            return Err(PartitionError::TableNotFound(join.to_table));
        }
        self.joins.push(join);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unplaced_sentinel() {
        let b = Bounds::default();
        assert!(!b.is_placed());
        assert_eq!(b, Bounds::UNPLACED);
        assert!(Bounds::new(0.0, 0.0, 10.0, 10.0).is_placed());
    }

    #[test]
    fn test_intersects() {
        let a = Bounds::new(0.0, 0.0, 100.0, 50.0);
        let b = Bounds::new(50.0, 25.0, 100.0, 50.0);
        let c = Bounds::new(200.0, 0.0, 100.0, 50.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&Bounds::UNPLACED));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut p = Partition::new("sales");
        p.add_table(PartitionTable::new("orders", TableKind::Table))
            .unwrap();
        let err = p
            .add_table(PartitionTable::new("orders", TableKind::Table))
            .unwrap_err();
        assert!(err.to_string().contains("orders"));
    }

    #[test]
    fn test_join_requires_both_endpoints() {
        let mut p = Partition::new("sales");
        p.add_table(PartitionTable::new("orders", TableKind::Table))
            .unwrap();
        let err = p
            .add_join(JoinEdge::new("orders", "customer_id", "customers", "id"))
            .unwrap_err();
        assert!(matches!(err, PartitionError::TableNotFound(_)));
    }
}
