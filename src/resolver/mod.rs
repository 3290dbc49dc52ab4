//! Alias resolution and alias mutation
//!
//! Alias chains form a directed graph over the alias map. Resolution walks
//! that graph with a visited set and reports cycles as a typed error instead
//! of relying on iteration bounds. All mutations are all-or-nothing: every
//! check runs before the first write, so a failed call leaves the partition
//! exactly as it was.

use crate::models::{Bounds, Partition, PartitionTable, TableKind};
use std::collections::HashSet;
use tracing::debug;

/// Horizontal gap used when placing a new alias next to its source.
const PLACEMENT_GAP: f64 = 40.0;

/// Error during alias resolution or mutation.
#[derive(Debug, thiserror::Error)]
pub enum AliasError {
    #[error("Table not found in partition: {0}")]
    TableNotFound(String),
    #[error("Alias references a table absent from the partition: {0}")]
    InvalidReference(String),
    #[error("Cyclic alias chain detected at: {0}")]
    CyclicAlias(String),
    #[error("Name already in use: {0}")]
    DuplicateName(String),
}

/// Alias creation, rename, and chain resolution over a partition.
pub struct AliasResolver;

impl AliasResolver {
    pub fn new() -> Self {
        Self
    }

    /// Follow the alias map from `table` until a non-alias table is reached.
    ///
    /// Terminates in at most `n` hops for an acyclic map of depth `n`;
    /// revisiting a name raises [`AliasError::CyclicAlias`].
    pub fn resolve_source(&self, partition: &Partition, table: &str) -> Result<String, AliasError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = table;
        loop {
            if !visited.insert(current) {
                return Err(AliasError::CyclicAlias(current.to_string()));
            }
            match partition.aliases.get(current) {
                Some(next) => current = next,
                None => {
                    if partition.contains_table(current) {
                        return Ok(current.to_string());
                    }
                    // The starting name being unknown is the caller's error;
                    // a dangling hop mid-chain is a broken alias map.
                    return if current == table {
                        Err(AliasError::TableNotFound(current.to_string()))
                    } else {
                        Err(AliasError::InvalidReference(current.to_string()))
                    };
                }
            }
        }
    }

    /// Create `new_alias` as an alias of `table`'s ultimate source.
    ///
    /// A view-kind source is materialized as a new view carrying the same
    /// `sql`/`catalog`/`schema`; a plain table copies `catalog`/`schema`
    /// only. The new node inherits the source's dimensions and is placed so
    /// it overlaps no existing node.
    pub fn create_alias(
        &self,
        partition: &mut Partition,
        table: &str,
        new_alias: &str,
    ) -> Result<(), AliasError> {
        if partition.contains_table(new_alias) || partition.aliases.contains_key(new_alias) {
            return Err(AliasError::DuplicateName(new_alias.to_string()));
        }
        let source_name = self.resolve_source(partition, table)?;
        let source = partition
            .table(&source_name)
            .cloned()
            .ok_or_else(|| AliasError::InvalidReference(source_name.clone()))?;

        let mut alias_table = match source.kind {
            TableKind::View => PartitionTable {
                name: new_alias.to_string(),
                kind: TableKind::View,
                sql: source.sql.clone(),
                catalog: source.catalog.clone(),
                schema: source.schema.clone(),
                bounds: Bounds::UNPLACED,
                source_table: Some(source_name.clone()),
            },
            TableKind::Table => PartitionTable {
                name: new_alias.to_string(),
                kind: TableKind::Alias,
                sql: None,
                catalog: source.catalog.clone(),
                schema: source.schema.clone(),
                bounds: Bounds::UNPLACED,
                source_table: Some(source_name.clone()),
            },
            // resolve_source never terminates on an alias; kept for
            // exhaustiveness and producing an unplaced bare table.
            TableKind::Alias => {
                let mut t = PartitionTable::new(new_alias, TableKind::Alias);
                t.source_table = Some(source_name.clone());
                t
            }
        };
        alias_table.bounds = place_next_to(partition, &source.bounds);

        // No fallible step remains; mutate in one go.
        partition.tables.push(alias_table);
        partition
            .aliases
            .insert(new_alias.to_string(), source_name.clone());
        debug!(alias = new_alias, source = %source_name, "alias created");
        Ok(())
    }

    /// Rename the alias `old_name` to `new_name`.
    ///
    /// Updates the alias map entry, renames the table, and repoints every
    /// join endpoint and alias-map value referencing `old_name`. After this
    /// call no join references a name absent from the table set.
    pub fn edit_alias(
        &self,
        partition: &mut Partition,
        new_name: &str,
        old_name: &str,
    ) -> Result<(), AliasError> {
        if !partition.aliases.contains_key(old_name) {
            return Err(AliasError::TableNotFound(old_name.to_string()));
        }
        if !partition.contains_table(old_name) {
            return Err(AliasError::InvalidReference(old_name.to_string()));
        }
        if partition.contains_table(new_name) || partition.aliases.contains_key(new_name) {
            return Err(AliasError::DuplicateName(new_name.to_string()));
        }

        let source = match partition.aliases.remove(old_name) {
            Some(source) => source,
            None => return Err(AliasError::TableNotFound(old_name.to_string())),
        };
        partition.aliases.insert(new_name.to_string(), source);
        // Aliases of the renamed alias must keep resolving.
        for target in partition.aliases.values_mut() {
            if target == old_name {
                *target = new_name.to_string();
            }
        }
        if let Some(table) = partition.table_mut(old_name) {
            table.name = new_name.to_string();
        }
        for table in &mut partition.tables {
            if table.source_table.as_deref() == Some(old_name) {
                table.source_table = Some(new_name.to_string());
            }
        }
        for join in &mut partition.joins {
            if join.from_table == old_name {
                join.from_table = new_name.to_string();
            }
            if join.to_table == old_name {
                join.to_table = new_name.to_string();
            }
        }
        debug!(old = old_name, new = new_name, "alias renamed");
        Ok(())
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic non-overlapping placement beside `anchor`.
///
/// Keeps the anchor's dimensions; on collision the candidate advances past
/// the right edge of the widest intersecting table, so arbitrarily wide
/// neighbors are cleared. An unplaced anchor yields an unplaced result.
fn place_next_to(partition: &Partition, anchor: &Bounds) -> Bounds {
    if !anchor.is_placed() {
        return Bounds::UNPLACED;
    }
    let mut candidate = Bounds::new(
        anchor.x + anchor.width + PLACEMENT_GAP,
        anchor.y,
        anchor.width,
        anchor.height,
    );
    // The candidate only moves rightwards, past at least one table per pass,
    // so a free slot is reached within tables.len() + 1 passes.
    for _ in 0..=partition.tables.len() {
        let right_edge = partition
            .tables
            .iter()
            .filter(|t| t.bounds.intersects(&candidate))
            .map(|t| t.bounds.x + t.bounds.width)
            .fold(None, |acc: Option<f64>, edge| {
                Some(acc.map_or(edge, |e| e.max(edge)))
            });
        match right_edge {
            None => return candidate,
            Some(edge) => candidate.x = edge + PLACEMENT_GAP,
        }
    }
    candidate
}
