//! Runtime partition sessions
//!
//! One editable partition per active edit session. The service owns every
//! live session; it performs no internal locking, so the hosting layer must
//! serialize mutations per session id. Expiry is an explicit sweep, never an
//! internal timer.

use crate::models::Partition;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Error type for session lookups.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// An in-memory, per-session editable copy of a partition plus view geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuntimePartition {
    pub id: SessionId,
    pub partition: Partition,
    pub graph_width: f64,
    pub graph_height: f64,
    pub created_at: DateTime<Utc>,
    pub last_touched: DateTime<Utc>,
}

impl RuntimePartition {
    fn new(id: SessionId, partition: Partition) -> Self {
        let now = Utc::now();
        Self {
            id,
            partition,
            graph_width: 0.0,
            graph_height: 0.0,
            created_at: now,
            last_touched: now,
        }
    }
}

/// Owner of all live runtime partitions, keyed by session id.
#[derive(Debug, Default)]
pub struct RuntimePartitionService {
    sessions: HashMap<SessionId, RuntimePartition>,
}

impl RuntimePartitionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an edit session over `partition`, minting a fresh session id.
    pub fn open_session(&mut self, partition: Partition) -> SessionId {
        let id = SessionId::new();
        info!(session = %id, partition = %partition.name, "opening runtime partition");
        self.sessions.insert(id, RuntimePartition::new(id, partition));
        id
    }

    /// Lookup only; never creates a session.
    pub fn runtime_partition(&self, id: &SessionId) -> Option<&RuntimePartition> {
        self.sessions.get(id)
    }

    pub fn runtime_partition_mut(&mut self, id: &SessionId) -> Option<&mut RuntimePartition> {
        self.sessions.get_mut(id)
    }

    /// Convenience unwrap of the session's partition.
    pub fn partition(&self, id: &SessionId) -> Result<&Partition, SessionError> {
        self.sessions
            .get(id)
            .map(|rp| &rp.partition)
            .ok_or(SessionError::NotFound(*id))
    }

    pub fn partition_mut(&mut self, id: &SessionId) -> Result<&mut Partition, SessionError> {
        self.sessions
            .get_mut(id)
            .map(|rp| &mut rp.partition)
            .ok_or(SessionError::NotFound(*id))
    }

    /// Record the graph pane size for a session.
    ///
    /// A missing session usually reflects a UI race, not a caller bug, so
    /// this degrades to a logged no-op.
    pub fn update_graph_pane_size(&mut self, id: &SessionId, width: f64, height: f64) {
        match self.sessions.get_mut(id) {
            Some(rp) => {
                rp.graph_width = width;
                rp.graph_height = height;
                rp.last_touched = Utc::now();
            }
            None => {
                warn!(session = %id, "pane resize for unknown session ignored");
            }
        }
    }

    /// Set one table's node width.
    ///
    /// Returns whether a change occurred; an absent session or table yields
    /// `false` rather than an error.
    pub fn update_graph_node_width(&mut self, id: &SessionId, table: &str, width: f64) -> bool {
        let Some(rp) = self.sessions.get_mut(id) else {
            warn!(session = %id, "node width update for unknown session ignored");
            return false;
        };
        let Some(node) = rp.partition.table_mut(table) else {
            debug!(session = %id, table, "node width update for unknown table ignored");
            return false;
        };
        if node.bounds.width == width {
            return false;
        }
        node.bounds.width = width;
        rp.last_touched = Utc::now();
        true
    }

    /// Close a session, returning its runtime partition to the caller.
    pub fn close_session(&mut self, id: &SessionId) -> Option<RuntimePartition> {
        let closed = self.sessions.remove(id);
        if closed.is_some() {
            info!(session = %id, "runtime partition closed");
        }
        closed
    }

    /// Drop every session untouched for longer than `max_idle`.
    ///
    /// Called on an external schedule; returns the number of sessions reaped.
    pub fn reap_expired(&mut self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.sessions.len();
        self.sessions.retain(|id, rp| {
            let keep = rp.last_touched >= cutoff;
            if !keep {
                info!(session = %id, "reaping expired runtime partition");
            }
            keep
        });
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
