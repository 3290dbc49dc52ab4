//! Metadata cache abstraction
//!
//! The cache is process-wide and shared across sessions. Keys are explicit
//! composite values rather than concatenated strings, so logical models that
//! share a physical partition but differ only in connection never collide.

use crate::models::MetaNode;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// Connection qualifier of a cache entry.
///
/// `DefaultConnection` marks the variant used when a logical model's parent
/// supplies no explicit connection but a default-connection partition variant
/// exists; `Named` carries an explicit connection name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConnectionLayer {
    Base,
    DefaultConnection,
    Named(String),
}

impl fmt::Display for ConnectionLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionLayer::Base => Ok(()),
            ConnectionLayer::DefaultConnection => write!(f, ":(Default Connection)"),
            ConnectionLayer::Named(name) => write!(f, ":{}", name),
        }
    }
}

/// Composite cache key: `(data source, partition key, connection layer)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub data_source: String,
    pub partition: String,
    pub connection: ConnectionLayer,
}

impl CacheKey {
    pub fn new(
        data_source: impl Into<String>,
        partition: impl Into<String>,
        connection: ConnectionLayer,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            partition: partition.into(),
            connection,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}{}", self.data_source, self.partition, self.connection)
    }
}

/// Injected cache abstraction used by the metadata provider.
///
/// Concurrent reads are safe; an invalidation racing an in-flight read may
/// still serve the pre-refresh value once. That is accepted.
pub trait MetadataCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<MetaNode>;
    fn put(&self, key: CacheKey, node: MetaNode);
    fn invalidate(&self, key: &CacheKey);
}

/// In-memory cache backed by a `RwLock`ed map.
#[derive(Default)]
pub struct InMemoryMetadataCache {
    entries: RwLock<HashMap<CacheKey, MetaNode>>,
}

impl InMemoryMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataCache for InMemoryMetadataCache {
    fn get(&self, key: &CacheKey) -> Option<MetaNode> {
        self.entries
            .read()
            .expect("cache lock poisoned")
            .get(key)
            .cloned()
    }

    fn put(&self, key: CacheKey, node: MetaNode) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key, node);
    }

    fn invalidate(&self, key: &CacheKey) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
    }
}
