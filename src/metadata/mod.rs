//! Metadata provider
//!
//! Fetches schema metadata (tables, columns, keys) from a catalog backend and
//! caches it process-wide, keyed by `(data source, partition key, connection)`.
//! Reads may be served stale between a schema change and an explicit refresh;
//! the model is eventual consistency, not linearizability.

pub mod cache;
pub mod catalog;

pub use cache::{CacheKey, ConnectionLayer, InMemoryMetadataCache, MetadataCache};
pub use catalog::{CatalogBackend, CatalogError};

use crate::models::{DataSourceRef, LogicalModel, MetaNode, QualifiedTableRef};
use std::sync::Arc;
use tracing::{debug, info};

/// Error type for metadata lookups.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Metadata unavailable: {0}")]
    Unavailable(String),
}

impl From<CatalogError> for MetadataError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DataSourceNotFound(name) => {
                MetadataError::NotFound(format!("data source {}", name))
            }
            CatalogError::TableNotFound(name) => MetadataError::NotFound(format!("table {}", name)),
            CatalogError::Unavailable(msg) => MetadataError::Unavailable(msg),
        }
    }
}

/// Schema metadata provider with cache-through reads.
pub struct MetadataProvider<B: CatalogBackend> {
    backend: B,
    cache: Arc<dyn MetadataCache>,
}

impl<B: CatalogBackend> MetadataProvider<B> {
    pub fn new(backend: B, cache: Arc<dyn MetadataCache>) -> Self {
        Self { backend, cache }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Root schema node for a data source, layer-qualified.
    ///
    /// Served from cache when present; fetched from the catalog otherwise.
    pub fn root_metadata(
        &self,
        data_source: &DataSourceRef,
        connection: &ConnectionLayer,
    ) -> Result<MetaNode, MetadataError> {
        let key = CacheKey::new(&data_source.name, &data_source.name, connection.clone());
        if let Some(node) = self.cache.get(&key) {
            debug!(key = %key, "root metadata cache hit");
            return Ok(node);
        }
        info!(key = %key, "fetching root metadata from catalog");
        let node = self.backend.fetch_root(data_source, connection)?;
        self.cache.put(key, node.clone());
        Ok(node)
    }

    /// Subtree (columns, keys) for one table.
    ///
    /// With `use_cache` false the catalog is always consulted and the cache
    /// entry overwritten with the fresh result.
    pub fn table_metadata(
        &self,
        table: &QualifiedTableRef,
        use_cache: bool,
    ) -> Result<MetaNode, MetadataError> {
        let key = CacheKey::new(
            &table.data_source.name,
            qualified_table_key(table),
            ConnectionLayer::Base,
        );
        if use_cache {
            if let Some(node) = self.cache.get(&key) {
                debug!(key = %key, "table metadata cache hit");
                return Ok(node);
            }
        }
        info!(key = %key, "fetching table metadata from catalog");
        let node = self.backend.fetch_table(table)?;
        self.cache.put(key, node.clone());
        Ok(node)
    }

    /// Invalidate the cache entry for `(partition_key, connection)`.
    ///
    /// Only a forced refresh drops the entry; subsequent lookups then refetch
    /// from the catalog exactly once.
    pub fn refresh_metadata(
        &self,
        data_source: &DataSourceRef,
        partition_key: &str,
        force: bool,
        connection: &ConnectionLayer,
    ) {
        let key = CacheKey::new(&data_source.name, partition_key, connection.clone());
        if force {
            info!(key = %key, "invalidating metadata cache entry");
            self.cache.invalidate(&key);
        } else {
            debug!(key = %key, "refresh without force, cache entry kept");
        }
    }

    /// Compose the cache key for a logical model over `partition_key`.
    ///
    /// A model whose parent chain supplies no explicit connection maps to the
    /// default-connection variant when one exists, and to the base key
    /// otherwise; an explicit connection names the entry.
    pub fn cache_key_for_model(
        &self,
        data_source: &DataSourceRef,
        partition_key: &str,
        model: &LogicalModel,
        all_models: &[LogicalModel],
        has_default_variant: bool,
    ) -> CacheKey {
        let connection = match model.effective_connection(all_models) {
            Some(name) => ConnectionLayer::Named(name.to_string()),
            None if has_default_variant => ConnectionLayer::DefaultConnection,
            None => ConnectionLayer::Base,
        };
        CacheKey::new(&data_source.name, partition_key, connection)
    }
}

/// Partition-style key for one table: `catalog.schema.table`, omitting
/// absent qualifiers.
fn qualified_table_key(table: &QualifiedTableRef) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(catalog) = table.catalog.as_deref() {
        parts.push(catalog);
    }
    if let Some(schema) = table.schema.as_deref() {
        parts.push(schema);
    }
    parts.push(&table.table);
    parts.join(".")
}
