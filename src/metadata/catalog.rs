//! Catalog backend abstraction
//!
//! The connection layer and SQL dialect drivers live outside this crate;
//! this trait is the contract the metadata provider consumes. Execution is
//! synchronous: one request, one thread, no suspension.

use super::cache::ConnectionLayer;
use crate::models::{DataSourceRef, MetaNode, QualifiedTableRef};
use crate::tree::types::{GenericTypeMapper, TypeMapper};

/// Error type for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Data source not found: {0}")]
    DataSourceNotFound(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Trait for catalog backends.
///
/// Implementations wrap a live connection to a database catalog and return
/// raw schema metadata nodes plus the dialect's type mapper.
pub trait CatalogBackend: Send + Sync {
    /// Fetch the root schema node for a data source, layer-qualified.
    fn fetch_root(
        &self,
        data_source: &DataSourceRef,
        connection: &ConnectionLayer,
    ) -> Result<MetaNode, CatalogError>;

    /// Fetch the subtree (columns, keys) for one table.
    fn fetch_table(&self, table: &QualifiedTableRef) -> Result<MetaNode, CatalogError>;

    /// Type-code-to-abstract-type mapper for the data source's dialect.
    fn type_mapper(&self, _data_source: &DataSourceRef) -> Box<dyn TypeMapper> {
        Box::new(GenericTypeMapper)
    }
}
