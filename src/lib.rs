//! Model Graph SDK - physical/logical model graph engine for data-modelling UIs
//!
//! Provides the server-side core behind a visual data-modelling editor:
//! - Schema metadata fetching and caching against a live catalog
//! - The partition graph model (tables, joins, aliases, bounds)
//! - Alias-chain resolution with cycle safety
//! - Per-session editable runtime partitions
//! - Auto-layout for the physical graph
//! - Tree materialization for physical, logical, and folder views
//!
//! HTTP routing, authentication, catalog connections, and UI rendering are
//! external collaborators; this crate only consumes their contracts.

pub mod layout;
pub mod metadata;
pub mod models;
pub mod resolver;
pub mod runtime;
pub mod tree;

// Re-export commonly used types
pub use layout::{LayoutConfig, PhysicalGraphLayout};
pub use metadata::{
    CacheKey, CatalogBackend, CatalogError, ConnectionLayer, InMemoryMetadataCache, MetadataCache,
    MetadataError, MetadataProvider,
};
pub use resolver::{AliasError, AliasResolver};
pub use runtime::{RuntimePartition, RuntimePartitionService, SessionError, SessionId};
pub use tree::{folder_tree, logical_model_tree, schema_tree, GenericTypeMapper, TypeMapper};

// Re-export models
pub use models::{
    AbstractType, Bounds, DataSourceRef, JoinEdge, LogicalModel, MetaNode, MetaNodeKind,
    Partition, PartitionError, PartitionTable, QualifiedTableRef, TableKind, TreeNode,
};
