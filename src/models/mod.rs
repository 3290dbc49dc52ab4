//! Models module for the SDK
//!
//! Defines the core data structures: the partition graph (tables, joins,
//! aliases, bounds), logical models, raw catalog metadata, and the
//! transport-facing tree node.

pub mod logical;
pub mod meta;
pub mod partition;
pub mod tree;

pub use logical::LogicalModel;
pub use meta::{AbstractType, DataSourceRef, MetaNode, MetaNodeKind, QualifiedTableRef};
pub use partition::{Bounds, JoinEdge, Partition, PartitionError, PartitionTable, TableKind};
pub use tree::TreeNode;
