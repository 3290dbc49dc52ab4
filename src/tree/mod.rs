//! Tree materialization
//!
//! Builds the transport-facing [`TreeNode`](crate::models::TreeNode) views:
//! physical table/column browsing, logical-model trees, and query/datasource
//! folder hierarchies from flat path data.

pub mod folders;
pub mod physical;
pub mod types;

pub use folders::{folder_tree, FolderTrie};
pub use physical::{logical_model_tree, schema_tree};
pub use types::{GenericTypeMapper, TypeMapper};
