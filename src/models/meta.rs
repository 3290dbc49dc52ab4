//! Catalog metadata models
//!
//! Raw schema metadata as fetched from the catalog collaborator, plus the
//! canonical abstract type set all dialect-specific type codes map into.

use serde::{Deserialize, Serialize};

/// Connection identity for a catalog data source. Owned externally and
/// referenced here by name only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DataSourceRef {
    pub name: String,
    /// Dialect identifier (e.g. "postgres", "oracle"); selects the type mapper.
    pub dialect: String,
}

impl DataSourceRef {
    pub fn new(name: impl Into<String>, dialect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dialect: dialect.into(),
        }
    }
}

/// Fully qualified reference to one catalog table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct QualifiedTableRef {
    pub data_source: DataSourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub table: String,
}

/// Closed set of metadata node kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MetaNodeKind {
    Root,
    Schema,
    Table,
    View,
    Column,
}

/// Generic schema-metadata node produced by the metadata provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetaNode {
    pub name: String,
    pub kind: MetaNodeKind,
    #[serde(default)]
    pub children: Vec<MetaNode>,
    /// True for columns that are part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Names of columns this column references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<String>,
    /// Native type code from the catalog; `None` when the driver reports none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_type: Option<i32>,
}

impl MetaNode {
    pub fn new(name: impl Into<String>, kind: MetaNodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
            primary_key: false,
            length: None,
            foreign_keys: Vec::new(),
            sql_type: None,
        }
    }

    pub fn with_children(mut self, children: Vec<MetaNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_sql_type(mut self, sql_type: i32) -> Self {
        self.sql_type = Some(sql_type);
        self
    }
}

/// Canonical set of logical column types.
///
/// Every dialect-specific native type code maps into one of these; codes no
/// mapper recognises fall back to [`AbstractType::String`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AbstractType {
    String,
    Number,
    Integer,
    Date,
    Time,
    Timestamp,
    Boolean,
    Binary,
}

impl AbstractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbstractType::String => "STRING",
            AbstractType::Number => "NUMBER",
            AbstractType::Integer => "INTEGER",
            AbstractType::Date => "DATE",
            AbstractType::Time => "TIME",
            AbstractType::Timestamp => "TIMESTAMP",
            AbstractType::Boolean => "BOOLEAN",
            AbstractType::Binary => "BINARY",
        }
    }
}
