//! Native type-code mapping
//!
//! Dialect drivers report column types as numeric codes; the UI only ever
//! sees the canonical abstract types. Unknown or missing codes fall back to
//! `STRING`.

use crate::models::AbstractType;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maps a dialect's native type codes into abstract types.
pub trait TypeMapper: Send + Sync {
    fn map(&self, native: Option<i32>) -> AbstractType;
}

/// JDBC-style type codes shared by most dialects.
static GENERIC_TYPE_CODES: Lazy<HashMap<i32, AbstractType>> = Lazy::new(|| {
    HashMap::from([
        (1, AbstractType::String),    // CHAR
        (12, AbstractType::String),   // VARCHAR
        (-1, AbstractType::String),   // LONGVARCHAR
        (-9, AbstractType::String),   // NVARCHAR
        (-15, AbstractType::String),  // NCHAR
        (-16, AbstractType::String),  // LONGNVARCHAR
        (2005, AbstractType::String), // CLOB
        (2, AbstractType::Number),    // NUMERIC
        (3, AbstractType::Number),    // DECIMAL
        (6, AbstractType::Number),    // FLOAT
        (7, AbstractType::Number),    // REAL
        (8, AbstractType::Number),    // DOUBLE
        (4, AbstractType::Integer),   // INTEGER
        (5, AbstractType::Integer),   // SMALLINT
        (-5, AbstractType::Integer),  // BIGINT
        (-6, AbstractType::Integer),  // TINYINT
        (91, AbstractType::Date),
        (92, AbstractType::Time),
        (93, AbstractType::Timestamp),
        (16, AbstractType::Boolean),
        (-7, AbstractType::Boolean), // BIT
        (-2, AbstractType::Binary),
        (-3, AbstractType::Binary),  // VARBINARY
        (-4, AbstractType::Binary),  // LONGVARBINARY
        (2004, AbstractType::Binary), // BLOB
    ])
});

/// Default mapper used when a dialect supplies nothing more specific.
pub struct GenericTypeMapper;

impl TypeMapper for GenericTypeMapper {
    fn map(&self, native: Option<i32>) -> AbstractType {
        native
            .and_then(|code| GENERIC_TYPE_CODES.get(&code).copied())
            .unwrap_or(AbstractType::String)
    }
}
