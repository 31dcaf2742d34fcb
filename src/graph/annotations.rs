//! Typed annotation payloads.
//!
//! Annotations arrive as structured values attached to declarations and
//! fields. They are parsed once, at the loading boundary, into these structs
//! so the core never does ad hoc dynamic key lookups.

use serde::{Deserialize, Serialize};

/// Marks a declaration as table-mapped and carries the table-level directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableAnnotation {
    /// Explicit table name; overrides the snake_case conversion of the
    /// declaration name.
    pub table_name: Option<String>,
    /// Request a synthetic `id` primary-key column. Takes precedence over
    /// `with_primary_key` when both are present.
    pub with_id_primary_key: bool,
    /// Explicit primary-key column list, in the given order.
    pub with_primary_key: Vec<String>,
    /// Column groups to index, one `create index` each.
    pub indexes: Vec<Vec<String>>,
    /// Column groups to constrain unique, one `alter table ... unique` each.
    pub uniqueness_constraints: Vec<Vec<String>>,
    /// Raw SQL appended verbatim after all generated statements.
    pub extra_sql: Vec<String>,
}

/// Field-level column rename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAnnotation {
    /// Explicit column name; overrides the snake_case conversion of the
    /// field name.
    pub column_name: Option<String>,
}
