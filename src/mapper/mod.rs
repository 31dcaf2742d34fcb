//! Type-to-column mapping.
//!
//! This is the core of the generator: an arbitrary, possibly wrapped,
//! possibly aliased type expression is reduced to a concrete column
//! specification by recursively consulting the declaration graph and the
//! selected dialect profile.
//!
//! The reduction is split into three layers:
//!
//! 1. `decode` — classify a raw expression into one of three shapes,
//!    independent of surface spelling.
//! 2. `expand` — substitute type parameters through alias/newtype
//!    indirections, one layer at a time.
//! 3. `column` — drive both until a terminal shape is reached, producing
//!    the column type, nullability, and foreign-key target.

mod column;
mod decode;
mod expand;

pub use column::{column_spec, ColumnSpec, ForeignKey};
pub use decode::{decode, Shape};
pub use expand::{expand_reference, substitute, Expansion};

use crate::graph::{GraphError, ScopedName};
use thiserror::Error;

/// Mapping and emission errors. Like graph errors, all are fatal; the whole
/// run is discarded on the first one.
#[derive(Error, Debug)]
pub enum GenError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("unbound type variable '{var}' in a column position")]
    UnboundTypeVariable { var: String },

    #[error("'{name}' expects {expected} type parameter(s), found {found}")]
    WrongArity {
        name: ScopedName,
        expected: usize,
        found: usize,
    },

    #[error("cyclic alias/newtype chain through '{name}'")]
    CyclicDefinition { name: ScopedName },

    #[error("nested nullable wrapper in '{ty}' is not a supported column shape")]
    NestedNullable { ty: String },

    #[error("foreign-key wrapper parameter in '{ty}' must be a plain declaration reference")]
    InvalidKeyParameter { ty: String },

    #[error("table declaration '{name}' must be a struct")]
    TableNotStruct { name: ScopedName },

    #[error("table '{table}' directive names unknown column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("failed to map field '{field}' of '{decl}': {source}")]
    FieldMapping {
        decl: ScopedName,
        field: String,
        source: Box<GenError>,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
