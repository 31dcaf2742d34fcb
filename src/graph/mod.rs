//! Declaration graph: data model, loading, and name resolution.
//!
//! The graph is loaded once per invocation and immutable afterwards. All
//! downstream work (decoding, column mapping, emission) reads it through
//! the `DeclGraph` resolver and never mutates it.

mod annotations;
mod decl;
mod loader;
mod resolver;

pub use annotations::{ColumnAnnotation, TableAnnotation};
pub use decl::{
    well_known, DeclBody, Declaration, Field, Module, PrimitiveKind, ScopedName, TypeExpr,
};
pub use loader::{load_graph, prelude};
pub use resolver::DeclGraph;

use std::path::PathBuf;
use thiserror::Error;

/// Graph loading and resolution errors. All of these are fatal: the run
/// produces no usable output once any of them occurs.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("failed to read module file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse module file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("module '{0}' not found in any search directory")]
    ModuleNotFound(String),

    #[error("module '{0}' loaded twice")]
    DuplicateModule(String),

    #[error("unresolved reference '{0}'")]
    UnresolvedReference(ScopedName),
}
