//! Module file loading.
//!
//! Modules are JSON files deserialized straight into the graph types. This
//! layer is deliberately thin: it transcribes, injects the builtin prelude,
//! and chases imports through the search directories. It performs no
//! semantic validation beyond what serde enforces; the graph is assumed
//! well-typed by the time it reaches the mapper.

use std::fs;
use std::path::{Path, PathBuf};

use crate::graph::decl::{well_known, DeclBody, Declaration, Module, PrimitiveKind, TypeExpr};
use crate::graph::resolver::DeclGraph;
use crate::graph::GraphError;

/// Loads the requested module files plus everything they transitively
/// import, and returns the graph together with the requested module names.
///
/// Only requested modules contribute tables to the output; imported modules
/// exist so references resolve.
pub fn load_graph(
    files: &[PathBuf],
    search_dirs: &[PathBuf],
) -> Result<(DeclGraph, Vec<String>), GraphError> {
    let mut graph = DeclGraph::new();
    for module in prelude() {
        graph.insert_module(module)?;
    }

    let mut requested = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for path in files {
        let module = read_module(path)?;
        requested.push(module.name.clone());
        pending.extend(module.imports.clone());
        graph.insert_module(module)?;
    }

    // Imports form a worklist; a module already present (prelude included)
    // is simply skipped.
    while let Some(name) = pending.pop() {
        if graph.contains_module(&name) {
            continue;
        }
        let path = find_module_file(&name, search_dirs)
            .ok_or_else(|| GraphError::ModuleNotFound(name.clone()))?;
        let module = read_module(&path)?;
        pending.extend(module.imports.clone());
        graph.insert_module(module)?;
    }

    Ok((graph, requested))
}

fn read_module(path: &Path) -> Result<Module, GraphError> {
    let text = fs::read_to_string(path).map_err(|source| GraphError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| GraphError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn find_module_file(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|dir| dir.join(format!("{name}.json")))
        .find(|candidate| candidate.is_file())
}

/// The builtin modules every graph carries, so the well-known names always
/// resolve and the closed-world invariant holds without special cases in
/// the resolver.
pub fn prelude() -> Vec<Module> {
    let string = TypeExpr::primitive(PrimitiveKind::String);
    vec![
        Module {
            name: well_known::MAYBE_MODULE.to_string(),
            imports: vec![],
            decls: vec![Declaration {
                name: well_known::MAYBE_NAME.to_string(),
                type_params: vec!["T".to_string()],
                body: DeclBody::TypeAlias {
                    underlying: TypeExpr::nullable(TypeExpr::var("T")),
                },
                table: None,
            }],
        },
        Module {
            name: well_known::TEMPORAL_MODULE.to_string(),
            imports: vec![],
            decls: vec![
                newtype("Instant", TypeExpr::primitive(PrimitiveKind::Int64)),
                newtype("Date", string.clone()),
                newtype("LocalDateTime", string.clone()),
            ],
        },
        Module {
            name: well_known::DB_KEY_MODULE.to_string(),
            imports: vec![],
            decls: vec![Declaration {
                name: well_known::DB_KEY_NAME.to_string(),
                type_params: vec!["T".to_string()],
                body: DeclBody::Newtype { underlying: string },
                table: None,
            }],
        },
    ]
}

fn newtype(name: &str, underlying: TypeExpr) -> Declaration {
    Declaration {
        name: name.to_string(),
        type_params: vec![],
        body: DeclBody::Newtype { underlying },
        table: None,
    }
}
