//! The loaded declaration graph and its lookup function.

use std::collections::BTreeMap;

use crate::graph::decl::{Declaration, Module, ScopedName};
use crate::graph::GraphError;

/// Immutable, fully-loaded declaration graph.
///
/// Modules are keyed by name in a `BTreeMap` so every iteration order is
/// deterministic; output must be byte-identical across runs.
#[derive(Debug, Default)]
pub struct DeclGraph {
    modules: BTreeMap<String, Module>,
}

impl DeclGraph {
    pub fn new() -> Self {
        DeclGraph::default()
    }

    /// Adds a module to the graph. Loading the same module twice is a loader
    /// bug and is rejected.
    pub fn insert_module(&mut self, module: Module) -> Result<(), GraphError> {
        if self.modules.contains_key(&module.name) {
            return Err(GraphError::DuplicateModule(module.name));
        }
        self.modules.insert(module.name.clone(), module);
        Ok(())
    }

    pub fn contains_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Total lookup from scoped name to declaration.
    ///
    /// The graph is closed-world: every reference reaching this layer must
    /// resolve, so a miss is an invariant violation in the upstream loader
    /// and aborts the run.
    pub fn resolve(&self, name: &ScopedName) -> Result<&Declaration, GraphError> {
        self.modules
            .get(&name.module)
            .and_then(|m| m.decls.iter().find(|d| d.name == name.name))
            .ok_or_else(|| GraphError::UnresolvedReference(name.clone()))
    }

    /// Declarations of one module paired with their scoped names, in
    /// declaration order.
    pub fn declarations_in(
        &self,
        module: &str,
    ) -> impl Iterator<Item = (ScopedName, &Declaration)> {
        self.modules
            .get(module)
            .into_iter()
            .flat_map(|m| m.decls.iter())
            .map(move |d| (ScopedName::new(module, d.name.clone()), d))
    }
}
