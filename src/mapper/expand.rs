//! Alias/newtype expansion.
//!
//! Substitutes type parameters positionally through one layer of
//! indirection. The caller drives this to a fixed point; each successful
//! expansion removes exactly one indirection layer, so a visited set keyed
//! by declaration identity bounds the whole chain.

use std::collections::HashMap;

use crate::graph::{DeclBody, Declaration, ScopedName, TypeExpr};
use crate::mapper::GenError;

/// Result of attempting to expand a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// The declaration was an alias or newtype; here is its underlying
    /// expression with type parameters substituted in.
    Expanded(TypeExpr),
    /// A concrete declaration kind (struct or union); nothing to expand.
    /// This is a sentinel, not an error.
    Terminal,
}

/// Expands one reference through its resolved declaration.
///
/// Arity mismatches between the declaration's parameter list and the
/// reference's arguments are fatal; the upstream type checker should have
/// rejected them, so hitting one here is an invariant violation.
pub fn expand_reference(
    name: &ScopedName,
    decl: &Declaration,
    params: &[TypeExpr],
) -> Result<Expansion, GenError> {
    let underlying = match &decl.body {
        DeclBody::Newtype { underlying } | DeclBody::TypeAlias { underlying } => underlying,
        DeclBody::Struct { .. } | DeclBody::Union { .. } => return Ok(Expansion::Terminal),
    };

    if decl.type_params.len() != params.len() {
        return Err(GenError::WrongArity {
            name: name.clone(),
            expected: decl.type_params.len(),
            found: params.len(),
        });
    }

    let bindings: HashMap<&str, &TypeExpr> = decl
        .type_params
        .iter()
        .map(String::as_str)
        .zip(params.iter())
        .collect();
    Ok(Expansion::Expanded(substitute(underlying, &bindings)))
}

/// Replaces every bound type variable in `expr` with its argument.
///
/// Unbound variables are left in place; they surface later as a decode
/// error with the variable name, which is a better diagnostic than failing
/// here without knowing whether the variable ever reaches a column.
pub fn substitute(expr: &TypeExpr, bindings: &HashMap<&str, &TypeExpr>) -> TypeExpr {
    match expr {
        TypeExpr::Primitive { .. } => expr.clone(),
        TypeExpr::Nullable { inner } => TypeExpr::nullable(substitute(inner, bindings)),
        TypeExpr::Ref { name, params } => TypeExpr::Ref {
            name: name.clone(),
            params: params.iter().map(|p| substitute(p, bindings)).collect(),
        },
        TypeExpr::Var { var } => match bindings.get(var.as_str()) {
            Some(bound) => (*bound).clone(),
            None => expr.clone(),
        },
    }
}
