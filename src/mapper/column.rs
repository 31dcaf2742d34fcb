//! The type-to-column reduction algorithm.
//!
//! Drives decode + expand until a terminal shape is reached, producing the
//! concrete column type, the nullability flag, and the foreign-key target.
//! Nullability and foreign-key detection are independent axes: a column can
//! be both nullable and a foreign key.
//!
//! Termination: every alias/newtype expansion inserts the declaration's
//! scoped name into a visited set. A revisit means the source graph carries
//! a cyclic alias chain, which is a fatal configuration error rather than
//! an infinite loop. The set is bounded by the number of declarations in
//! the graph.

use std::collections::HashSet;

use crate::dialect::{Dialect, Profile};
use crate::graph::{well_known, DeclGraph, ScopedName, TypeExpr};
use crate::mapper::decode::{decode, Shape};
use crate::mapper::expand::{expand_reference, Expansion};
use crate::mapper::GenError;

/// Foreign-key target of a column. The referenced column is always the
/// target table's `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: &'static str,
}

impl ForeignKey {
    fn to_id(table: String) -> Self {
        ForeignKey { table, column: "id" }
    }
}

/// Concrete column derived from one field's type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub sql_type: String,
    pub nullable: bool,
    pub foreign_key: Option<ForeignKey>,
}

/// Reduces a type expression to a column specification.
pub fn column_spec(
    expr: &TypeExpr,
    graph: &DeclGraph,
    dialect: &Profile,
) -> Result<ColumnSpec, GenError> {
    let mut visited = HashSet::new();
    reduce(expr, graph, dialect, &mut visited, false)
}

fn reduce(
    expr: &TypeExpr,
    graph: &DeclGraph,
    dialect: &Profile,
    visited: &mut HashSet<ScopedName>,
    nullable: bool,
) -> Result<ColumnSpec, GenError> {
    match decode(expr)? {
        Shape::Primitive(kind) => Ok(ColumnSpec {
            // Unmapped kinds degrade to the opaque spelling; never an error.
            sql_type: dialect.column_type(kind).to_string(),
            nullable,
            foreign_key: None,
        }),

        Shape::Nullable(inner) => {
            if nullable {
                return Err(GenError::NestedNullable {
                    ty: expr.to_string(),
                });
            }
            reduce(inner, graph, dialect, visited, true)
        }

        Shape::Reference(name, params) => {
            if let Some(temporal) = well_known::temporal(name) {
                return Ok(ColumnSpec {
                    sql_type: dialect.temporal_type(temporal).to_string(),
                    nullable,
                    foreign_key: None,
                });
            }
            if well_known::is_db_key(name) {
                return db_key_column(expr, params, graph, dialect, nullable);
            }

            let decl = graph.resolve(name)?;
            if decl.is_enumeration() {
                return Ok(ColumnSpec {
                    sql_type: dialect.enum_type().to_string(),
                    nullable,
                    foreign_key: None,
                });
            }
            match expand_reference(name, decl, params)? {
                Expansion::Expanded(inner) => {
                    if !visited.insert(name.clone()) {
                        return Err(GenError::CyclicDefinition { name: name.clone() });
                    }
                    reduce(&inner, graph, dialect, visited, nullable)
                }
                // Plain struct, or union with payload: stored opaquely.
                Expansion::Terminal => Ok(ColumnSpec {
                    sql_type: dialect.opaque_type().to_string(),
                    nullable,
                    foreign_key: None,
                }),
            }
        }
    }
}

/// A `DbKey<T>` column: the dialect's surrogate-id type (so it always
/// matches the referenced `id` column), plus a foreign-key target when `T`
/// is a table-mapped declaration.
///
/// `DbKey` of a primitive is legal (a key held by raw value) and simply has
/// no foreign key. A wrapped parameter is a defined error: the supported
/// shape for an optional key is the wrapper outside (`Maybe<DbKey<T>>`).
fn db_key_column(
    expr: &TypeExpr,
    params: &[TypeExpr],
    graph: &DeclGraph,
    dialect: &Profile,
    nullable: bool,
) -> Result<ColumnSpec, GenError> {
    let [param] = params else {
        return Err(GenError::WrongArity {
            name: ScopedName::new(well_known::DB_KEY_MODULE, well_known::DB_KEY_NAME),
            expected: 1,
            found: params.len(),
        });
    };
    let foreign_key = match decode(param)? {
        Shape::Reference(target, _) => {
            let decl = graph.resolve(target)?;
            decl.table_name().map(ForeignKey::to_id)
        }
        Shape::Primitive(_) => None,
        Shape::Nullable(_) => {
            return Err(GenError::InvalidKeyParameter {
                ty: expr.to_string(),
            });
        }
    };
    Ok(ColumnSpec {
        sql_type: dialect.id_type().to_string(),
        nullable,
        foreign_key,
    })
}
