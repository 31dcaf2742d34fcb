//! Shared test fixtures: type-expression shorthands and prebuilt graphs.

use crate::graph::{
    prelude, ColumnAnnotation, DeclBody, DeclGraph, Declaration, Field, Module, PrimitiveKind,
    ScopedName, TableAnnotation, TypeExpr,
};

pub fn ty_prim(kind: PrimitiveKind) -> TypeExpr {
    TypeExpr::primitive(kind)
}

pub fn ty_ref(module: &str, name: &str, params: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::reference(ScopedName::new(module, name), params)
}

pub fn maybe(inner: TypeExpr) -> TypeExpr {
    ty_ref("sys.types", "Maybe", vec![inner])
}

pub fn db_key(module: &str, name: &str) -> TypeExpr {
    ty_ref("common.db", "DbKey", vec![ty_ref(module, name, vec![])])
}

pub fn field(name: &str, ty: TypeExpr) -> Field {
    Field {
        name: name.to_string(),
        ty,
        column: None,
    }
}

pub fn struct_decl(name: &str, fields: Vec<Field>, table: Option<TableAnnotation>) -> Declaration {
    Declaration {
        name: name.to_string(),
        type_params: vec![],
        body: DeclBody::Struct { fields },
        table,
    }
}

pub fn alias_decl(name: &str, underlying: TypeExpr) -> Declaration {
    Declaration {
        name: name.to_string(),
        type_params: vec![],
        body: DeclBody::TypeAlias { underlying },
        table: None,
    }
}

pub fn enum_decl(name: &str, variants: &[&str]) -> Declaration {
    Declaration {
        name: name.to_string(),
        type_params: vec![],
        body: DeclBody::Union {
            fields: variants
                .iter()
                .map(|v| field(v, ty_prim(PrimitiveKind::Void)))
                .collect(),
        },
        table: None,
    }
}

pub fn module(name: &str, decls: Vec<Declaration>) -> Module {
    Module {
        name: name.to_string(),
        imports: vec![],
        decls,
    }
}

/// Builds a graph from the given modules plus the builtin prelude.
pub fn graph_with(modules: Vec<Module>) -> DeclGraph {
    let mut graph = DeclGraph::new();
    for m in prelude() {
        graph.insert_module(m).unwrap();
    }
    for m in modules {
        graph.insert_module(m).unwrap();
    }
    graph
}

fn id_table() -> Option<TableAnnotation> {
    Some(TableAnnotation {
        with_id_primary_key: true,
        ..TableAnnotation::default()
    })
}

/// The canonical example: a Person table with a self-referential key, a
/// required column, a nullable column, plus assorted alias and enum
/// declarations used across mapper tests.
pub fn person_graph() -> DeclGraph {
    graph_with(vec![module(
        "app.model",
        vec![
            struct_decl(
                "Person",
                vec![
                    field("id", db_key("app.model", "Person")),
                    field("email", ty_prim(PrimitiveKind::String)),
                    field("nickname", maybe(ty_prim(PrimitiveKind::String))),
                ],
                id_table(),
            ),
            enum_decl("Status", &["active", "suspended", "deleted"]),
            struct_decl(
                "Address",
                vec![
                    field("street", ty_prim(PrimitiveKind::String)),
                    field("city", ty_prim(PrimitiveKind::String)),
                ],
                None,
            ),
            alias_decl("Email", ty_prim(PrimitiveKind::String)),
            alias_decl("EmailAlias", ty_ref("app.model", "Email", vec![])),
            alias_decl("OptName", maybe(ty_prim(PrimitiveKind::String))),
        ],
    )])
}

/// Two mutually-referencing aliases; expansion must fail, not loop.
pub fn cyclic_graph() -> DeclGraph {
    graph_with(vec![module(
        "cyc",
        vec![
            alias_decl("A", ty_ref("cyc", "B", vec![])),
            alias_decl("B", ty_ref("cyc", "A", vec![])),
        ],
    )])
}

/// A module declaring its tables out of alphabetical order, with indexes,
/// uniqueness constraints and raw SQL on one of them, plus a separate
/// loaded-but-not-requested module carrying its own table.
pub fn two_table_graph() -> DeclGraph {
    let ant_table = TableAnnotation {
        with_id_primary_key: true,
        indexes: vec![vec!["legs".to_string()]],
        uniqueness_constraints: vec![vec!["legs".to_string()]],
        extra_sql: vec!["comment on table ant is 'six legs';".to_string()],
        ..TableAnnotation::default()
    };
    graph_with(vec![
        module(
            "zoo",
            vec![
                struct_decl(
                    "Zebra",
                    vec![
                        field("name", ty_prim(PrimitiveKind::String)),
                        field("friend", maybe(db_key("zoo", "Ant"))),
                    ],
                    id_table(),
                ),
                struct_decl(
                    "Ant",
                    vec![field("legs", ty_prim(PrimitiveKind::Int32))],
                    Some(ant_table),
                ),
            ],
        ),
        module(
            "staff",
            vec![struct_decl(
                "Keeper",
                vec![field("name", ty_prim(PrimitiveKind::String))],
                id_table(),
            )],
        ),
    ])
}

/// Table with an explicit two-column primary key.
pub fn composite_key_graph() -> DeclGraph {
    let table = TableAnnotation {
        with_primary_key: vec!["left_id".to_string(), "right_id".to_string()],
        ..TableAnnotation::default()
    };
    graph_with(vec![module(
        "app.link",
        vec![struct_decl(
            "Link",
            vec![
                field("leftId", ty_prim(PrimitiveKind::String)),
                field("rightId", ty_prim(PrimitiveKind::String)),
            ],
            Some(table),
        )],
    )])
}

/// Both a synthetic id and an explicit primary key requested; the synthetic
/// id takes precedence.
pub fn conflicting_key_graph() -> DeclGraph {
    let table = TableAnnotation {
        with_id_primary_key: true,
        with_primary_key: vec!["email".to_string()],
        ..TableAnnotation::default()
    };
    graph_with(vec![module(
        "app.conflict",
        vec![struct_decl(
            "Account",
            vec![field("email", ty_prim(PrimitiveKind::String))],
            Some(table),
        )],
    )])
}

/// Explicit table and column names overriding the snake_case conversion.
pub fn renamed_table_graph() -> DeclGraph {
    let table = TableAnnotation {
        table_name: Some("people".to_string()),
        with_id_primary_key: true,
        ..TableAnnotation::default()
    };
    let mut email = field("email", ty_prim(PrimitiveKind::String));
    email.column = Some(ColumnAnnotation {
        column_name: Some("mail_addr".to_string()),
    });
    graph_with(vec![module(
        "app.renamed",
        vec![struct_decl("PersonRecord", vec![email], Some(table))],
    )])
}

/// Index directive naming a column that does not exist.
pub fn bad_index_graph() -> DeclGraph {
    let table = TableAnnotation {
        with_id_primary_key: true,
        indexes: vec![vec!["nope".to_string()]],
        ..TableAnnotation::default()
    };
    graph_with(vec![module(
        "app.bad",
        vec![struct_decl(
            "Thing",
            vec![field("name", ty_prim(PrimitiveKind::String))],
            Some(table),
        )],
    )])
}

/// A union carrying a table annotation, which is not a mappable shape.
pub fn tabled_union_graph() -> DeclGraph {
    let mut decl = enum_decl("Broken", &["a", "b"]);
    decl.table = Some(TableAnnotation::default());
    graph_with(vec![module("app.bad", vec![decl])])
}

/// A field wrapped in nullable-of-nullable, which is a defined error.
pub fn nested_nullable_graph() -> DeclGraph {
    graph_with(vec![module(
        "app.bad",
        vec![struct_decl(
            "Broken",
            vec![field("nick", maybe(maybe(ty_prim(PrimitiveKind::String))))],
            id_table(),
        )],
    )])
}
