//! SQL schema emission.
//!
//! Assembles resolved column specifications into the final schema text.
//! Output layout is fixed: header comment, `create table` blocks sorted by
//! table name, then every foreign-key `alter table`, then index creation,
//! then uniqueness constraints, then raw trailing SQL. Constraints come
//! after all tables so forward references between tables never produce
//! invalid output.
//!
//! The whole schema is rendered into a buffer before anything touches the
//! output sink; a fatal error mid-run therefore never leaves partial text
//! behind.

use std::io::Write;

use crate::dialect::{Dialect, Profile};
use crate::graph::{DeclBody, DeclGraph, Declaration, Field, ScopedName, TableAnnotation};
use crate::mapper::{column_spec, ColumnSpec, GenError};
use crate::utils::to_snake_case;

/// A resolved column ready for rendering.
#[derive(Debug, Clone)]
struct Column {
    name: String,
    spec: ColumnSpec,
    /// Pre-mapping type expression in source form; rendered as the aligned
    /// trailing comment. Empty for the synthetic id column.
    source_type: String,
}

/// A resolved table: derived name, columns in field order, and the
/// table-level directives.
#[derive(Debug, Clone)]
struct Table {
    name: String,
    columns: Vec<Column>,
    annotation: TableAnnotation,
}

/// Generates the schema for every table-annotated declaration in the
/// requested modules and writes it to `out` as a single buffer.
pub fn write_schema<W: Write>(
    out: &mut W,
    graph: &DeclGraph,
    requested: &[String],
    dialect: &Profile,
) -> Result<(), GenError> {
    let tables = collect_tables(graph, requested, dialect)?;
    let mut buf = String::new();

    let mut modules: Vec<&str> = requested.iter().map(String::as_str).collect();
    modules.sort_unstable();
    buf.push_str("-- Generated schema for modules:\n");
    for module in &modules {
        buf.push_str("--   ");
        buf.push_str(module);
        buf.push('\n');
    }
    buf.push('\n');

    for table in &tables {
        render_table(&mut buf, table);
        buf.push('\n');
    }

    let mut constraints = String::new();
    for table in &tables {
        for column in &table.columns {
            if let Some(fk) = &column.spec.foreign_key {
                constraints.push_str(&format!(
                    "alter table {t} add constraint {t}_{c}_fk foreign key ({c}) references {target}({target_col});\n",
                    t = table.name,
                    c = column.name,
                    target = fk.table,
                    target_col = fk.column,
                ));
            }
        }
    }
    push_group(&mut buf, constraints);

    let mut indexes = String::new();
    for table in &tables {
        for (i, group) in table.annotation.indexes.iter().enumerate() {
            indexes.push_str(&format!(
                "create index {}_{}_idx on {}({});\n",
                table.name,
                i + 1,
                table.name,
                group.join(", "),
            ));
        }
    }
    push_group(&mut buf, indexes);

    let mut uniques = String::new();
    for table in &tables {
        for (i, group) in table.annotation.uniqueness_constraints.iter().enumerate() {
            uniques.push_str(&format!(
                "alter table {} add constraint {}_{}_con unique ({});\n",
                table.name,
                table.name,
                i + 1,
                group.join(", "),
            ));
        }
    }
    push_group(&mut buf, uniques);

    let mut raw = String::new();
    for table in &tables {
        for statement in &table.annotation.extra_sql {
            raw.push_str(statement);
            if !statement.ends_with('\n') {
                raw.push('\n');
            }
        }
    }
    push_group(&mut buf, raw);

    out.write_all(buf.as_bytes())?;
    Ok(())
}

fn push_group(buf: &mut String, group: String) {
    if !group.is_empty() {
        buf.push_str(&group);
        buf.push('\n');
    }
}

/// Resolves every table-annotated declaration of the requested modules,
/// sorted ascending by derived table name so declaration order in source
/// never changes the output.
fn collect_tables(
    graph: &DeclGraph,
    requested: &[String],
    dialect: &Profile,
) -> Result<Vec<Table>, GenError> {
    let mut tables = Vec::new();
    for module in requested {
        for (scoped, decl) in graph.declarations_in(module) {
            if decl.table.is_none() {
                continue;
            }
            tables.push(resolve_table(&scoped, decl, graph, dialect)?);
        }
    }
    tables.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tables)
}

fn resolve_table(
    scoped: &ScopedName,
    decl: &Declaration,
    graph: &DeclGraph,
    dialect: &Profile,
) -> Result<Table, GenError> {
    let annotation = decl.table.clone().unwrap_or_default();
    let name = decl
        .table_name()
        .unwrap_or_else(|| to_snake_case(&decl.name));

    let DeclBody::Struct { fields } = &decl.body else {
        return Err(GenError::TableNotStruct {
            name: scoped.clone(),
        });
    };

    let mut columns = Vec::with_capacity(fields.len() + 1);
    for field in fields {
        columns.push(resolve_column(scoped, field, graph, dialect)?);
    }

    // Synthetic id column goes first; when the struct already declares an
    // id column it stands in for the synthetic one.
    if annotation.with_id_primary_key && !columns.iter().any(|c| c.name == "id") {
        columns.insert(
            0,
            Column {
                name: "id".to_string(),
                spec: ColumnSpec {
                    sql_type: dialect.id_type().to_string(),
                    nullable: false,
                    foreign_key: None,
                },
                source_type: String::new(),
            },
        );
    }

    check_directive_columns(&name, &annotation, &columns)?;
    Ok(Table {
        name,
        columns,
        annotation,
    })
}

fn resolve_column(
    scoped: &ScopedName,
    field: &Field,
    graph: &DeclGraph,
    dialect: &Profile,
) -> Result<Column, GenError> {
    let spec = column_spec(&field.ty, graph, dialect).map_err(|source| GenError::FieldMapping {
        decl: scoped.clone(),
        field: field.name.clone(),
        source: Box::new(source),
    })?;
    let name = field
        .column
        .as_ref()
        .and_then(|c| c.column_name.clone())
        .unwrap_or_else(|| to_snake_case(&field.name));
    Ok(Column {
        name,
        spec,
        source_type: field.ty.to_string(),
    })
}

/// Every column named by an index, uniqueness, or effective primary-key
/// directive must exist on the table; a typo here would otherwise surface
/// as broken SQL far from its cause.
fn check_directive_columns(
    table: &str,
    annotation: &TableAnnotation,
    columns: &[Column],
) -> Result<(), GenError> {
    let mut named: Vec<&[String]> = Vec::new();
    for group in &annotation.indexes {
        named.push(group);
    }
    for group in &annotation.uniqueness_constraints {
        named.push(group);
    }
    // The explicit primary key is ignored when the synthetic id wins, so it
    // is only checked when it actually takes effect.
    if !annotation.with_id_primary_key {
        named.push(&annotation.with_primary_key);
    }
    for group in named {
        for column in group {
            if !columns.iter().any(|c| &c.name == column) {
                return Err(GenError::UnknownColumn {
                    table: table.to_string(),
                    column: column.clone(),
                });
            }
        }
    }
    Ok(())
}

fn render_table(buf: &mut String, table: &Table) {
    let primary_key = if table.annotation.with_id_primary_key {
        Some("primary key(id)".to_string())
    } else if !table.annotation.with_primary_key.is_empty() {
        Some(format!(
            "primary key({})",
            table.annotation.with_primary_key.join(", ")
        ))
    } else {
        None
    };

    // Body lines before comment alignment. Every column line keeps its
    // trailing comma except the last line of the block.
    let last_body = table.columns.len().saturating_sub(1);
    let mut lines: Vec<(String, &str)> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let mut line = format!("  {} {}", column.name, column.spec.sql_type);
            if !column.spec.nullable {
                line.push_str(" not null");
            }
            if primary_key.is_some() || i != last_body {
                line.push(',');
            }
            (line, column.source_type.as_str())
        })
        .collect();
    if let Some(pk) = &primary_key {
        lines.push((format!("  {pk}"), ""));
    }

    let width = lines
        .iter()
        .filter(|(_, comment)| !comment.is_empty())
        .map(|(line, _)| line.len())
        .max()
        .unwrap_or(0);

    buf.push_str(&format!("create table {}(\n", table.name));
    for (line, comment) in &lines {
        buf.push_str(line);
        if !comment.is_empty() {
            for _ in line.len()..width + 2 {
                buf.push(' ');
            }
            buf.push_str("-- ");
            buf.push_str(comment);
        }
        buf.push('\n');
    }
    buf.push_str(");\n");
}
