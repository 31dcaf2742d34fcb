//! Core declaration-graph types.
//!
//! Provides the target-independent type model the generator consumes:
//! modules, declarations (struct/union/newtype/alias), fields, and type
//! expressions. These types are produced by the loader and are immutable
//! for the rest of the run.
//!
//! # Type Decisions
//!
//! **Why a closed `DeclBody` enum instead of a trait per declaration kind?**
//! The set of declaration kinds is fixed. Exhaustive `match` in the mapper
//! is the main defense against silently skipping a kind, which a trait
//! object hierarchy would not give us.
//!
//! **Why does `TypeExpr` keep both `Nullable<T>` and `Maybe<T>` spellings?**
//! They are distinct surface forms in source modules. The mapper's decoder
//! collapses them into one shape; keeping both here means the loader stays
//! a dumb transcription layer and the human-readable rendering used in
//! column comments can show what the source actually said.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::annotations::{ColumnAnnotation, TableAnnotation};

/// Qualified identifier of a declaration: owning module plus unqualified name.
///
/// Equality is structural; this is the identity used both for declaration
/// lookup and for reference targets inside type expressions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScopedName {
    pub module: String,
    pub name: String,
}

impl ScopedName {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        ScopedName {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// The fixed set of primitive kinds a type expression can bottom out in.
///
/// `Void` is the payload-free marker carried by enumeration variants; it has
/// no spelling in any dialect's primitive table and falls back to the opaque
/// column type if it ever reaches a column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    String,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Word8,
    Word16,
    Word32,
    Word64,
    Float,
    Double,
    Bytes,
    Json,
    Void,
}

impl PrimitiveKind {
    /// Source-form spelling, used for rendering and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "String",
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Int8 => "Int8",
            PrimitiveKind::Int16 => "Int16",
            PrimitiveKind::Int32 => "Int32",
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::Word8 => "Word8",
            PrimitiveKind::Word16 => "Word16",
            PrimitiveKind::Word32 => "Word32",
            PrimitiveKind::Word64 => "Word64",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
            PrimitiveKind::Bytes => "Bytes",
            PrimitiveKind::Json => "Json",
            PrimitiveKind::Void => "Void",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type expression as written in a source module.
///
/// `Var` occurrences only appear inside the underlying expression of a
/// generic alias/newtype declaration; they are substituted away by the
/// expander before any column mapping happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Primitive {
        primitive: PrimitiveKind,
    },
    Nullable {
        inner: Box<TypeExpr>,
    },
    Ref {
        name: ScopedName,
        #[serde(default)]
        params: Vec<TypeExpr>,
    },
    Var {
        var: String,
    },
}

impl TypeExpr {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeExpr::Primitive { primitive: kind }
    }

    pub fn nullable(inner: TypeExpr) -> Self {
        TypeExpr::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn reference(name: ScopedName, params: Vec<TypeExpr>) -> Self {
        TypeExpr::Ref { name, params }
    }

    pub fn var(name: impl Into<String>) -> Self {
        TypeExpr::Var { var: name.into() }
    }
}

impl fmt::Display for TypeExpr {
    /// Renders the expression in source form (`Maybe<String>`, `DbKey<Person>`).
    ///
    /// References render with their unqualified name; the emitted column
    /// comments use this to echo what the field declaration said.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive { primitive } => write!(f, "{primitive}"),
            TypeExpr::Nullable { inner } => write!(f, "Nullable<{inner}>"),
            TypeExpr::Ref { name, params } => {
                f.write_str(&name.name)?;
                if !params.is_empty() {
                    f.write_str("<")?;
                    for (i, param) in params.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{param}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeExpr::Var { var } => f.write_str(var),
        }
    }
}

/// A named field of a struct or union declaration.
///
/// Field order is significant: it drives emitted column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnAnnotation>,
}

/// The kind-specific payload of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclBody {
    Struct { fields: Vec<Field> },
    Union { fields: Vec<Field> },
    Newtype { underlying: TypeExpr },
    TypeAlias { underlying: TypeExpr },
}

/// A single declaration: name, optional type parameters, kind payload, and
/// the table annotation when the declaration maps to a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    #[serde(flatten)]
    pub body: DeclBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableAnnotation>,
}

impl Declaration {
    /// Derived SQL table name: the explicit annotation value when present,
    /// else the snake_case conversion of the declaration name. `None` for
    /// declarations that are not table-mapped.
    pub fn table_name(&self) -> Option<String> {
        let ann = self.table.as_ref()?;
        Some(
            ann.table_name
                .clone()
                .unwrap_or_else(|| crate::utils::to_snake_case(&self.name)),
        )
    }

    /// True for a union whose variants all carry no payload (a pure
    /// enumeration). Enumerations map to the dialect's enum column type.
    pub fn is_enumeration(&self) -> bool {
        match &self.body {
            DeclBody::Union { fields } => fields.iter().all(|f| {
                matches!(
                    f.ty,
                    TypeExpr::Primitive {
                        primitive: PrimitiveKind::Void
                    }
                )
            }),
            _ => false,
        }
    }
}

/// A named collection of declarations plus the modules it imports.
///
/// Imports are loaded (so references resolve) but do not by themselves make
/// a module's tables part of the requested output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    pub decls: Vec<Declaration>,
}

/// Distinguished declaration names the mapper recognizes structurally.
pub mod well_known {
    use super::ScopedName;

    pub const MAYBE_MODULE: &str = "sys.types";
    pub const MAYBE_NAME: &str = "Maybe";
    pub const DB_KEY_MODULE: &str = "common.db";
    pub const DB_KEY_NAME: &str = "DbKey";
    pub const TEMPORAL_MODULE: &str = "common";

    /// The conventionally-named optional wrapper; decoded identically to the
    /// dedicated `Nullable<T>` spelling.
    pub fn is_maybe(name: &ScopedName) -> bool {
        name.module == MAYBE_MODULE && name.name == MAYBE_NAME
    }

    /// The distinguished foreign-key wrapper.
    pub fn is_db_key(name: &ScopedName) -> bool {
        name.module == DB_KEY_MODULE && name.name == DB_KEY_NAME
    }

    /// Well-known temporal types, mapped by name to fixed dialect spellings
    /// regardless of their declared internal representation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Temporal {
        /// An instant in time (timezone-aware timestamp).
        Instant,
        /// A calendar date.
        Date,
        /// A date-and-time without zone.
        LocalDateTime,
    }

    pub fn temporal(name: &ScopedName) -> Option<Temporal> {
        if name.module != TEMPORAL_MODULE {
            return None;
        }
        match name.name.as_str() {
            "Instant" => Some(Temporal::Instant),
            "Date" => Some(Temporal::Date),
            "LocalDateTime" => Some(Temporal::LocalDateTime),
            _ => None,
        }
    }
}
