//! Dialect profiles.
//!
//! A profile is a strategy object: a table of primitive spellings plus the
//! few special column roles (surrogate id, enum, temporal, opaque). The set
//! of dialects is closed, so dispatch goes through an `enum_dispatch` enum
//! rather than trait objects. Profiles share no behavior, only a schema.

mod mssql;
mod postgres;

pub use mssql::MssqlDialect;
pub use postgres::{PostgresDialect, PostgresV2Dialect};

use enum_dispatch::enum_dispatch;

use crate::graph::well_known::Temporal;
use crate::graph::PrimitiveKind;

/// Target-dialect spellings consulted by the column mapper.
#[enum_dispatch]
pub trait Dialect {
    /// Spelling for a primitive kind. `None` for kinds the dialect has no
    /// mapping for; those degrade to `opaque_type`.
    fn primitive_type(&self, kind: PrimitiveKind) -> Option<&'static str>;

    /// Spelling for opaque payloads (unmapped primitives, inline structs,
    /// unions with payload).
    fn opaque_type(&self) -> &'static str;

    /// Column type of the surrogate `id` column; also used for every
    /// `DbKey` column so foreign keys reference a same-typed column.
    fn id_type(&self) -> &'static str;

    /// Column type used for pure enumerations.
    fn enum_type(&self) -> &'static str;

    /// Fixed spellings for the well-known temporal types.
    fn temporal_type(&self, temporal: Temporal) -> &'static str;

    /// Primitive lookup with the opaque fallback applied.
    fn column_type(&self, kind: PrimitiveKind) -> &'static str {
        self.primitive_type(kind).unwrap_or_else(|| self.opaque_type())
    }
}

/// The closed set of supported dialects.
#[enum_dispatch(Dialect)]
#[derive(Debug, Clone, Copy)]
pub enum Profile {
    Postgres(PostgresDialect),
    PostgresV2(PostgresV2Dialect),
    Mssql(MssqlDialect),
}
