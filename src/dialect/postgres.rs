//! PostgreSQL profiles.
//!
//! Two profiles share one primitive table; the revised profile differs only
//! in spelling JSON payloads as `jsonb`.

use crate::dialect::Dialect;
use crate::graph::well_known::Temporal;
use crate::graph::PrimitiveKind;

fn base_primitive_type(kind: PrimitiveKind) -> Option<&'static str> {
    match kind {
        PrimitiveKind::String => Some("text"),
        PrimitiveKind::Bool => Some("boolean"),
        PrimitiveKind::Int8 => Some("smallint"),
        PrimitiveKind::Int16 => Some("smallint"),
        PrimitiveKind::Int32 => Some("integer"),
        PrimitiveKind::Int64 => Some("bigint"),
        // Unsigned kinds widen so the full value range fits.
        PrimitiveKind::Word8 => Some("smallint"),
        PrimitiveKind::Word16 => Some("integer"),
        PrimitiveKind::Word32 => Some("bigint"),
        PrimitiveKind::Word64 => Some("numeric(20)"),
        PrimitiveKind::Float => Some("real"),
        PrimitiveKind::Double => Some("double precision"),
        PrimitiveKind::Bytes => Some("bytea"),
        PrimitiveKind::Json => None,
        PrimitiveKind::Void => None,
    }
}

fn temporal_type(temporal: Temporal) -> &'static str {
    match temporal {
        Temporal::Instant => "timestamptz",
        Temporal::Date => "date",
        Temporal::LocalDateTime => "timestamp",
    }
}

/// The default dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn primitive_type(&self, kind: PrimitiveKind) -> Option<&'static str> {
        match kind {
            PrimitiveKind::Json => Some("json"),
            other => base_primitive_type(other),
        }
    }

    fn opaque_type(&self) -> &'static str {
        "json"
    }

    fn id_type(&self) -> &'static str {
        "text"
    }

    fn enum_type(&self) -> &'static str {
        "text"
    }

    fn temporal_type(&self, temporal: Temporal) -> &'static str {
        temporal_type(temporal)
    }
}

/// The revised default: identical to [`PostgresDialect`] except JSON and
/// opaque payloads are stored as `jsonb`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresV2Dialect;

impl Dialect for PostgresV2Dialect {
    fn primitive_type(&self, kind: PrimitiveKind) -> Option<&'static str> {
        match kind {
            PrimitiveKind::Json => Some("jsonb"),
            other => base_primitive_type(other),
        }
    }

    fn opaque_type(&self) -> &'static str {
        "jsonb"
    }

    fn id_type(&self) -> &'static str {
        "text"
    }

    fn enum_type(&self) -> &'static str {
        "text"
    }

    fn temporal_type(&self, temporal: Temporal) -> &'static str {
        temporal_type(temporal)
    }
}
