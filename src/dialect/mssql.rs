//! SQL Server profile.
//!
//! Carries its own full primitive table and different id/enum column types.
//! Keyed columns use bounded `nvarchar` so they stay indexable.

use crate::dialect::Dialect;
use crate::graph::well_known::Temporal;
use crate::graph::PrimitiveKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDialect;

impl Dialect for MssqlDialect {
    fn primitive_type(&self, kind: PrimitiveKind) -> Option<&'static str> {
        match kind {
            PrimitiveKind::String => Some("nvarchar(max)"),
            PrimitiveKind::Bool => Some("bit"),
            // tinyint is unsigned in T-SQL, so signed 8-bit widens.
            PrimitiveKind::Int8 => Some("smallint"),
            PrimitiveKind::Int16 => Some("smallint"),
            PrimitiveKind::Int32 => Some("int"),
            PrimitiveKind::Int64 => Some("bigint"),
            PrimitiveKind::Word8 => Some("tinyint"),
            PrimitiveKind::Word16 => Some("int"),
            PrimitiveKind::Word32 => Some("bigint"),
            PrimitiveKind::Word64 => Some("numeric(20)"),
            PrimitiveKind::Float => Some("real"),
            PrimitiveKind::Double => Some("float"),
            PrimitiveKind::Bytes => Some("varbinary(max)"),
            PrimitiveKind::Json => Some("nvarchar(max)"),
            PrimitiveKind::Void => None,
        }
    }

    fn opaque_type(&self) -> &'static str {
        "nvarchar(max)"
    }

    fn id_type(&self) -> &'static str {
        "nvarchar(64)"
    }

    fn enum_type(&self) -> &'static str {
        "nvarchar(64)"
    }

    fn temporal_type(&self, temporal: Temporal) -> &'static str {
        match temporal {
            Temporal::Instant => "datetimeoffset",
            Temporal::Date => "date",
            Temporal::LocalDateTime => "datetime2",
        }
    }
}
