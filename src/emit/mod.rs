//! Schema text emission.

mod sql;

pub use sql::write_schema;
