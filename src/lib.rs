//! declc library - declaration-graph SQL schema generator
//!
//! Takes a graph of algebraic type declarations (structs, unions, newtypes,
//! aliases) annotated with table metadata and derives relational table
//! definitions for a selectable SQL dialect. The pipeline is a single batch
//! pass: load modules, map every table field's type expression to a column,
//! emit the schema text in a fixed deterministic order.

pub mod cli;
pub mod dialect;
pub mod emit;
pub mod graph;
pub mod mapper;
pub mod utils;

#[cfg(test)]
pub mod fixtures;
