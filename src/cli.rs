//! CLI argument definitions.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::dialect::{MssqlDialect, PostgresDialect, PostgresV2Dialect, Profile};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Module files to generate tables from
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory searched for imported modules (repeatable)
    #[arg(long = "searchdir", value_name = "DIR")]
    pub search_dirs: Vec<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Target SQL dialect
    #[arg(long, value_enum, default_value_t = DialectArg::Postgres)]
    pub dialect: DialectArg,
}

/// Dialect selection surface. Kept separate from [`Profile`] because clap's
/// `ValueEnum` needs unit variants.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectArg {
    Postgres,
    Postgres2,
    Mssql,
}

impl DialectArg {
    pub fn profile(self) -> Profile {
        match self {
            DialectArg::Postgres => Profile::from(PostgresDialect),
            DialectArg::Postgres2 => Profile::from(PostgresV2Dialect),
            DialectArg::Mssql => Profile::from(MssqlDialect),
        }
    }
}
