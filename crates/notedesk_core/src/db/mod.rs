//! SQLite storage bootstrap for notedesk.
//!
//! # Responsibility
//! - Open connections and bring their schema to the version this binary
//!   ships (`open`, `migrations`).
//! - Register the SQL functions repositories rely on (`functions`).
//! - Check that a connection exposes the tables a repository maps
//!   (`schema`).
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Resource tables are never touched before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod functions;
pub mod migrations;
mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::SchemaGap;

pub type DbResult<T> = Result<T, DbError>;

/// Failure below the repository layer.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer notedesk build.
    SchemaTooNew { found: u32, supported: u32 },
    /// A table or column a repository maps is absent.
    SchemaNotReady(SchemaGap),
    /// Registering a custom SQL function failed.
    Function {
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "database schema v{found} was written by a newer build (this build knows up to v{supported})"
            ),
            Self::SchemaNotReady(gap) => write!(f, "schema not ready: {gap}"),
            Self::Function { name, source } => {
                write!(f, "cannot register sql function `{name}`: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Function { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } | Self::SchemaNotReady(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<SchemaGap> for DbError {
    fn from(value: SchemaGap) -> Self {
        Self::SchemaNotReady(value)
    }
}
