//! Schema readiness checks run when a repository binds to a connection.

use super::DbResult;
use rusqlite::Connection;
use std::fmt::{Display, Formatter};

/// The first missing piece found while checking a table mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaGap {
    Table(&'static str),
    Column {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SchemaGap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(table) => write!(f, "table `{table}` is missing"),
            Self::Column { table, column } => write!(f, "column `{table}.{column}` is missing"),
        }
    }
}

/// Verifies `table` exists with an `id` column plus every one of `columns`.
///
/// # Errors
/// - `DbError::SchemaNotReady` naming the first gap found.
/// - `DbError::Sqlite` when the catalog cannot be read.
pub fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &'static [&'static str],
) -> DbResult<()> {
    let present = table_columns(conn, table)?;
    if present.is_empty() {
        return Err(SchemaGap::Table(table).into());
    }

    let missing = std::iter::once("id")
        .chain(columns.iter().copied())
        .find(|column| !present.iter().any(|name| name == column));
    match missing {
        Some(column) => Err(SchemaGap::Column { table, column }.into()),
        None => Ok(()),
    }
}

/// Column names of `table`, empty when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let names = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
