//! Custom SQL functions registered on every notedesk connection.
//!
//! SQLite's built-in `lower()` folds ASCII letters only. `casefold(x)`
//! lowercases with full Unicode rules so SQL search agrees with Rust-side
//! `str::to_lowercase`.

use super::{DbError, DbResult};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Name of the Unicode lowercasing function used by substring search.
pub const CASEFOLD: &str = "casefold";

/// Registers `casefold` on `conn`. Registering twice replaces the first
/// definition.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        CASEFOLD,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )
    .map_err(|source| DbError::Function {
        name: CASEFOLD,
        source,
    })
}
