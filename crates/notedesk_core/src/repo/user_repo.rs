//! SQLite table mapping for users.

use super::sqlite::{SqliteRecord, SqliteRepository};
use crate::model::user::User;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQLite-backed user repository.
pub type SqliteUserRepository<'conn> = SqliteRepository<'conn, User>;

impl SqliteRecord for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["name", "email"];
    const NAME_COLUMN: &'static str = "name";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            email: row.get("email")?,
        })
    }

    fn content_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.email.clone()),
        ]
    }
}
