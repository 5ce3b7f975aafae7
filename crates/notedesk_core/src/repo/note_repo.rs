//! SQLite table mapping for notes.

use super::sqlite::{SqliteRecord, SqliteRepository};
use crate::model::note::Note;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQLite-backed note repository.
pub type SqliteNoteRepository<'conn> = SqliteRepository<'conn, Note>;

impl SqliteRecord for Note {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &["title", "content"];
    const NAME_COLUMN: &'static str = "title";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            title: row.get("title")?,
            content: row.get("content")?,
        })
    }

    fn content_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.title.clone()),
            Value::Text(self.content.clone()),
        ]
    }
}
