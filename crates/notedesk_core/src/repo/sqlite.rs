//! Generic SQLite repository over one resource table.
//!
//! # Responsibility
//! - Implement `Repository` for every type with a `SqliteRecord` mapping.
//! - Provide the transactional boundary used by multi-step service calls.
//!
//! # Invariants
//! - Rows are returned ordered by `id ASC`.
//! - `atomically` opens an `IMMEDIATE` transaction, so concurrent writers
//!   block on the busy timeout instead of interleaving.
//! - Substring search treats `%` and `_` literally and folds case with
//!   Unicode rules (`casefold`), matching `InMemoryRepository`.

use super::{RepoError, RepoResult, Repository};
use crate::db::functions::register_functions;
use crate::db::schema::ensure_table_ready;
use crate::model::resource::{Resource, ResourceId};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::marker::PhantomData;

/// Table mapping for a resource stored in SQLite.
///
/// Every table has an `INTEGER PRIMARY KEY AUTOINCREMENT` column named `id`
/// plus the content columns listed in `COLUMNS`.
pub trait SqliteRecord: Resource {
    const TABLE: &'static str;
    /// Content columns in bind order, excluding `id`.
    const COLUMNS: &'static [&'static str];
    /// Column backing `Resource::name`.
    const NAME_COLUMN: &'static str;

    /// Builds a resource from a row selected with `id` + `COLUMNS`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Content values in `COLUMNS` order.
    fn content_values(&self) -> Vec<Value>;
}

/// SQLite-backed repository for one resource type.
pub struct SqliteRepository<'conn, T> {
    conn: &'conn Connection,
    _record: PhantomData<T>,
}

impl<'conn, T: SqliteRecord> SqliteRepository<'conn, T> {
    /// Binds to a migrated connection and registers `casefold` on it.
    ///
    /// Fails with `DbError::SchemaNotReady` when the mapped table or any
    /// mapped column is missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, T::TABLE, T::COLUMNS)?;
        register_functions(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
    }

    fn query_list(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(T::from_row(row)?);
        }
        Ok(items)
    }

    fn insert(&self, resource: &T) -> RepoResult<T> {
        let placeholders = (1..=T::COLUMNS.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            T::TABLE,
            T::COLUMNS.join(", ")
        );
        self.conn
            .execute(&sql, params_from_iter(resource.content_values()))?;
        let id = self.conn.last_insert_rowid();
        Ok(resource.clone().with_id(id))
    }

    fn update(&self, id: ResourceId, resource: &T) -> RepoResult<T> {
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, column)| format!("{column} = ?{}", idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            T::TABLE,
            T::COLUMNS.len() + 1
        );
        let mut bind_values = resource.content_values();
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::Conflict { kind: T::KIND, id });
        }
        Ok(resource.clone())
    }
}

impl<T: SqliteRecord> Repository<T> for SqliteRepository<'_, T> {
    fn find_all(&self) -> RepoResult<Vec<T>> {
        let sql = format!("{} ORDER BY id ASC;", Self::select_sql());
        self.query_list(&sql, Vec::new())
    }

    fn find_by_id(&self, id: ResourceId) -> RepoResult<Option<T>> {
        let sql = format!("{} WHERE id = ?1;", Self::select_sql());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(T::from_row(row)?));
        }
        Ok(None)
    }

    fn find_by_name_contains(&self, fragment: &str) -> RepoResult<Vec<T>> {
        let sql = format!(
            "{} WHERE instr(casefold({}), casefold(?1)) > 0 ORDER BY id ASC;",
            Self::select_sql(),
            T::NAME_COLUMN
        );
        self.query_list(&sql, vec![Value::Text(fragment.to_string())])
    }

    fn save(&self, resource: &T) -> RepoResult<T> {
        resource.validate()?;
        match resource.id() {
            None => self.insert(resource),
            Some(id) => self.update(id, resource),
        }
    }

    fn delete_by_id(&self, id: ResourceId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", T::TABLE), [id])?;
        debug!(
            "event=row_delete module=repo table={} id={} removed={}",
            T::TABLE,
            id,
            changed
        );
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }

    fn atomically<R, E, F>(&self, work: F) -> Result<R, E>
    where
        F: FnOnce(&Self) -> Result<R, E>,
        E: From<RepoError>,
    {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        match work(self) {
            Ok(value) => {
                tx.commit().map_err(RepoError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=tx_rollback module=repo status=error table={} error={}",
                        T::TABLE,
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }
}
