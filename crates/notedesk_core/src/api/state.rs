//! Shared handler state: one SQLite connection behind a mutex.

use super::error::ApiError;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::service::error::ServiceResult;
use crate::service::note_service::NoteService;
use crate::service::user_service::UserService;
use axum::http::StatusCode;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// State available to every handler via `State<AppState>`.
///
/// Cheap to clone. Services are built per request over the shared
/// connection and dropped when the request finishes.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection, e.g. from `db::open_db`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `work` against a note service on a blocking worker thread.
    pub async fn notes<T, F>(&self, path: &str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> ServiceResult<T> + Send + 'static,
    {
        self.run(path, move |conn| {
            let service = NoteService::new(SqliteNoteRepository::try_new(conn)?);
            work(&service)
        })
        .await
    }

    /// Runs `work` against a user service on a blocking worker thread.
    pub async fn users<T, F>(&self, path: &str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&UserService<SqliteUserRepository<'_>>) -> ServiceResult<T> + Send + 'static,
    {
        self.run(path, move |conn| {
            let service = UserService::new(SqliteUserRepository::try_new(conn)?);
            work(&service)
        })
        .await
    }

    async fn run<T, F>(&self, path: &str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let task_path = path.to_string();
        let joined = tokio::task::spawn_blocking(move || {
            // A panicked request leaves no open transaction: `Transaction`
            // rolls back on drop.
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            work(&*guard).map_err(|err| ApiError::from_service(&err, &task_path))
        })
        .await;

        joined.unwrap_or_else(|join_err| {
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("request worker failed: {join_err}"),
                path,
            ))
        })
    }
}
