//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage capability set every resource table offers.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Resource::validate()` before persistence.
//! - Absence on lookup is `Ok(None)`, never an error.
//! - `delete_by_id` is idempotent.
//! - `save` on an id-bearing resource never inserts; a missing row is a
//!   `RepoError::Conflict`.

use crate::db::DbError;
use crate::model::resource::{Resource, ResourceId, ResourceKind};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod note_repo;
pub mod sqlite;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for resource persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// An update targeted a row that no longer exists.
    Conflict {
        kind: ResourceKind,
        id: ResourceId,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict { kind, id } => {
                write!(f, "{kind} {id} was removed before the update was saved")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage capability set over a single resource table.
///
/// Implementations hold no business rules. Any storage engine may implement
/// it; services are generic over it.
pub trait Repository<T: Resource> {
    /// Returns every row in storage-native order.
    fn find_all(&self) -> RepoResult<Vec<T>>;

    /// Returns the row with `id`, or `None` when absent.
    fn find_by_id(&self, id: ResourceId) -> RepoResult<Option<T>>;

    /// Case-insensitive substring match on `Resource::name`. An empty
    /// fragment matches every row.
    fn find_by_name_contains(&self, fragment: &str) -> RepoResult<Vec<T>>;

    /// Inserts when `resource.id()` is `None`, otherwise updates that row.
    /// Returns the persisted copy.
    fn save(&self, resource: &T) -> RepoResult<T>;

    /// Removes the row with `id`. Missing rows are a no-op.
    fn delete_by_id(&self, id: ResourceId) -> RepoResult<()>;

    /// Total number of rows at call time.
    fn count(&self) -> RepoResult<u64>;

    /// Runs `work` as one atomic unit: its writes commit only when it
    /// returns `Ok`, and are rolled back otherwise.
    ///
    /// Calls must not be nested.
    fn atomically<R, E, F>(&self, work: F) -> Result<R, E>
    where
        F: FnOnce(&Self) -> Result<R, E>,
        E: From<RepoError>;
}
