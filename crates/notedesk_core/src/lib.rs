//! Core resource lifecycle logic for notedesk.
//!
//! Layers, leaf first: `db` (SQLite bootstrap), `repo` (storage capability
//! set), `service` (lifecycle rules), `api` (transport-facing boundary).

pub mod api;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteContent};
pub use model::resource::{Resource, ResourceId, ResourceKind};
pub use model::user::{User, UserContent};
pub use model::validation::{FieldViolation, ValidationError};
pub use repo::memory::InMemoryRepository;
pub use repo::note_repo::SqliteNoteRepository;
pub use repo::sqlite::{SqliteRecord, SqliteRepository};
pub use repo::user_repo::SqliteUserRepository;
pub use repo::{RepoError, RepoResult, Repository};
pub use service::error::{ServiceError, ServiceResult};
pub use service::lifecycle::ResourceLifecycle;
pub use service::note_service::NoteService;
pub use service::user_service::UserService;
pub use service::ExistencePolicy;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
