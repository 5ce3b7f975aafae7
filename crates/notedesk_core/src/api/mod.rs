//! HTTP boundary built on axum.
//!
//! # Responsibility
//! - Define request/response transfer shapes for notes and users.
//! - Route method + path pairs to service operations.
//! - Map service outcomes onto status codes and `ApiError` bodies.
//!
//! # Invariants
//! - Content is validated here before any service call.
//! - Handlers never panic; every failure becomes an `ApiError` body.
//! - Storage failures are reported as 500 without further classification.

pub mod dto;
pub mod error;
mod notes;
pub mod router;
pub mod state;
mod users;

pub use dto::{NoteDto, UserDto};
pub use error::ApiError;
pub use notes::NoteSearch;
pub use router::build_router;
pub use state::AppState;
pub use users::UserSearch;
