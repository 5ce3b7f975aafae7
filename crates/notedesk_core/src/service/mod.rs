//! Resource use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into lifecycle-level APIs.
//! - Translate absence into domain "not found" outcomes per resource policy.
//! - Keep transport layers decoupled from storage details.

pub mod error;
pub mod lifecycle;
pub mod note_service;
pub mod summary;
pub mod user_service;

/// How a resource type treats a lookup for an id that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistencePolicy {
    /// Absence is an ordinary `None` result; deletes are idempotent.
    Optional,
    /// Absence is `ServiceError::NotFound`; deletes of missing ids fail.
    MustExist,
}
