//! Domain model for managed resources.
//!
//! # Responsibility
//! - Define the canonical `Note` and `User` records and their content shapes.
//! - Describe the shared `Resource` contract the generic repository and
//!   lifecycle code are written against.
//!
//! # Invariants
//! - `id` is `None` until the storage engine assigns one and never changes
//!   afterwards.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
pub mod resource;
pub mod user;
pub mod validation;
