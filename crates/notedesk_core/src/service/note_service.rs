//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/read/update/delete APIs plus derived views
//!   (summary text, uppercase titles, title search).
//!
//! # Invariants
//! - Notes follow `ExistencePolicy::Optional`: `get_note_by_id` returns
//!   `None` for unknown ids and `delete_note` is idempotent.
//! - `update_note` still fails with `NotFound`; it never creates.

use super::error::ServiceResult;
use super::lifecycle::ResourceLifecycle;
use super::ExistencePolicy;
use crate::model::note::{Note, NoteContent};
use crate::model::resource::ResourceId;
use crate::repo::Repository;

/// Note service facade over repository implementations.
pub struct NoteService<R: Repository<Note>> {
    lifecycle: ResourceLifecycle<Note, R>,
}

impl<R: Repository<Note>> NoteService<R> {
    pub const POLICY: ExistencePolicy = ExistencePolicy::Optional;

    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            lifecycle: ResourceLifecycle::new(repo),
        }
    }

    pub fn create_note(&self, content: NoteContent) -> ServiceResult<Note> {
        self.lifecycle.create(content)
    }

    pub fn get_all_notes(&self) -> ServiceResult<Vec<Note>> {
        self.lifecycle.get_all()
    }

    /// Gets one note by id; `None` when it does not exist.
    pub fn get_note_by_id(&self, id: ResourceId) -> ServiceResult<Option<Note>> {
        self.lifecycle.find(id)
    }

    /// Replaces title and content of an existing note.
    pub fn update_note(&self, id: ResourceId, content: NoteContent) -> ServiceResult<Note> {
        self.lifecycle.update(id, content)
    }

    /// Deletes a note. Unknown ids are ignored.
    pub fn delete_note(&self, id: ResourceId) -> ServiceResult<()> {
        self.lifecycle.delete_idempotent(id)
    }

    /// Notes whose title contains `fragment`, ignoring case.
    pub fn search_notes(&self, fragment: &str) -> ServiceResult<Vec<Note>> {
        self.lifecycle.search(fragment)
    }

    pub fn get_notes_summary(&self) -> ServiceResult<String> {
        self.lifecycle.summarize()
    }

    pub fn get_all_titles_uppercase(&self) -> ServiceResult<Vec<String>> {
        self.lifecycle.uppercase_names()
    }
}
