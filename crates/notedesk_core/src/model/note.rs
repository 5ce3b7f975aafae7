//! Note domain model.
//!
//! # Invariants
//! - `title` is never blank once validated.
//! - `content` may be empty.

use super::resource::{Resource, ResourceId, ResourceKind};
use super::validation::{ValidationError, Validator};
use serde::{Deserialize, Serialize};

pub const NOTE_TITLE_MAX_CHARS: usize = 200;
pub const NOTE_CONTENT_MAX_CHARS: usize = 10_000;

/// Persisted (or about to be persisted) note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<ResourceId>,
    pub title: String,
    pub content: String,
}

/// Caller-supplied note fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent {
    pub title: String,
    pub content: String,
}

impl NoteContent {
    /// Trims `title`; `content` is kept verbatim.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let title: String = title.into();
        Self {
            title: title.trim().to_string(),
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .not_blank("title", &self.title)
            .max_chars("title", &self.title, NOTE_TITLE_MAX_CHARS)
            .max_chars("content", &self.content, NOTE_CONTENT_MAX_CHARS)
            .finish()
    }
}

impl Resource for Note {
    type Content = NoteContent;

    const KIND: ResourceKind = ResourceKind::NOTE;

    fn id(&self) -> Option<ResourceId> {
        self.id
    }

    fn with_id(self, id: ResourceId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn from_content(content: NoteContent) -> Self {
        Self {
            id: None,
            title: content.title,
            content: content.content,
        }
    }

    fn apply_content(&mut self, content: NoteContent) {
        self.title = content.title;
        self.content = content.content;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        NoteContent {
            title: self.title.clone(),
            content: self.content.clone(),
        }
        .validate()
    }
}
