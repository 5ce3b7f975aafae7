//! Request/response transfer shapes.
//!
//! `id` is optional on input and always present on output. Any `id` sent
//! with an update body is ignored; the path id wins.

use crate::model::note::{Note, NoteContent};
use crate::model::resource::ResourceId;
use crate::model::user::{User, UserContent};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteDto {
    /// Validates the payload and strips it down to content fields.
    pub fn into_content(self) -> Result<NoteContent, ValidationError> {
        let content = NoteContent::new(self.title, self.content);
        content.validate()?;
        Ok(content)
    }
}

impl From<Note> for NoteDto {
    fn from(value: Note) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl UserDto {
    pub fn into_content(self) -> Result<UserContent, ValidationError> {
        let content = UserContent::new(self.name, self.email);
        content.validate()?;
        Ok(content)
    }
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}
