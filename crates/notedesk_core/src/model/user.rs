//! User domain model.

use super::resource::{Resource, ResourceId, ResourceKind};
use super::validation::{ValidationError, Validator};
use serde::{Deserialize, Serialize};

pub const USER_NAME_MAX_CHARS: usize = 100;

/// Persisted (or about to be persisted) user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<ResourceId>,
    pub name: String,
    pub email: String,
}

/// Caller-supplied user fields, with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContent {
    pub name: String,
    pub email: String,
}

impl UserContent {
    /// Trims both fields, so what gets validated is what gets stored.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let (name, email): (String, String) = (name.into(), email.into());
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .not_blank("name", &self.name)
            .max_chars("name", &self.name, USER_NAME_MAX_CHARS)
            .email("email", &self.email)
            .finish()
    }
}

impl Resource for User {
    type Content = UserContent;

    const KIND: ResourceKind = ResourceKind::USER;

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
        &self.name
    }

    fn from_content(content: UserContent) -> Self {
        Self {
            id: None,
            name: content.name,
            email: content.email,
        }
    }

    fn apply_content(&mut self, content: UserContent) {
        self.name = content.name;
        self.email = content.email;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        UserContent {
            name: self.name.clone(),
            email: self.email.clone(),
        }
        .validate()
    }
}
