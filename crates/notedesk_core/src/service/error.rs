//! Service-level error taxonomy.

use crate::model::resource::{ResourceId, ResourceKind};
use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by resource services.
#[derive(Debug)]
pub enum ServiceError {
    /// Content failed structural constraints.
    Validation(ValidationError),
    /// A required resource does not exist.
    NotFound { kind: ResourceKind, id: ResourceId },
    /// The resource disappeared while an update was in flight.
    Conflict { kind: ResourceKind, id: ResourceId },
    /// Persistence-layer failure, surfaced unmodified.
    Repo(RepoError),
}

impl ServiceError {
    pub fn not_found(kind: ResourceKind, id: ResourceId) -> Self {
        Self::NotFound { kind, id }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found with id {id}"),
            Self::Conflict { kind, id } => write!(f, "{kind} {id} was modified concurrently"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Conflict { kind, id } => Self::Conflict { kind, id },
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
