//! Error body returned by the HTTP boundary.

use crate::model::validation::ValidationError;
use crate::service::error::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use log::error;
use serde::Serialize;

/// Serialized failure response.
///
/// `error` is a short category; `message` carries the detail, with field
/// violations joined by `"; "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    pub path: String,
}

impl ApiError {
    /// Error whose category is the status' reason phrase.
    pub fn new(status: StatusCode, message: impl Into<String>, path: &str) -> Self {
        Self::categorized(
            status,
            status.canonical_reason().unwrap_or("Error"),
            message,
            path,
        )
    }

    pub fn validation(err: &ValidationError, path: &str) -> Self {
        Self::categorized(StatusCode::BAD_REQUEST, "Validation Error", err.to_string(), path)
    }

    /// Unreadable input: bad JSON, wrong content type, non-numeric id.
    pub fn malformed(message: impl Into<String>, path: &str) -> Self {
        Self::categorized(StatusCode::BAD_REQUEST, "Malformed Request", message, path)
    }

    pub fn from_service(err: &ServiceError, path: &str) -> Self {
        match err {
            ServiceError::Validation(inner) => Self::validation(inner, path),
            ServiceError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string(), path),
            ServiceError::Conflict { .. } => Self::new(StatusCode::CONFLICT, err.to_string(), path),
            ServiceError::Repo(inner) => {
                error!(
                    "event=api_storage_failure module=api status=error path={} error={}",
                    path, inner
                );
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), path)
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn categorized(
        status: StatusCode,
        error: &'static str,
        message: impl Into<String>,
        path: &str,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error,
            message: message.into(),
            path: path.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use crate::model::resource::ResourceKind;
    use crate::repo::RepoError;
    use crate::service::error::ServiceError;
    use axum::http::StatusCode;

    #[test]
    fn service_errors_map_to_status_and_category() {
        let missing = ServiceError::not_found(ResourceKind::USER, 7);
        let err = ApiError::from_service(&missing, "/api/users/7");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error, "Not Found");
        assert_eq!(err.message, "user not found with id 7");

        let conflict = ServiceError::Conflict {
            kind: ResourceKind::NOTE,
            id: 3,
        };
        assert_eq!(ApiError::from_service(&conflict, "/").status, 409);

        let storage = ServiceError::from(RepoError::InvalidData("bad row".to_string()));
        let err = ApiError::from_service(&storage, "/api/notes");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Internal Server Error");
    }

    #[test]
    fn body_carries_timestamp_and_path() {
        let err = ApiError::malformed("request body is required", "/api/notes");
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["status"], 400);
        assert_eq!(body["error"], "Malformed Request");
        assert_eq!(body["path"], "/api/notes");
        let stamp = body["timestamp"].as_str().expect("timestamp should be a string");
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }
}
