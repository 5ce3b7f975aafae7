//! Route table, fallbacks and request logging.

use super::error::ApiError;
use super::state::AppState;
use super::{notes, users};
use crate::model::resource::ResourceId;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, Request};
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use std::time::Instant;

/// Builds the `/api` router over `state`.
///
/// ```text
/// /api/notes                       GET list, POST create
/// /api/notes/summary               GET plain-text count summary
/// /api/notes/titles/uppercase      GET uppercased titles
/// /api/notes/search?q=             GET title substring search
/// /api/notes/{id}                  GET, PUT, DELETE
///
/// /api/users                       GET list, POST create
/// /api/users/summary               GET plain-text count summary
/// /api/users/names/uppercase       GET uppercased names
/// /api/users/search?name=          GET name substring search
/// /api/users/{id}                  GET, PUT, DELETE
/// ```
///
/// Unknown paths answer 404 and known paths with an unsupported method
/// answer 405, both with an `ApiError` body.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/notes",
            get(notes::list)
                .post(notes::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/notes/summary",
            get(notes::summary).fallback(method_not_allowed),
        )
        .route(
            "/api/notes/titles/uppercase",
            get(notes::titles_uppercase).fallback(method_not_allowed),
        )
        .route(
            "/api/notes/search",
            get(notes::search).fallback(method_not_allowed),
        )
        .route(
            "/api/notes/{id}",
            get(notes::get_one)
                .put(notes::update)
                .delete(notes::delete)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/users",
            get(users::list)
                .post(users::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/users/summary",
            get(users::summary).fallback(method_not_allowed),
        )
        .route(
            "/api/users/names/uppercase",
            get(users::names_uppercase).fallback(method_not_allowed),
        )
        .route(
            "/api/users/search",
            get(users::search).fallback(method_not_allowed),
        )
        .route(
            "/api/users/{id}",
            get(users::get_one)
                .put(users::update)
                .delete(users::delete)
                .fallback(method_not_allowed),
        )
        .fallback(no_route)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!(
        "event=api_request module=api method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

async fn no_route(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND,
        format!("no route for {method} {}", uri.path()),
        uri.path(),
    )
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{method} is not supported on {}", uri.path()),
        uri.path(),
    )
}

/// Path id, rejecting non-numeric and non-positive values.
pub(super) fn resource_id(
    extracted: Result<Path<ResourceId>, PathRejection>,
    uri: &Uri,
) -> Result<ResourceId, ApiError> {
    match extracted {
        Ok(Path(id)) if id > 0 => Ok(id),
        Ok(Path(id)) => Err(ApiError::malformed(
            format!("`{id}` is not a valid id"),
            uri.path(),
        )),
        Err(rejection) => Err(ApiError::malformed(rejection.body_text(), uri.path())),
    }
}

pub(super) fn json_body<T>(
    extracted: Result<Json<T>, JsonRejection>,
    uri: &Uri,
) -> Result<T, ApiError> {
    extracted
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::malformed(rejection.body_text(), uri.path()))
}

pub(super) fn query<T>(
    extracted: Result<Query<T>, QueryRejection>,
    uri: &Uri,
) -> Result<T, ApiError> {
    extracted
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::malformed(rejection.body_text(), uri.path()))
}
