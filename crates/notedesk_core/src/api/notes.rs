//! `/api/notes` handlers.
//!
//! Notes follow the optional-existence policy: reading a missing id is a
//! 404 built here, deleting one is a silent 204.

use super::dto::NoteDto;
use super::error::ApiError;
use super::router::{json_body, query, resource_id};
use super::state::AppState;
use crate::model::resource::{ResourceId, ResourceKind};
use crate::service::error::ServiceError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use serde::Deserialize;

/// Query parameters for `GET /api/notes/search`.
#[derive(Debug, Default, Deserialize)]
pub struct NoteSearch {
    /// Title fragment; absent or empty matches every note.
    #[serde(default)]
    pub q: String,
}

pub(super) async fn list(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Vec<NoteDto>>, ApiError> {
    let notes = state
        .notes(uri.path(), |service| service.get_all_notes())
        .await?;
    Ok(Json(notes.into_iter().map(NoteDto::from).collect()))
}

pub(super) async fn create(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Json<NoteDto>, JsonRejection>,
) -> Result<Json<NoteDto>, ApiError> {
    let content = json_body(body, &uri)?
        .into_content()
        .map_err(|err| ApiError::validation(&err, uri.path()))?;
    let saved = state
        .notes(uri.path(), move |service| service.create_note(content))
        .await?;
    Ok(Json(NoteDto::from(saved)))
}

pub(super) async fn get_one(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<ResourceId>, PathRejection>,
) -> Result<Json<NoteDto>, ApiError> {
    let id = resource_id(id, &uri)?;
    match state
        .notes(uri.path(), move |service| service.get_note_by_id(id))
        .await?
    {
        Some(note) => Ok(Json(NoteDto::from(note))),
        None => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            ServiceError::not_found(ResourceKind::NOTE, id).to_string(),
            uri.path(),
        )),
    }
}

pub(super) async fn update(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<ResourceId>, PathRejection>,
    body: Result<Json<NoteDto>, JsonRejection>,
) -> Result<Json<NoteDto>, ApiError> {
    let id = resource_id(id, &uri)?;
    let content = json_body(body, &uri)?
        .into_content()
        .map_err(|err| ApiError::validation(&err, uri.path()))?;
    let updated = state
        .notes(uri.path(), move |service| service.update_note(id, content))
        .await?;
    Ok(Json(NoteDto::from(updated)))
}

pub(super) async fn delete(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<ResourceId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = resource_id(id, &uri)?;
    state
        .notes(uri.path(), move |service| service.delete_note(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn summary(State(state): State<AppState>, uri: Uri) -> Result<String, ApiError> {
    state
        .notes(uri.path(), |service| service.get_notes_summary())
        .await
}

pub(super) async fn titles_uppercase(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Vec<String>>, ApiError> {
    let titles = state
        .notes(uri.path(), |service| service.get_all_titles_uppercase())
        .await?;
    Ok(Json(titles))
}

pub(super) async fn search(
    State(state): State<AppState>,
    uri: Uri,
    params: Result<Query<NoteSearch>, QueryRejection>,
) -> Result<Json<Vec<NoteDto>>, ApiError> {
    let NoteSearch { q } = query(params, &uri)?;
    let notes = state
        .notes(uri.path(), move |service| service.search_notes(&q))
        .await?;
    Ok(Json(notes.into_iter().map(NoteDto::from).collect()))
}
