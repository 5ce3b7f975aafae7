//! `/api/users` handlers.

use super::dto::UserDto;
use super::error::ApiError;
use super::router::{json_body, query, resource_id};
use super::state::AppState;
use crate::model::resource::ResourceId;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use serde::Deserialize;

/// Query parameters for `GET /api/users/search`.
#[derive(Debug, Default, Deserialize)]
pub struct UserSearch {
    #[serde(default)]
    pub name: String,
}

pub(super) async fn list(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state
        .users(uri.path(), |service| service.get_all_users())
        .await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

pub(super) async fn create(
    State(state): State<AppState>,
    uri: Uri,
    body: Result<Json<UserDto>, JsonRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let content = json_body(body, &uri)?
        .into_content()
        .map_err(|err| ApiError::validation(&err, uri.path()))?;
    let saved = state
        .users(uri.path(), move |service| service.create_user(content))
        .await?;
    Ok(Json(UserDto::from(saved)))
}

pub(super) async fn get_one(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<ResourceId>, PathRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let id = resource_id(id, &uri)?;
    let user = state
        .users(uri.path(), move |service| service.get_user_by_id(id))
        .await?;
    Ok(Json(UserDto::from(user)))
}

pub(super) async fn update(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<ResourceId>, PathRejection>,
    body: Result<Json<UserDto>, JsonRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let id = resource_id(id, &uri)?;
    let content = json_body(body, &uri)?
        .into_content()
        .map_err(|err| ApiError::validation(&err, uri.path()))?;
    let updated = state
        .users(uri.path(), move |service| service.update_user(id, content))
        .await?;
    Ok(Json(UserDto::from(updated)))
}

pub(super) async fn delete(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<ResourceId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = resource_id(id, &uri)?;
    state
        .users(uri.path(), move |service| service.delete_user(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn summary(State(state): State<AppState>, uri: Uri) -> Result<String, ApiError> {
    state
        .users(uri.path(), |service| service.get_users_summary())
        .await
}

pub(super) async fn names_uppercase(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Vec<String>>, ApiError> {
    let names = state
        .users(uri.path(), |service| service.get_all_names_uppercase())
        .await?;
    Ok(Json(names))
}

pub(super) async fn search(
    State(state): State<AppState>,
    uri: Uri,
    params: Result<Query<UserSearch>, QueryRejection>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let UserSearch { name } = query(params, &uri)?;
    let users = state
        .users(uri.path(), move |service| service.search_by_name(&name))
        .await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}
