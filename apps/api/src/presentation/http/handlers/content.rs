use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

use crate::{
    application::content::dto::{CreatePostRequest, DeletedResponse},
    domain::entry::entity::{Entry, EntryKind},
    presentation::http::{errors::AppError, middleware::caller::caller_credentials, state::AppState},
};

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, AppError> {
    Ok(Json(state.content.list(EntryKind::Post).await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Entry>, AppError> {
    Ok(Json(state.content.get(EntryKind::Post, id).await?))
}

pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let admin = state
        .identity
        .require_privileged(&caller_credentials(&headers))?;
    let post = state.content.create_post(&admin, body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    delete_entry(&state, &headers, EntryKind::Post, id).await
}

pub(super) async fn delete_entry(
    state: &AppState,
    headers: &HeaderMap,
    kind: EntryKind,
    id: Uuid,
) -> Result<Json<DeletedResponse>, AppError> {
    let admin = state
        .identity
        .require_privileged(&caller_credentials(headers))?;
    state.content.delete(&admin, kind, id).await?;
    Ok(Json(DeletedResponse {
        message: format!("{} deleted", kind.label()),
    }))
}
