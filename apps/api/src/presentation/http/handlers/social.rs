use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

use crate::{
    application::{
        comments::dto::{AddCommentRequest, AddCommentResponse},
        reactions::dto::{ReactionResponse, ToggleReactionRequest},
    },
    domain::{entry::entity::EntryKind, social::comment::Comment},
    presentation::http::{
        errors::AppError,
        middleware::caller::{anonymous_key, caller_credentials},
        state::AppState,
    },
};

async fn toggle_reaction(
    state: AppState,
    kind: EntryKind,
    id: Uuid,
    headers: HeaderMap,
    body: ToggleReactionRequest,
) -> Result<Json<ReactionResponse>, AppError> {
    let identity = state.identity.resolve(&caller_credentials(&headers));
    let response = state
        .reactions
        .toggle(kind, id, body, &identity, &anonymous_key(&headers))
        .await?;
    Ok(Json(response))
}

async fn add_comment(
    state: AppState,
    kind: EntryKind,
    id: Uuid,
    headers: HeaderMap,
    body: AddCommentRequest,
) -> Result<(StatusCode, Json<AddCommentResponse>), AppError> {
    let identity = state.identity.resolve(&caller_credentials(&headers));
    let response = state.comments.add(kind, id, body, &identity).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn toggle_post_reaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<ToggleReactionRequest>,
) -> Result<Json<ReactionResponse>, AppError> {
    toggle_reaction(state, EntryKind::Post, id, headers, body).await
}

pub async fn toggle_image_reaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<ToggleReactionRequest>,
) -> Result<Json<ReactionResponse>, AppError> {
    toggle_reaction(state, EntryKind::Gallery, id, headers, body).await
}

pub async fn add_post_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<AddCommentResponse>), AppError> {
    add_comment(state, EntryKind::Post, id, headers, body).await
}

pub async fn add_image_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<AddCommentResponse>), AppError> {
    add_comment(state, EntryKind::Gallery, id, headers, body).await
}

pub async fn get_post_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.list(EntryKind::Post, id).await?))
}

pub async fn get_image_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments.list(EntryKind::Gallery, id).await?))
}
