use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

use super::{content::delete_entry, uploads};
use crate::{
    application::content::dto::{CreateGalleryItemRequest, DeletedResponse},
    domain::entry::{
        entity::{Entry, EntryKind},
        media::MediaKind,
    },
    presentation::http::{errors::AppError, middleware::caller::caller_credentials, state::AppState},
};

pub async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, AppError> {
    Ok(Json(state.content.list(EntryKind::Gallery).await?))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Entry>, AppError> {
    Ok(Json(state.content.get(EntryKind::Gallery, id).await?))
}

/// Multipart fields: `title`, `description`, `image`.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let admin = state
        .identity
        .require_privileged(&caller_credentials(&headers))?;

    let mut request = CreateGalleryItemRequest::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "image" => {
                image = Some(
                    uploads::read_file_field(field, MediaKind::Image, &state.media_limits).await?,
                )
            }
            "title" => request.title = uploads::read_text_field(field).await?,
            "description" => request.description = uploads::read_text_field(field).await?,
            _ => {}
        }
    }

    let upload = uploads::validate(MediaKind::Image, image, &state.media_limits)?;
    let item = state
        .content
        .create_gallery_item(&admin, request, upload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn delete_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, AppError> {
    delete_entry(&state, &headers, EntryKind::Gallery, id).await
}
