use axum::{
    Json,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
};

use super::uploads;
use crate::{
    application::media::dto::UploadedMediaResponse,
    domain::entry::media::MediaKind,
    presentation::http::{errors::AppError, middleware::caller::caller_credentials, state::AppState},
};

/// Multipart field: `video`.
pub async fn upload_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedMediaResponse>), AppError> {
    let admin = state
        .identity
        .require_privileged(&caller_credentials(&headers))?;

    let mut video = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("video") {
            video = Some(
                uploads::read_file_field(field, MediaKind::Video, &state.media_limits).await?,
            );
        }
    }

    let upload = uploads::validate(MediaKind::Video, video, &state.media_limits)?;
    let media = state.media.store(upload).await?;
    tracing::info!(admin = %admin.username, url = %media.url, "Video uploaded");
    Ok((StatusCode::CREATED, Json(UploadedMediaResponse { media })))
}
