//! Multipart helpers shared by the upload endpoints.

use axum::extract::multipart::Field;
use bytes::{Bytes, BytesMut};

use crate::{
    domain::entry::media::MediaKind,
    infrastructure::security::{
        MediaLimits, ValidatedUpload, media_validation::validate_upload,
    },
    presentation::http::errors::AppError,
};

/// Reads a file field chunk by chunk, failing as soon as the running total
/// crosses the ceiling for `kind`.
pub async fn read_file_field(
    mut field: Field<'_>,
    kind: MediaKind,
    limits: &MediaLimits,
) -> Result<(String, Bytes), AppError> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut buf = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
    {
        limits
            .check_size(kind, buf.len() + chunk.len())
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        buf.extend_from_slice(&chunk);
    }

    Ok((content_type, buf.freeze()))
}

pub async fn read_text_field(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read form field: {}", e)))
}

pub fn validate(
    kind: MediaKind,
    file: Option<(String, Bytes)>,
    limits: &MediaLimits,
) -> Result<ValidatedUpload, AppError> {
    let (content_type, data) = file.ok_or_else(|| {
        AppError::ValidationError(format!("Missing {} file", kind.as_str()))
    })?;
    validate_upload(kind, &content_type, data, limits)
        .map_err(|e| AppError::ValidationError(e.to_string()))
}
