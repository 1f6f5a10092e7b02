use crate::{
    domain::{
        entry::media::{MediaKind, MediaReference},
        shared::errors::DomainError,
    },
    infrastructure::{
        security::{
            MediaValidationError, ValidatedUpload, media_validation::uploaded_video_type,
        },
        storage::traits::StorageService,
    },
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Moves validated uploads into blob storage and removes them again.
///
/// Uploads reach this use case only after [`validate_upload`] has checked
/// their size, declared type and magic bytes, so storing is a single
/// `upload` call under a freshly generated key:
///
/// - images land under `images/<uuid>.<ext>`
/// - videos land under `videos/<uuid>.<ext>`
///
/// Removal is best-effort. A failed delete is logged and swallowed so that
/// deleting a document never fails because its file is already gone.
///
/// [`validate_upload`]: crate::infrastructure::security::media_validation::validate_upload
#[derive(Clone)]
pub struct MediaUseCase {
    storage: Arc<dyn StorageService>,
}

impl MediaUseCase {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        info!("Initializing MediaUseCase");
        Self { storage }
    }

    /// Stores `upload` and returns a reference carrying its URL, storage
    /// key, content type, size and checksum.
    ///
    /// # Errors
    /// `InfrastructureError` when the storage backend rejects the write.
    #[instrument(skip(self, upload), fields(kind = %upload.kind, size = upload.data.len()))]
    pub async fn store(&self, upload: ValidatedUpload) -> Result<MediaReference, DomainError> {
        let prefix = match upload.kind {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
            MediaKind::Youtube => {
                return Err(DomainError::ValidationError(
                    "YouTube links cannot be uploaded".into(),
                ));
            }
        };
        let key = format!("{}/{}.{}", prefix, Uuid::now_v7(), upload.extension);
        let size_bytes = upload.data.len() as u64;

        let url = self
            .storage
            .upload(&key, upload.data.to_vec(), &upload.content_type)
            .await
            .map_err(|e| {
                error!("Storage upload failed for {}: {:#}", key, e);
                DomainError::InfrastructureError(format!("Failed to store media: {}", e))
            })?;

        debug!(%key, %url, "Stored media");
        Ok(MediaReference {
            kind: upload.kind,
            url,
            storage_key: Some(key),
            content_type: Some(upload.content_type),
            size_bytes: Some(size_bytes),
            checksum: Some(upload.checksum),
        })
    }

    /// Rebuilds a client-supplied video reference from its storage key.
    ///
    /// Only keys issued by [`store`](Self::store) for videos are accepted,
    /// and `url` must be the one storage serves for that key. Content type
    /// follows from the key; size and checksum are carried over as
    /// informational metadata.
    pub fn uploaded_video(&self, reference: &MediaReference) -> Result<MediaReference, DomainError> {
        if reference.kind != MediaKind::Video {
            return Err(DomainError::ValidationError(
                "Post media must be a video".into(),
            ));
        }
        let key = reference
            .storage_key
            .as_deref()
            .ok_or(MediaValidationError::UnknownUpload)?;
        let content_type = uploaded_video_type(key)?;
        let url = self.storage.get_url(key);
        if reference.url.trim() != url {
            debug!(%key, claimed = %reference.url, "Video URL does not match its key");
            return Err(MediaValidationError::UnknownUpload.into());
        }

        Ok(MediaReference {
            kind: MediaKind::Video,
            url,
            storage_key: Some(key.to_string()),
            content_type: Some(content_type.to_string()),
            size_bytes: reference.size_bytes,
            checksum: reference
                .checksum
                .clone()
                .filter(|c| c.len() == 64 && c.bytes().all(|b| b.is_ascii_hexdigit())),
        })
    }

    /// Deletes the stored object behind `media`, if it has one.
    pub async fn remove(&self, media: &MediaReference) {
        let Some(key) = media.storage_key.as_deref() else {
            return;
        };
        if let Err(e) = self.storage.delete(key).await {
            warn!("Failed to remove stored media {}: {:#}", key, e);
        }
    }
}
