use super::dto::{CreateGalleryItemRequest, CreatePostRequest};
use crate::{
    application::media::use_case::MediaUseCase,
    domain::{
        entry::{
            entity::{Entry, EntryKind},
            media::{MediaKind, MediaReference},
            repository::ContentRepository,
            value_objects::{EntryText, YoutubeUrl},
        },
        identity::entity::Principal,
        shared::errors::DomainError,
    },
    infrastructure::security::ValidatedUpload,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Create, read and delete operations over posts and gallery items.
///
/// Creation and deletion take a [`Principal`], which only the privilege
/// check in the identity resolver can produce.
pub struct ContentUseCase {
    repository: Arc<dyn ContentRepository>,
    media: MediaUseCase,
}

impl ContentUseCase {
    pub fn new(repository: Arc<dyn ContentRepository>, media: MediaUseCase) -> Self {
        Self { repository, media }
    }

    #[instrument(skip(self, request), fields(admin = %admin.username))]
    pub async fn create_post(
        &self,
        admin: &Principal,
        request: CreatePostRequest,
    ) -> Result<Entry, DomainError> {
        let text = EntryText::new(&request.title, &request.description)?;

        let media = match (request.youtube_url, request.video) {
            (Some(url), None) => MediaReference::youtube(YoutubeUrl::new(url)?.value),
            (None, Some(video)) => self.media.uploaded_video(&video)?,
            (Some(_), Some(_)) => {
                return Err(DomainError::ValidationError(
                    "Provide either a YouTube link or an uploaded video, not both".into(),
                ));
            }
            (None, None) => {
                return Err(DomainError::ValidationError(
                    "A YouTube link or an uploaded video is required".into(),
                ));
            }
        };

        let entry = Entry::new_post(text.title, text.description, media, admin.id);
        let saved = self.repository.create(&entry).await?;
        info!(post_id = %saved.id, "Post created");
        Ok(saved)
    }

    /// Stores `image` and creates the gallery item pointing at it. The
    /// stored file is removed again if the document cannot be saved.
    #[instrument(skip(self, request, image), fields(admin = %admin.username))]
    pub async fn create_gallery_item(
        &self,
        admin: &Principal,
        request: CreateGalleryItemRequest,
        image: ValidatedUpload,
    ) -> Result<Entry, DomainError> {
        let text = EntryText::new(&request.title, &request.description)?;
        if image.kind != MediaKind::Image {
            return Err(DomainError::ValidationError(
                "Gallery items must be images".into(),
            ));
        }

        let media = self.media.store(image).await?;
        let entry = Entry::new_gallery_item(text.title, text.description, media);

        match self.repository.create(&entry).await {
            Ok(saved) => {
                info!(image_id = %saved.id, "Gallery image created");
                Ok(saved)
            }
            Err(e) => {
                warn!("Rolling back stored image for {}: {}", entry.id, e);
                self.media.remove(&entry.media).await;
                Err(e)
            }
        }
    }

    pub async fn list(&self, kind: EntryKind) -> Result<Vec<Entry>, DomainError> {
        self.repository.find_all(kind).await
    }

    pub async fn get(&self, kind: EntryKind, id: Uuid) -> Result<Entry, DomainError> {
        self.repository
            .find_by_id(kind, id)
            .await?
            .ok_or_else(|| not_found(kind))
    }

    /// Hard delete. Comments and reactions go with the document; stored
    /// media is removed afterwards on a best-effort basis.
    #[instrument(skip(self), fields(admin = %admin.username))]
    pub async fn delete(
        &self,
        admin: &Principal,
        kind: EntryKind,
        id: Uuid,
    ) -> Result<Entry, DomainError> {
        let removed = self
            .repository
            .delete(kind, id)
            .await?
            .ok_or_else(|| not_found(kind))?;
        self.media.remove(&removed.media).await;
        info!(%id, %kind, "Entry deleted");
        Ok(removed)
    }
}

pub(crate) fn not_found(kind: EntryKind) -> DomainError {
    DomainError::NotFound(format!("{} not found", kind.label()))
}
