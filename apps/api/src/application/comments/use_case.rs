use super::dto::{AddCommentRequest, AddCommentResponse};
use crate::{
    application::content::use_case::not_found,
    domain::{
        entry::{entity::EntryKind, repository::ContentRepository},
        identity::entity::Identity,
        shared::errors::DomainError,
        social::comment::Comment,
    },
};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

pub struct CommentUseCase {
    repository: Arc<dyn ContentRepository>,
}

impl CommentUseCase {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Appends a comment attributed to `identity`. Invalid text is rejected
    /// before the store is touched.
    #[instrument(skip(self, request, identity))]
    pub async fn add(
        &self,
        kind: EntryKind,
        id: Uuid,
        request: AddCommentRequest,
        identity: &Identity,
    ) -> Result<AddCommentResponse, DomainError> {
        let comment = Comment::compose(&request.text, identity, request.author.as_deref())?;

        let comments = self
            .repository
            .append_comment(kind, id, &comment)
            .await?
            .ok_or_else(|| not_found(kind))?;

        debug!(comment_id = %comment.id, total = comments.len(), "Comment appended");
        Ok(AddCommentResponse { comment, comments })
    }

    pub async fn list(&self, kind: EntryKind, id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.repository
            .find_by_id(kind, id)
            .await?
            .map(|entry| entry.comments)
            .ok_or_else(|| not_found(kind))
    }
}
