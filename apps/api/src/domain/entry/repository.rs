use super::entity::{Entry, EntryKind};
use crate::domain::{
    shared::errors::DomainError,
    social::{
        comment::Comment,
        reaction::{ReactionKind, ReactionSet, Reactor},
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Document store for posts and gallery items.
///
/// `toggle_reaction` and `append_comment` must apply their change
/// atomically with respect to other writers of the same document. Both
/// return `None` when the document does not exist.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fails with [`media_in_use`] when another entry already holds the
    /// same media storage key.
    async fn create(&self, entry: &Entry) -> Result<Entry, DomainError>;
    /// Newest first.
    async fn find_all(&self, kind: EntryKind) -> Result<Vec<Entry>, DomainError>;
    async fn find_by_id(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, DomainError>;
    /// Returns the removed document.
    async fn delete(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, DomainError>;
    async fn toggle_reaction(
        &self,
        kind: EntryKind,
        id: Uuid,
        reaction: ReactionKind,
        reactor: &Reactor,
    ) -> Result<Option<ReactionSet>, DomainError>;
    async fn append_comment(
        &self,
        kind: EntryKind,
        id: Uuid,
        comment: &Comment,
    ) -> Result<Option<Vec<Comment>>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

pub fn media_in_use() -> DomainError {
    DomainError::ValidationError("Media is already attached to another entry".to_string())
}
