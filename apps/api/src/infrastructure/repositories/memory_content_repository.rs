//! In-memory document store for tests and database-less runs.
//!
//! All documents live in a `HashMap` behind a `RwLock`. Every mutation runs
//! under the write lock, so reaction toggles and comment appends are atomic
//! with respect to each other. Data is lost when the store is dropped.

use crate::domain::{
    entry::{
        entity::{Entry, EntryKind},
        repository::{ContentRepository, media_in_use},
    },
    shared::errors::DomainError,
    social::{
        comment::Comment,
        reaction::{ReactionKind, ReactionSet, Reactor},
    },
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    entries: RwLock<HashMap<Uuid, Entry>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Entry>>, DomainError> {
        self.entries
            .read()
            .map_err(|e| DomainError::InfrastructureError(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Entry>>, DomainError> {
        self.entries
            .write()
            .map_err(|e| DomainError::InfrastructureError(format!("lock poisoned: {e}")))
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn create(&self, entry: &Entry) -> Result<Entry, DomainError> {
        let mut entries = self.write()?;
        if entries.contains_key(&entry.id) {
            return Err(DomainError::InfrastructureError(format!(
                "Duplicate entry id {}",
                entry.id
            )));
        }
        if let Some(key) = entry.media.storage_key.as_deref() {
            if entries
                .values()
                .any(|e| e.media.storage_key.as_deref() == Some(key))
            {
                return Err(media_in_use());
            }
        }
        entries.insert(entry.id, entry.clone());
        Ok(entry.clone())
    }

    async fn find_all(&self, kind: EntryKind) -> Result<Vec<Entry>, DomainError> {
        let mut found: Vec<Entry> = self
            .read()?
            .values()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn find_by_id(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, DomainError> {
        Ok(self.read()?.get(&id).filter(|e| e.kind == kind).cloned())
    }

    async fn delete(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, DomainError> {
        let mut entries = self.write()?;
        if entries.get(&id).is_some_and(|e| e.kind == kind) {
            return Ok(entries.remove(&id));
        }
        Ok(None)
    }

    async fn toggle_reaction(
        &self,
        kind: EntryKind,
        id: Uuid,
        reaction: ReactionKind,
        reactor: &Reactor,
    ) -> Result<Option<ReactionSet>, DomainError> {
        let mut entries = self.write()?;
        Ok(entries
            .get_mut(&id)
            .filter(|e| e.kind == kind)
            .map(|entry| {
                entry.reactions.toggle(reaction, reactor);
                entry.reactions.clone()
            }))
    }

    async fn append_comment(
        &self,
        kind: EntryKind,
        id: Uuid,
        comment: &Comment,
    ) -> Result<Option<Vec<Comment>>, DomainError> {
        let mut entries = self.write()?;
        Ok(entries
            .get_mut(&id)
            .filter(|e| e.kind == kind)
            .map(|entry| {
                entry.comments.push(comment.clone());
                entry.comments.clone()
            }))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.read().map(|_| ())
    }
}
