use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

use super::media::MediaReference;
use crate::domain::{
    shared::errors::DomainError,
    social::{comment::Comment, reaction::ReactionSet},
};

/// Which collection a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum EntryKind {
    Post,
    Gallery,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Post => "post",
            EntryKind::Gallery => "gallery",
        }
    }

    /// Human label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Post => "Post",
            EntryKind::Gallery => "Image",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A journal post or a gallery image together with its comments and
/// reactions. `created_at` never changes after creation and comments are
/// only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Entry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub title: String,
    pub description: String,
    pub media: MediaReference,
    pub author_id: Option<Uuid>,
    pub comments: Vec<Comment>,
    pub reactions: ReactionSet,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new_post(
        title: String,
        description: String,
        media: MediaReference,
        author_id: Uuid,
    ) -> Self {
        Self::new(EntryKind::Post, title, description, media, Some(author_id))
    }

    pub fn new_gallery_item(title: String, description: String, media: MediaReference) -> Self {
        Self::new(EntryKind::Gallery, title, description, media, None)
    }

    fn new(
        kind: EntryKind,
        title: String,
        description: String,
        media: MediaReference,
        author_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            title,
            description,
            media,
            author_id,
            comments: Vec::new(),
            reactions: ReactionSet::default(),
            created_at: Utc::now(),
        }
    }
}

impl FromStr for EntryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(EntryKind::Post),
            "gallery" => Ok(EntryKind::Gallery),
            other => Err(DomainError::InfrastructureError(format!(
                "Unknown entry kind '{}'",
                other
            ))),
        }
    }
}
