use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::{identity::entity::Identity, shared::errors::DomainError};

pub const MAX_COMMENT_CHARS: usize = 500;
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;
pub const DEFAULT_GUEST_NAME: &str = "Guest";

/// Who wrote a comment. A comment has either an account author or a guest
/// display name, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "lowercase")]
#[ts(export)]
pub enum CommentAuthor {
    User { id: Uuid, username: String },
    Guest { display_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub author: CommentAuthor,
    pub is_privileged: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Builds a comment attributed to `identity`.
    ///
    /// Guests and anonymous callers are named by their credential first,
    /// then by `name_hint` from the request, then by the default guest name.
    pub fn compose(
        text: &str,
        identity: &Identity,
        name_hint: Option<&str>,
    ) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::ValidationError(
                "Comment cannot be empty".into(),
            ));
        }
        if text.chars().count() > MAX_COMMENT_CHARS {
            return Err(DomainError::ValidationError(format!(
                "Comment must be {} characters or less",
                MAX_COMMENT_CHARS
            )));
        }

        let (author, is_privileged) = match identity {
            Identity::Authenticated {
                id,
                username,
                is_privileged,
            } => (
                CommentAuthor::User {
                    id: *id,
                    username: username.clone(),
                },
                *is_privileged,
            ),
            Identity::Guest { display_name, .. } => (
                CommentAuthor::Guest {
                    display_name: guest_display_name(display_name.as_deref().or(name_hint)),
                },
                false,
            ),
            Identity::Anonymous => (
                CommentAuthor::Guest {
                    display_name: guest_display_name(name_hint),
                },
                false,
            ),
        };

        Ok(Self {
            id: Uuid::now_v7(),
            text: text.to_string(),
            author,
            is_privileged,
            created_at: Utc::now(),
        })
    }
}

fn guest_display_name(candidate: Option<&str>) -> String {
    candidate
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().take(MAX_DISPLAY_NAME_CHARS).collect())
        .unwrap_or_else(|| DEFAULT_GUEST_NAME.to_string())
}
