use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;

use crate::domain::shared::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ReactionKind {
    Like,
    Heart,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 2] = [ReactionKind::Like, ReactionKind::Heart];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Heart => "heart",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    /// Accepts both the singular form and the plural list names the web
    /// client sends (`likes`, `hearts`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" | "likes" => Ok(ReactionKind::Like),
            "heart" | "hearts" => Ok(ReactionKind::Heart),
            other => Err(DomainError::ValidationError(format!(
                "Invalid reaction type '{}'",
                other
            ))),
        }
    }
}

/// The key a caller is recorded under in a reaction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reactor {
    Member(String),
    Guest(String),
}

impl Reactor {
    pub fn key(&self) -> &str {
        match self {
            Reactor::Member(key) | Reactor::Guest(key) => key,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Reactor::Guest(_))
    }
}

/// Per-document reaction membership lists.
///
/// Each list behaves as a set: a key is present at most once. Authenticated
/// and guest reactions live in separate lists and are summed for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReactionSet {
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub hearts: Vec<String>,
    #[serde(default)]
    pub guest_likes: Vec<String>,
    #[serde(default)]
    pub guest_hearts: Vec<String>,
}

impl ReactionSet {
    /// Name of the list a reactor of the given kind is stored in. Matches the
    /// serialized field names, which the Postgres store relies on.
    pub fn field_name(kind: ReactionKind, guest: bool) -> &'static str {
        match (kind, guest) {
            (ReactionKind::Like, false) => "likes",
            (ReactionKind::Heart, false) => "hearts",
            (ReactionKind::Like, true) => "guest_likes",
            (ReactionKind::Heart, true) => "guest_hearts",
        }
    }

    fn list(&self, kind: ReactionKind, guest: bool) -> &Vec<String> {
        match (kind, guest) {
            (ReactionKind::Like, false) => &self.likes,
            (ReactionKind::Heart, false) => &self.hearts,
            (ReactionKind::Like, true) => &self.guest_likes,
            (ReactionKind::Heart, true) => &self.guest_hearts,
        }
    }

    fn list_mut(&mut self, kind: ReactionKind, guest: bool) -> &mut Vec<String> {
        match (kind, guest) {
            (ReactionKind::Like, false) => &mut self.likes,
            (ReactionKind::Heart, false) => &mut self.hearts,
            (ReactionKind::Like, true) => &mut self.guest_likes,
            (ReactionKind::Heart, true) => &mut self.guest_hearts,
        }
    }

    pub fn contains(&self, kind: ReactionKind, reactor: &Reactor) -> bool {
        self.list(kind, reactor.is_guest())
            .iter()
            .any(|k| k == reactor.key())
    }

    /// Flips the reactor's membership. Returns `true` when the reactor is a
    /// member afterwards.
    pub fn toggle(&mut self, kind: ReactionKind, reactor: &Reactor) -> bool {
        let list = self.list_mut(kind, reactor.is_guest());
        let before = list.len();
        list.retain(|k| k != reactor.key());
        if list.len() != before {
            return false;
        }
        list.push(reactor.key().to_string());
        true
    }

    pub fn count(&self, kind: ReactionKind) -> usize {
        self.list(kind, false).len() + self.list(kind, true).len()
    }

    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts {
            likes: self.count(ReactionKind::Like),
            hearts: self.count(ReactionKind::Heart),
        }
    }

    pub fn state_for(&self, reactor: &Reactor) -> ReactionState {
        ReactionState {
            likes: self.contains(ReactionKind::Like, reactor),
            hearts: self.contains(ReactionKind::Heart, reactor),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReactionCounts {
    pub likes: usize,
    pub hearts: usize,
}

/// Whether the current caller holds each reaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReactionState {
    pub likes: bool,
    pub hearts: bool,
}
