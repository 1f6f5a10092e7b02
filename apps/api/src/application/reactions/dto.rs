use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::social::reaction::{ReactionCounts, ReactionSet, ReactionState};

/// `type` accepts `like`, `likes`, `heart` or `hearts`. `guest_id` is only
/// consulted when the request carries no usable credential header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToggleReactionRequest {
    #[serde(rename = "type", default)]
    pub reaction_type: String,
    #[serde(default)]
    pub guest_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReactionResponse {
    /// Whether the caller holds the toggled reaction afterwards.
    pub active: bool,
    pub counts: ReactionCounts,
    pub mine: ReactionState,
    pub reactions: ReactionSet,
}
