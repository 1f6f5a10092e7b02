use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::social::comment::Comment;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub text: String,
    /// Display name for guests without a guest-session token.
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddCommentResponse {
    pub comment: Comment,
    pub comments: Vec<Comment>,
}
