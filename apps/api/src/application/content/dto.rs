use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::entry::media::MediaReference;

/// Body of `POST /api/content`. Exactly one of `youtube_url` or `video`
/// must be set; `video` is the reference returned by the video upload
/// endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub video: Option<MediaReference>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateGalleryItemRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeletedResponse {
    pub message: String,
}
