use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::entry::media::MediaReference;

/// Returned by the video upload endpoint; `media` can be passed straight
/// into post creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UploadedMediaResponse {
    pub media: MediaReference,
}
