use bytes::Bytes;
use image::ImageFormat;
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::domain::{entry::media::MediaKind, shared::errors::DomainError};

lazy_static! {
    static ref UPLOADED_VIDEO_KEY_REGEX: Regex = Regex::new(
        r"^videos/[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.(mp4|webm|mov)$"
    )
    .unwrap();
}

const IMAGE_TYPES: &[(&str, &str, ImageFormat)] = &[
    ("image/jpeg", "jpg", ImageFormat::Jpeg),
    ("image/jpg", "jpg", ImageFormat::Jpeg),
    ("image/png", "png", ImageFormat::Png),
    ("image/gif", "gif", ImageFormat::Gif),
];

const VIDEO_TYPES: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/quicktime", "mov"),
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaValidationError {
    #[error("File exceeds the {limit} byte limit for {kind} uploads")]
    TooLarge { kind: MediaKind, limit: usize },

    #[error("Unsupported {kind} type '{content_type}'")]
    UnsupportedType { kind: MediaKind, content_type: String },

    #[error("File content does not match declared type '{0}'")]
    ContentMismatch(String),

    #[error("File is empty")]
    Empty,

    #[error("File is not a readable '{0}' image")]
    Corrupt(String),

    #[error("Video must be uploaded through the video upload endpoint")]
    UnknownUpload,
}

impl From<MediaValidationError> for DomainError {
    fn from(err: MediaValidationError) -> Self {
        DomainError::ValidationError(err.to_string())
    }
}

/// Per-kind upload ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaLimits {
    pub max_image_bytes: usize,
    pub max_video_bytes: usize,
}

impl Default for MediaLimits {
    fn default() -> Self {
        Self {
            max_image_bytes: 10 * 1024 * 1024,
            max_video_bytes: 100 * 1024 * 1024,
        }
    }
}

impl MediaLimits {
    pub fn max_bytes(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Image => self.max_image_bytes,
            MediaKind::Video => self.max_video_bytes,
            MediaKind::Youtube => 0,
        }
    }

    /// Called while a body is streamed in, so oversized uploads are cut off
    /// before they are fully buffered.
    pub fn check_size(&self, kind: MediaKind, received: usize) -> Result<(), MediaValidationError> {
        let limit = self.max_bytes(kind);
        if received > limit {
            return Err(MediaValidationError::TooLarge { kind, limit });
        }
        Ok(())
    }
}

/// An upload that passed type, size and content checks.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub kind: MediaKind,
    pub content_type: String,
    pub extension: &'static str,
    pub checksum: String,
    pub data: Bytes,
}

pub fn validate_upload(
    kind: MediaKind,
    declared_type: &str,
    data: Bytes,
    limits: &MediaLimits,
) -> Result<ValidatedUpload, MediaValidationError> {
    if data.is_empty() {
        return Err(MediaValidationError::Empty);
    }
    limits.check_size(kind, data.len())?;

    let content_type = declared_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    let extension = match kind {
        MediaKind::Image => {
            let (_, ext, format) = IMAGE_TYPES
                .iter()
                .find(|(mime, _, _)| *mime == content_type)
                .ok_or_else(|| unsupported(kind, &content_type))?;
            match image::guess_format(&data) {
                Ok(actual) if actual == *format => {}
                _ => return Err(MediaValidationError::ContentMismatch(content_type)),
            }
            if image::load_from_memory_with_format(&data, *format).is_err() {
                return Err(MediaValidationError::Corrupt(content_type));
            }
            *ext
        }
        MediaKind::Video => {
            let (_, ext) = VIDEO_TYPES
                .iter()
                .find(|(mime, _)| *mime == content_type)
                .ok_or_else(|| unsupported(kind, &content_type))?;
            if !video_signature_matches(&content_type, &data) {
                return Err(MediaValidationError::ContentMismatch(content_type));
            }
            *ext
        }
        MediaKind::Youtube => return Err(unsupported(kind, &content_type)),
    };

    let checksum = format!("{:x}", Sha256::digest(&data));

    Ok(ValidatedUpload {
        kind,
        content_type,
        extension,
        checksum,
        data,
    })
}

/// Content type of a key issued by the video upload, which has the shape
/// `videos/<uuid>.<ext>`. Any other key is rejected.
pub fn uploaded_video_type(key: &str) -> Result<&'static str, MediaValidationError> {
    let ext = UPLOADED_VIDEO_KEY_REGEX
        .captures(key)
        .and_then(|caps| caps.get(1))
        .ok_or(MediaValidationError::UnknownUpload)?
        .as_str();
    VIDEO_TYPES
        .iter()
        .find(|(_, e)| *e == ext)
        .map(|(mime, _)| *mime)
        .ok_or(MediaValidationError::UnknownUpload)
}

fn unsupported(kind: MediaKind, content_type: &str) -> MediaValidationError {
    MediaValidationError::UnsupportedType {
        kind,
        content_type: content_type.to_string(),
    }
}

fn video_signature_matches(content_type: &str, data: &[u8]) -> bool {
    match content_type {
        "video/webm" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),
        _ => data.len() >= 12 && &data[4..8] == b"ftyp",
    }
}
