use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref YOUTUBE_URL_REGEX: regex::Regex = regex::Regex::new(
        r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|shorts/)|youtu\.be/)[a-zA-Z0-9_-]{11}$"
    )
    .unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct YoutubeUrl {
    #[validate(regex(path = *YOUTUBE_URL_REGEX))]
    pub value: String,
}

impl YoutubeUrl {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let url = Self {
            value: value.trim().to_string(),
        };
        url.validate()?;
        Ok(url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntryText {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
}

impl EntryText {
    pub fn new(title: &str, description: &str) -> Result<Self, validator::ValidationErrors> {
        let text = Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        };
        text.validate()?;
        Ok(text)
    }
}
