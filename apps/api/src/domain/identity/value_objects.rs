use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref GUEST_ID_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap();
}

/// Opaque client-chosen guest identifier.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GuestId {
    #[validate(regex(path = *GUEST_ID_REGEX))]
    pub value: String,
}

impl GuestId {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let id = Self {
            value: value.trim().to_string(),
        };
        id.validate()?;
        Ok(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 4, max = 128))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, validator::ValidationErrors> {
        let credentials = Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        credentials.validate()?;
        Ok(credentials)
    }
}
