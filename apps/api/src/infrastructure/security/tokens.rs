use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{identity::entity::Role, shared::errors::DomainError};

/// Payload of every token this service issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn issue(&self, id: Uuid, username: &str, role: Role) -> Result<String, DomainError> {
        let exp = (Utc::now() + self.ttl).timestamp().max(0) as usize;
        self.encode(&Claims {
            sub: id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            exp,
        })
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::default(), claims, &self.encoding).map_err(|e| {
            DomainError::InfrastructureError(format!("Token generation failed: {}", e))
        })
    }

    /// Returns the claims of a well-signed, unexpired token.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding, &Validation::default()) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(token_error = %e, "Rejected bearer token");
                None
            }
        }
    }
}
