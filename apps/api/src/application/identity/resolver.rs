use crate::{
    domain::{
        identity::{
            entity::{Identity, Principal, Role},
            value_objects::GuestId,
        },
        shared::errors::DomainError,
        social::reaction::Reactor,
    },
    infrastructure::security::{Claims, TokenService},
};
use uuid::Uuid;

/// Prefix for guests backed by a signed guest-account token. Opaque guest
/// ids cannot contain `:`, so they never collide with account guests.
pub const GUEST_ACCOUNT_PREFIX: &str = "acct:";

/// Raw credential material lifted off a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerCredentials {
    /// Token from `Authorization: Bearer ...`.
    pub bearer: Option<String>,
    /// `Guest-Auth` header value: a guest-session token or an opaque id.
    pub guest: Option<String>,
}

impl CallerCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            guest: None,
        }
    }

    pub fn guest(value: impl Into<String>) -> Self {
        Self {
            bearer: None,
            guest: Some(value.into()),
        }
    }
}

/// Turns credentials into an [`Identity`].
///
/// Resolution never fails: a bad or expired bearer token simply falls
/// through to the guest credential and then to `Anonymous`. Only the
/// `require_*` checks produce errors.
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: TokenService,
}

impl IdentityResolver {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn resolve(&self, creds: &CallerCredentials) -> Identity {
        if let Some(identity) = creds
            .bearer
            .as_deref()
            .and_then(|token| self.tokens.verify(token))
            .and_then(|claims| identity_from_claims(&claims))
        {
            return identity;
        }

        if let Some(raw) = creds.guest.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if let Some(claims) = self.tokens.verify(raw) {
                if claims.role() == Some(Role::Guest) {
                    return guest_account(&claims);
                }
            } else if let Ok(guest) = GuestId::new(raw.to_string()) {
                return Identity::Guest {
                    id: guest.value,
                    display_name: None,
                };
            }
        }

        Identity::Anonymous
    }

    /// Admits only a valid admin bearer token.
    ///
    /// No bearer token is `Unauthorized`; any bearer token that is invalid
    /// or lacks the admin role is `Forbidden`.
    pub fn require_privileged(&self, creds: &CallerCredentials) -> Result<Principal, DomainError> {
        match self.authenticated(creds)? {
            Identity::Authenticated {
                id,
                username,
                is_privileged: true,
            } => Ok(Principal { id, username }),
            _ => Err(DomainError::Forbidden(
                "Administrator rights required".to_string(),
            )),
        }
    }

    /// Admits any registered account (admin or member).
    pub fn require_account(&self, creds: &CallerCredentials) -> Result<Uuid, DomainError> {
        match self.authenticated(creds)? {
            Identity::Authenticated { id, .. } => Ok(id),
            _ => Err(DomainError::Forbidden(
                "A registered account is required".to_string(),
            )),
        }
    }

    fn authenticated(&self, creds: &CallerCredentials) -> Result<Identity, DomainError> {
        let token = creds.bearer.as_deref().ok_or(DomainError::Unauthorized)?;
        let claims = self
            .tokens
            .verify(token)
            .ok_or_else(|| DomainError::Forbidden("Invalid token".to_string()))?;
        identity_from_claims(&claims)
            .ok_or_else(|| DomainError::Forbidden("Invalid token".to_string()))
    }
}

fn identity_from_claims(claims: &Claims) -> Option<Identity> {
    match claims.role()? {
        role @ (Role::Admin | Role::Member) => Some(Identity::Authenticated {
            id: claims.subject_id()?,
            username: claims.username.clone(),
            is_privileged: role.is_privileged(),
        }),
        Role::Guest => Some(guest_account(claims)),
    }
}

fn guest_account(claims: &Claims) -> Identity {
    Identity::Guest {
        id: format!("{}{}", GUEST_ACCOUNT_PREFIX, claims.sub),
        display_name: Some(claims.username.clone()),
    }
}

/// Key under which `identity` reacts. Anonymous callers are tracked as a
/// guest under `anonymous_key` (derived from the client address).
pub fn reactor_for(identity: &Identity, anonymous_key: &str) -> Reactor {
    match identity {
        Identity::Authenticated { id, .. } => Reactor::Member(id.to_string()),
        Identity::Guest { id, .. } => Reactor::Guest(id.clone()),
        Identity::Anonymous => Reactor::Guest(anonymous_key.to_string()),
    }
}
