use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::shared::errors::DomainError;

/// Role carried in a signed token.
///
/// `Admin` may create and delete content. `Member` is a registered account
/// without editorial rights. `Guest` marks a lightweight commenting
/// account; a guest token never resolves to an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    Member,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Guest => "guest",
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            "guest" => Ok(Role::Guest),
            other => Err(DomainError::ValidationError(format!(
                "Unknown role '{}'",
                other
            ))),
        }
    }
}

/// Who is making a request, as far as the content engines are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Authenticated {
        id: Uuid,
        username: String,
        is_privileged: bool,
    },
    Guest {
        id: String,
        display_name: Option<String>,
    },
    Anonymous,
}

impl Identity {
    pub fn is_guest(&self) -> bool {
        !matches!(self, Identity::Authenticated { .. })
    }

    pub fn is_privileged(&self) -> bool {
        matches!(
            self,
            Identity::Authenticated {
                is_privileged: true,
                ..
            }
        )
    }

    /// Display name supplied by the credential itself, if any.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Identity::Authenticated { username, .. } => Some(username),
            Identity::Guest { display_name, .. } => display_name.as_deref(),
            Identity::Anonymous => None,
        }
    }
}

/// An authenticated admin, produced only by a successful privilege check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
}
