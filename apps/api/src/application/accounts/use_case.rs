use super::dto::{
    AuthResponse, CheckUsernameRequest, GuestAuthRequest, GuestAuthResponse, LoginRequest,
    RegisterRequest, RegisterResponse, UsernameAvailability,
};
use crate::{
    domain::{
        account::{
            entity::{Account, AccountProfile},
            repository::AccountRepository,
        },
        identity::{
            entity::{Principal, Role},
            value_objects::Credentials,
        },
        shared::errors::DomainError,
    },
    infrastructure::security::{PasswordHasher, TokenService},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Registered accounts (admins and members) and lightweight guest
/// commenting accounts. All of them share one repository and are told
/// apart by role.
pub struct AccountUseCase {
    repository: Arc<dyn AccountRepository>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AccountUseCase {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Creates an admin or member account. Creating an admin requires an
    /// admin caller.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(
        &self,
        requested_by: Option<&Principal>,
        request: RegisterRequest,
    ) -> Result<RegisterResponse, DomainError> {
        let role = request.role.unwrap_or(Role::Member);
        match (role, requested_by) {
            (Role::Guest, _) => {
                return Err(DomainError::ValidationError("Invalid role".into()));
            }
            (Role::Admin, None) => {
                return Err(DomainError::Forbidden(
                    "Administrator rights required".into(),
                ));
            }
            _ => {}
        }

        let credentials = Credentials::new(&request.username, &request.password)?;
        let hash = self.hasher.hash(&credentials.password)?;
        let account = self
            .repository
            .create(&Account::new(credentials.username, hash, role))
            .await?;

        info!(account_id = %account.id, %role, "Account registered");
        Ok(RegisterResponse {
            message: "Registration successful".into(),
            user: account.profile(),
        })
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, DomainError> {
        let account = self
            .repository
            .find_by_username(request.username.trim())
            .await?
            .filter(|account| account.role != Role::Guest)
            .ok_or_else(|| DomainError::NotFound("User not found".into()))?;

        if !self.hasher.verify(&request.password, &account.password_hash)? {
            warn!("Failed login attempt");
            return Err(DomainError::ValidationError("Invalid password".into()));
        }

        let token = self
            .tokens
            .issue(account.id, &account.username, account.role)?;
        Ok(AuthResponse {
            token,
            user: account.profile(),
        })
    }

    pub async fn me(&self, account_id: Uuid) -> Result<AccountProfile, DomainError> {
        self.repository
            .find_by_id(account_id)
            .await?
            .map(|account| account.profile())
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }

    pub async fn list_admins(&self, _admin: &Principal) -> Result<Vec<AccountProfile>, DomainError> {
        let admins = self.repository.find_by_role(Role::Admin).await?;
        if admins.is_empty() {
            return Err(DomainError::NotFound("No administrators found".into()));
        }
        Ok(admins.iter().map(Account::profile).collect())
    }

    /// Signs a guest in, creating the guest account on first use.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn guest_auth(
        &self,
        request: GuestAuthRequest,
    ) -> Result<GuestAuthResponse, DomainError> {
        let credentials = Credentials::new(&request.username, &request.password)?;

        let account = match self
            .repository
            .find_by_username(&credentials.username)
            .await?
        {
            Some(existing) if existing.role != Role::Guest => {
                return Err(DomainError::ValidationError("Username is taken".into()));
            }
            Some(existing) => {
                if !self
                    .hasher
                    .verify(&credentials.password, &existing.password_hash)?
                {
                    return Err(DomainError::ValidationError("Invalid password".into()));
                }
                existing
            }
            None => {
                let hash = self.hasher.hash(&credentials.password)?;
                let created = self
                    .repository
                    .create(&Account::new(credentials.username, hash, Role::Guest))
                    .await?;
                info!(account_id = %created.id, "Guest account created");
                created
            }
        };

        let token = self
            .tokens
            .issue(account.id, &account.username, Role::Guest)?;
        Ok(GuestAuthResponse {
            id: account.id,
            username: account.username,
            token,
        })
    }

    pub async fn check_username(
        &self,
        request: CheckUsernameRequest,
    ) -> Result<UsernameAvailability, DomainError> {
        let taken = self
            .repository
            .find_by_username(request.username.trim())
            .await?
            .is_some();
        Ok(UsernameAvailability { available: !taken })
    }

    /// Ensures an admin account with a pre-computed bcrypt hash exists.
    ///
    /// An existing admin of that name is left untouched. A member or guest
    /// already holding the name is an error, since the service would
    /// otherwise start without the configured administrator.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.repository.find_by_username(username).await? {
            if existing.role != Role::Admin {
                warn!(%username, role = %existing.role, "Bootstrap admin name is held by a non-admin");
                return Err(DomainError::ValidationError(format!(
                    "Account '{}' exists with role {}, not admin",
                    username, existing.role
                )));
            }
            info!(%username, "Bootstrap admin already present");
            return Ok(());
        }
        let account = Account::new(username.to_string(), password_hash.to_string(), Role::Admin);
        self.repository.create(&account).await?;
        info!(%username, "Bootstrap admin created");
        Ok(())
    }
}
