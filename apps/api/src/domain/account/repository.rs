use super::entity::Account;
use crate::domain::{identity::entity::Role, shared::errors::DomainError};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fails with `ValidationError` when the username is already taken.
    async fn create(&self, account: &Account) -> Result<Account, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;
    async fn find_by_role(&self, role: Role) -> Result<Vec<Account>, DomainError>;
}
