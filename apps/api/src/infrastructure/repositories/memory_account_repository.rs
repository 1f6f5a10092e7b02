use crate::domain::{
    account::{entity::Account, repository::AccountRepository},
    identity::entity::Role,
    shared::errors::DomainError,
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::RwLock};
use uuid::Uuid;

/// Account store backed by a `HashMap`; usernames are unique.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(e: impl std::fmt::Display) -> DomainError {
    DomainError::InfrastructureError(format!("lock poisoned: {e}"))
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.values().any(|a| a.username == account.username) {
            return Err(DomainError::ValidationError(
                "User already exists".to_string(),
            ));
        }
        accounts.insert(account.id, account.clone());
        Ok(account.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .map_err(poisoned)?
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Account>, DomainError> {
        let mut found: Vec<Account> = self
            .accounts
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|a| a.role == role)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.created_at);
        Ok(found)
    }
}
