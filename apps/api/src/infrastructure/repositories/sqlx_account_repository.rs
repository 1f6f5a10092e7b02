use crate::domain::{
    account::{entity::Account, repository::AccountRepository},
    identity::entity::Role,
    shared::errors::DomainError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxAccountRepository {
    pub pool: PgPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(r: AccountRow) -> Result<Self, Self::Error> {
        let role = r.role.parse::<Role>().map_err(|_| {
            DomainError::InfrastructureError(format!("Account {} has unknown role", r.id))
        })?;
        Ok(Account {
            id: r.id,
            username: r.username,
            password_hash: r.password_hash,
            role,
            created_at: r.created_at,
        })
    }
}

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError(e.to_string())
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    async fn create(&self, account: &Account) -> Result<Account, DomainError> {
        let result = sqlx::query(
            "INSERT INTO accounts (id, username, password_hash, role, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23505") {
                    return Err(DomainError::ValidationError(
                        "User already exists".to_string(),
                    ));
                }
            }
            return Err(infra(e));
        }

        Ok(account.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, password_hash, role, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?
        .map(Account::try_from)
        .transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, password_hash, role, created_at FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?
        .map(Account::try_from)
        .transpose()
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Account>, DomainError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, password_hash, role, created_at FROM accounts WHERE role = $1 ORDER BY created_at",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.into_iter().map(Account::try_from).collect()
    }
}
