use crate::domain::shared::errors::DomainError;

/// Bcrypt hashing with a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            DomainError::InfrastructureError(format!("Password hashing failed: {}", e))
        })
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, hash).map_err(|_| {
            DomainError::InfrastructureError("Password verification failed".to_string())
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
