//! User service: signup and signin

use std::sync::Arc;

use tracing::info;

use crate::domain::DomainError;
use crate::domain::user::{Credentials, NewUser, User, UserRepository, validate_credentials};
use crate::infrastructure::auth::PasswordHasher;

/// User service for registration and authentication
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new identity.
    ///
    /// Validates the credentials, hashes the password and creates the row;
    /// the raw password never leaves this function.
    pub async fn signup(&self, credentials: Credentials) -> Result<User, DomainError> {
        let credentials = credentials.trimmed();
        validate_credentials(&credentials).map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&credentials.password)?;

        let user = self
            .repository
            .create(NewUser {
                login: credentials.login,
                password_hash,
            })
            .await?;

        info!(user_id = user.id(), login = user.login(), "user signed up");

        Ok(user)
    }

    /// Authenticate an existing identity.
    ///
    /// Fails with `LoginNotFound` for an unknown login and `WrongPassword`
    /// on a hash mismatch. The two kinds are distinct and both reach the
    /// caller.
    pub async fn signin(&self, credentials: Credentials) -> Result<User, DomainError> {
        let credentials = credentials.trimmed();
        validate_credentials(&credentials).map_err(|e| DomainError::validation(e.to_string()))?;

        let user = self
            .repository
            .get_by_login(&credentials.login)
            .await?
            .ok_or(DomainError::LoginNotFound)?;

        if !self
            .hasher
            .verify(&credentials.password, user.password_hash())?
        {
            return Err(DomainError::WrongPassword);
        }

        info!(user_id = user.id(), login = user.login(), "user signed in");

        Ok(user)
    }
}
