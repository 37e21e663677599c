//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Repository trait for identity storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Create a new user and return the stored row with its assigned id.
    ///
    /// Fails with `DomainError::LoginTaken` when the login is already
    /// registered. The uniqueness check and the insert must be atomic with
    /// respect to concurrent callers: for any login, two racing creates
    /// yield exactly one success and one `LoginTaken`.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Look up a user by login.
    async fn get_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;
}
