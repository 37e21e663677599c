//! In-memory user repository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserRepository};

/// In-memory implementation of UserRepository.
///
/// Backs unit tests and local development. The single write lock makes the
/// uniqueness check and the insert one atomic step, mirroring what the
/// unique constraint gives the PostgreSQL implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: RwLock<InMemoryUsers>,
}

#[derive(Debug, Default)]
struct InMemoryUsers {
    // Stands in for the database sequence.
    next_id: u64,
    by_login: HashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;

        if state.by_login.contains_key(&user.login) {
            return Err(DomainError::LoginTaken);
        }

        state.next_id += 1;
        let created = User::new(
            state.next_id,
            user.login.clone(),
            user.password_hash,
            Utc::now(),
        );
        state.by_login.insert(user.login, created.clone());

        Ok(created)
    }

    async fn get_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.by_login.get(login).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(login: &str) -> NewUser {
        NewUser {
            login: login.to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(new_user("alice")).await.unwrap();
        assert_eq!(created.id(), 1);

        let fetched = repo.get_by_login("alice").await.unwrap().unwrap();
        assert_eq!(fetched.id(), created.id());
        assert_eq!(fetched.login(), "alice");
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("alice")).await.unwrap();
        let second = repo.create(new_user("bob")).await.unwrap();

        assert_eq!(second.id(), first.id() + 1);
    }

    #[tokio::test]
    async fn test_duplicate_login_rejected() {
        let repo = InMemoryUserRepository::new();

        repo.create(new_user("alice")).await.unwrap();
        let result = repo.create(new_user("alice")).await;

        assert!(matches!(result, Err(DomainError::LoginTaken)));
    }

    #[tokio::test]
    async fn test_unknown_login_is_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.get_by_login("ghost").await.unwrap().is_none());
    }
}
