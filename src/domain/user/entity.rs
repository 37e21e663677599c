//! User entity and the signup/signin input types

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw credentials as submitted by a client.
///
/// Ephemeral: the password is replaced by its hash before anything reaches
/// storage, and the struct is never serialized back out.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    /// Strip surrounding whitespace from the login. The password is used
    /// verbatim.
    pub fn trimmed(mut self) -> Self {
        self.login = self.login.trim().to_string();
        self
    }
}

/// A validated, hashed user ready for insertion.
///
/// The id is assigned by the database sequence, never by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
}

/// Persisted user row. Immutable after signup: no update or delete path
/// exists for identities.
#[derive(Debug, Clone)]
pub struct User {
    id: u64,
    login: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: u64,
        login: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            login: login.into(),
            password_hash: password_hash.into(),
            created_at,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_trimmed() {
        let credentials = Credentials {
            login: "  alice  ".to_string(),
            password: "  Secret1!  ".to_string(),
        };

        let trimmed = credentials.trimmed();
        assert_eq!(trimmed.login, "alice");
        // Whitespace is significant in passwords.
        assert_eq!(trimmed.password, "  Secret1!  ");
    }

    #[test]
    fn test_user_getters() {
        let user = User::new(7, "bob", "$argon2id$...", Utc::now());

        assert_eq!(user.id(), 7);
        assert_eq!(user.login(), "bob");
        assert_eq!(user.password_hash(), "$argon2id$...");
    }
}
