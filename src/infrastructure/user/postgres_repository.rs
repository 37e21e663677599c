//! PostgreSQL user repository
//!
//! Signup is one transaction: existence pre-check, insert, sequence read.
//! The UNIQUE constraint on `login` backs the pre-check, so a concurrent
//! duplicate insert surfaces as a conflict instead of a second success.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserRepository};
use crate::infrastructure::storage::{USERS_ID_SEQ, last_sequence_value};

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE login = $1")
            .bind(&user.login)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check login: {}", e)))?;

        if taken.is_some() {
            // Dropping the transaction rolls back; nothing was written.
            return Err(DomainError::LoginTaken);
        }

        sqlx::query("INSERT INTO users (login, password_hash) VALUES ($1, $2)")
            .bind(&user.login)
            .bind(&user.password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                // A concurrent signup won the race between our check and
                // insert; same outcome as the pre-check.
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::LoginTaken,
                _ => DomainError::storage(format!("Failed to insert user: {}", e)),
            })?;

        // The id this insert advanced the sequence to, read on the same
        // connection before commit.
        let id = last_sequence_value(&mut tx, USERS_ID_SEQ).await?;

        let created_at: DateTime<Utc> =
            sqlx::query_scalar("SELECT created_at FROM users WHERE id = $1")
                .bind(id as i64)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to read created user: {}", e))
                })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))?;

        Ok(User::new(id, user.login, user.password_hash, created_at))
    }

    async fn get_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, login, password_hash, created_at FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by login: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
    let login: String = row
        .try_get("login")
        .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;

    Ok(User::new(id as u64, login, password_hash, created_at))
}
