//! PostgreSQL connection pooling and sequence helpers

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use crate::domain::DomainError;

/// PostgreSQL pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/marketplace".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Open a connection pool against the configured database.
pub async fn connect(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Sequence assigning user ids.
pub const USERS_ID_SEQ: &str = "users_id_seq";
/// Sequence assigning product ids.
pub const PRODUCTS_ID_SEQ: &str = "products_id_seq";

/// Read the value the sequence produced for this connection's most recent
/// insert.
///
/// `currval` is connection-local, so the call must run on the same
/// transaction as the insert it follows; the returned id then belongs to
/// that exact insert regardless of concurrently committed rows.
pub async fn last_sequence_value(
    tx: &mut Transaction<'_, Postgres>,
    sequence: &str,
) -> Result<u64, DomainError> {
    let value: i64 = sqlx::query_scalar("SELECT currval($1::regclass)")
        .bind(sequence)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::storage(format!("Failed to read sequence {}: {}", sequence, e))
        })?;

    Ok(value as u64)
}
