//! Embedded database migrations

use sqlx::postgres::PgPool;

use crate::domain::DomainError;

/// A single versioned migration. `up` and `down` are each one statement.
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

/// The full migration set, in apply order.
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "create users table",
            up: r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                login VARCHAR(25) NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            down: "DROP TABLE IF EXISTS users",
        },
        Migration {
            version: 2,
            description: "create products table",
            up: r#"
            CREATE TABLE IF NOT EXISTS products (
                id BIGSERIAL PRIMARY KEY,
                saler_id BIGINT NOT NULL REFERENCES users (id),
                title VARCHAR(256) NOT NULL,
                description VARCHAR(4000) NOT NULL,
                image_url VARCHAR(256),
                price BIGINT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            down: "DROP TABLE IF EXISTS products",
        },
    ]
}

/// Applies embedded migrations, tracking state in a `_migrations` table.
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to check migration status: {}", e))
            })
    }

    /// Apply all pending migrations in order.
    pub async fn run(&self) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        for migration in migrations() {
            if self.is_applied(migration.version).await? {
                continue;
            }

            tracing::info!(
                version = migration.version,
                description = migration.description,
                "applying migration"
            );

            sqlx::query(migration.up).execute(&self.pool).await.map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

            sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
                .bind(migration.version)
                .bind(migration.description)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!(
                        "Failed to record migration {}: {}",
                        migration.version, e
                    ))
                })?;
        }

        Ok(())
    }

    /// Revert the most recently applied migration, if any.
    pub async fn revert_last(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        let Some(version) = self.version().await? else {
            return Ok(None);
        };

        let Some(migration) = migrations().into_iter().find(|m| m.version == version) else {
            return Err(DomainError::storage(format!(
                "No embedded migration for recorded version {}",
                version
            )));
        };

        sqlx::query(migration.down).execute(&self.pool).await.map_err(|e| {
            DomainError::storage(format!("Failed to revert migration {}: {}", version, e))
        })?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(version)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to unrecord migration {}: {}", version, e))
            })?;

        Ok(Some(version))
    }

    /// The highest applied migration version.
    pub async fn version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to read schema version: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_unique() {
        let migrations = migrations();

        let mut versions: Vec<i64> = migrations.iter().map(|m| m.version).collect();
        let sorted = versions.clone();
        versions.dedup();

        assert_eq!(versions, sorted);
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_users_table_has_unique_login() {
        let users = &migrations()[0];
        assert!(users.up.contains("login VARCHAR(25) NOT NULL UNIQUE"));
    }
}
