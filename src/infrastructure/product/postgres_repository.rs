//! PostgreSQL product repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder, Row, postgres::PgRow};

use crate::domain::DomainError;
use crate::domain::product::{NewProduct, Product, ProductQuery, ProductRepository};
use crate::infrastructure::storage::{PRODUCTS_ID_SEQ, last_sequence_value};

/// PostgreSQL implementation of ProductRepository
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            "INSERT INTO products (saler_id, title, description, image_url, price) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(product.saler_id as i64)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.image_url.as_deref())
        .bind(product.price as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert product: {}", e)))?;

        // The id this insert advanced the sequence to, on the same
        // connection.
        let id = last_sequence_value(&mut tx, PRODUCTS_ID_SEQ).await?;

        let created_at: DateTime<Utc> =
            sqlx::query_scalar("SELECT created_at FROM products WHERE id = $1")
                .bind(id as i64)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to read created product: {}", e))
                })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))?;

        Ok(Product::new(
            id,
            product.saler_id,
            product.title,
            product.description,
            product.image_url,
            product.price,
            created_at,
        ))
    }

    async fn get(&self, id: u64) -> Result<Option<Product>, DomainError> {
        let row = sqlx::query(
            "SELECT id, saler_id, title, description, image_url, price, created_at \
             FROM products WHERE id = $1",
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get product: {}", e)))?;

        row.map(|row| row_to_product(&row)).transpose()
    }

    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, DomainError> {
        let mut builder = QueryBuilder::<sqlx::Postgres>::new(
            "SELECT id, saler_id, title, description, image_url, price, created_at FROM products",
        );

        if let Some((min_price, max_price)) = query.price_range() {
            builder.push(" WHERE price >= ");
            builder.push_bind(min_price as i64);
            builder.push(" AND price <= ");
            builder.push_bind(i64::try_from(max_price).unwrap_or(i64::MAX));
        }

        builder.push(" ORDER BY ");
        builder.push(query.sort.order_clause());
        builder.push(" LIMIT ");
        builder.push_bind(query.limit as i64);
        builder.push(" OFFSET ");
        builder.push_bind(query.offset as i64);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list products: {}", e)))?;

        rows.iter().map(row_to_product).collect()
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, DomainError> {
    let read_err = |e: sqlx::Error| DomainError::storage(format!("Failed to read product row: {}", e));

    let id: i64 = row.try_get("id").map_err(read_err)?;
    let saler_id: i64 = row.try_get("saler_id").map_err(read_err)?;
    let title: String = row.try_get("title").map_err(read_err)?;
    let description: String = row.try_get("description").map_err(read_err)?;
    let image_url: Option<String> = row.try_get("image_url").map_err(read_err)?;
    let price: i64 = row.try_get("price").map_err(read_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read_err)?;

    Ok(Product::new(
        id as u64,
        saler_id as u64,
        title,
        description,
        image_url,
        price as u64,
        created_at,
    ))
}
