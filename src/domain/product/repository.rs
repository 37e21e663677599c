//! Product repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewProduct, Product, ProductQuery};
use crate::domain::DomainError;

/// Repository trait for product storage
#[async_trait]
pub trait ProductRepository: Send + Sync + Debug {
    /// Insert a product and return the stored row with its assigned id and
    /// creation timestamp.
    async fn create(&self, product: NewProduct) -> Result<Product, DomainError>;

    /// Fetch a product by id.
    async fn get(&self, id: u64) -> Result<Option<Product>, DomainError>;

    /// List products according to the query's filter, sort and paging.
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, DomainError>;
}
