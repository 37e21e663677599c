//! Product service

use std::sync::Arc;

use tracing::info;

use crate::domain::DomainError;
use crate::domain::product::{
    NewProduct, Product, ProductQuery, ProductRepository, validate_new_product,
};

/// Product service: validates drafts and delegates to the repository.
#[derive(Debug)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Create a product owned by the authenticated user.
    pub async fn add(&self, product: NewProduct) -> Result<Product, DomainError> {
        let product = product.normalized();
        validate_new_product(&product).map_err(|e| DomainError::validation(e.to_string()))?;

        let created = self.repository.create(product).await?;

        info!(
            product_id = created.id(),
            saler_id = created.saler_id(),
            "product created"
        );

        Ok(created)
    }

    /// Fetch a product by id.
    pub async fn get(&self, id: u64) -> Result<Product, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product {} not found", id)))
    }

    /// List products according to filter, sort and paging parameters.
    pub async fn list(&self, query: ProductQuery) -> Result<Vec<Product>, DomainError> {
        self.repository.list(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::product::InMemoryProductRepository;

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn draft() -> NewProduct {
        NewProduct {
            saler_id: 42,
            title: "bike".to_string(),
            description: "a slightly used bike".to_string(),
            image_url: None,
            price: 100,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_owner() {
        let service = service();

        let product = service.add(draft()).await.unwrap();

        assert_eq!(product.id(), 1);
        assert_eq!(product.saler_id(), 42);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft() {
        let service = service();

        let result = service
            .add(NewProduct {
                price: 0,
                ..draft()
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_add_normalizes_before_validation() {
        let service = service();

        // Whitespace-only title is empty after trimming.
        let result = service
            .add(NewProduct {
                title: "   ".to_string(),
                ..draft()
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let service = service();

        let result = service.get(999).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_round_trip() {
        let service = service();

        let created = service.add(draft()).await.unwrap();
        let fetched = service.get(created.id()).await.unwrap();

        assert_eq!(fetched.title(), "bike");
        assert_eq!(fetched.price(), 100);
    }
}
