//! In-memory product repository

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::product::{NewProduct, Product, ProductQuery, ProductRepository, ProductSort};

/// In-memory implementation of ProductRepository for tests and local
/// development.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    state: RwLock<InMemoryProducts>,
}

#[derive(Debug, Default)]
struct InMemoryProducts {
    next_id: u64,
    products: Vec<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut state = self.state.write().await;

        state.next_id += 1;
        let created = Product::new(
            state.next_id,
            product.saler_id,
            product.title,
            product.description,
            product.image_url,
            product.price,
            Utc::now(),
        );
        state.products.push(created.clone());

        Ok(created)
    }

    async fn get(&self, id: u64) -> Result<Option<Product>, DomainError> {
        let state = self.state.read().await;
        Ok(state.products.iter().find(|p| p.id() == id).cloned())
    }

    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, DomainError> {
        let state = self.state.read().await;

        let mut products: Vec<Product> = match query.price_range() {
            Some((min_price, max_price)) => state
                .products
                .iter()
                .filter(|p| p.price() >= min_price && p.price() <= max_price)
                .cloned()
                .collect(),
            None => state.products.clone(),
        };

        match query.sort {
            ProductSort::PriceAsc => products.sort_by_key(Product::price),
            ProductSort::PriceDesc => {
                products.sort_by(|a, b| b.price().cmp(&a.price()));
            }
            ProductSort::DateAsc => products.sort_by_key(Product::created_at),
            ProductSort::DateDesc => {
                products.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
            }
        }

        Ok(products
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(price: u64) -> NewProduct {
        NewProduct {
            saler_id: 1,
            title: format!("item-{price}"),
            description: "an item".to_string(),
            image_url: None,
            price,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(draft(10)).await.unwrap();
        let second = repo.create(draft(20)).await.unwrap();

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_price() {
        let repo = InMemoryProductRepository::new();

        for price in [5, 15, 25] {
            repo.create(draft(price)).await.unwrap();
        }

        let query = ProductQuery {
            min_price: 10,
            max_price: Some(20),
            ..Default::default()
        };

        let products = repo.list(&query).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price(), 15);
    }

    #[tokio::test]
    async fn test_list_sorts_by_price() {
        let repo = InMemoryProductRepository::new();

        for price in [20, 5, 15] {
            repo.create(draft(price)).await.unwrap();
        }

        let ascending = repo
            .list(&ProductQuery {
                sort: ProductSort::PriceAsc,
                ..Default::default()
            })
            .await
            .unwrap();
        let prices: Vec<u64> = ascending.iter().map(Product::price).collect();
        assert_eq!(prices, vec![5, 15, 20]);

        let descending = repo
            .list(&ProductQuery {
                sort: ProductSort::PriceDesc,
                ..Default::default()
            })
            .await
            .unwrap();
        let prices: Vec<u64> = descending.iter().map(Product::price).collect();
        assert_eq!(prices, vec![20, 15, 5]);
    }

    #[tokio::test]
    async fn test_list_paging() {
        let repo = InMemoryProductRepository::new();

        for price in 1..=5 {
            repo.create(draft(price)).await.unwrap();
        }

        let query = ProductQuery {
            limit: 2,
            offset: 1,
            sort: ProductSort::PriceAsc,
            ..Default::default()
        };

        let page = repo.list(&query).await.unwrap();
        let prices: Vec<u64> = page.iter().map(Product::price).collect();
        assert_eq!(prices, vec![2, 3]);
    }
}
