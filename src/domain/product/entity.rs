//! Product entity and listing query types

use chrono::{DateTime, Utc};

/// A product draft ready for insertion. `saler_id` is always the
/// authenticated identity, never client-supplied data.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub saler_id: u64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: u64,
}

impl NewProduct {
    /// Trim title and description; collapse an empty image URL to `None`.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.image_url = self.image_url.filter(|url| !url.is_empty());
        self
    }
}

/// Persisted product row.
///
/// `saler_id` links the product to its creator. Established once at
/// creation, read-only afterward.
#[derive(Debug, Clone)]
pub struct Product {
    id: u64,
    saler_id: u64,
    title: String,
    description: String,
    image_url: Option<String>,
    price: u64,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        id: u64,
        saler_id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: Option<String>,
        price: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            saler_id,
            title: title.into(),
            description: description.into(),
            image_url,
            price,
            created_at,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn saler_id(&self) -> u64 {
        self.saler_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the viewer (if any) is the product's creator.
    pub fn is_owned_by(&self, viewer: Option<u64>) -> bool {
        viewer == Some(self.saler_id)
    }
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    DateAsc,
    #[default]
    DateDesc,
}

impl ProductSort {
    /// Map the wire-level `sort_type` code. Unknown codes fall back to
    /// newest-first.
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::PriceAsc,
            2 => Self::PriceDesc,
            3 => Self::DateAsc,
            4 => Self::DateDesc,
            _ => Self::DateDesc,
        }
    }

    pub fn order_clause(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price ASC",
            Self::PriceDesc => "price DESC",
            Self::DateAsc => "created_at ASC",
            Self::DateDesc => "created_at DESC",
        }
    }
}

/// Paging and filtering parameters for product listings.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub limit: u64,
    pub offset: u64,
    pub sort: ProductSort,
    pub min_price: u64,
    pub max_price: Option<u64>,
}

pub const DEFAULT_LIST_LIMIT: u64 = 10;

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
            sort: ProductSort::default(),
            min_price: 0,
            max_price: None,
        }
    }
}

impl ProductQuery {
    /// Price bounds are applied only when a bound was actually given and the
    /// range is not inverted.
    pub fn price_range(&self) -> Option<(u64, u64)> {
        let max = self.max_price.unwrap_or(u64::MAX);

        if self.min_price == 0 && self.max_price.is_none() {
            return None;
        }

        if self.min_price > max {
            return None;
        }

        Some((self.min_price, max))
    }
}
