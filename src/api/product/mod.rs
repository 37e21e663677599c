//! Product endpoints: add, get, list

use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{MaybeUser, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::product::{NewProduct, Product, ProductQuery, ProductSort};

/// Create the product router
pub fn create_product_router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_product))
        .route("/get", get(get_product))
        .route("/get_list", get(list_products))
}

/// Product draft as submitted by a client. The owner comes from the
/// session, not the body.
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub price: u64,
}

/// Product fields exposed to clients, with the viewer-relative `is_my` flag
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: u64,
    pub saler_id: u64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: u64,
    pub created_at: String,
    pub is_my: bool,
}

impl ProductResponse {
    fn from_product(product: &Product, viewer: Option<u64>) -> Self {
        Self {
            id: product.id(),
            saler_id: product.saler_id(),
            title: product.title().to_string(),
            description: product.description().to_string(),
            image_url: product.image_url().map(str::to_string),
            price: product.price(),
            created_at: product.created_at().to_rfc3339(),
            is_my: product.is_owned_by(viewer),
        }
    }
}

/// Create a product owned by the authenticated user.
///
/// POST /api/v1/product/add
async fn add_product(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(request): Json<AddProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .product_service
        .add(NewProduct {
            saler_id: claims.user_id,
            title: request.title,
            description: request.description,
            image_url: request.image_url,
            price: request.price,
        })
        .await?;

    Ok(Json(ProductResponse::from_product(
        &product,
        Some(claims.user_id),
    )))
}

#[derive(Debug, Deserialize)]
struct GetProductParams {
    id: u64,
}

/// Fetch a product by id. Anonymous viewers simply get `is_my = false`.
///
/// GET /api/v1/product/get?id=N
async fn get_product(
    State(state): State<AppState>,
    MaybeUser(claims): MaybeUser,
    Query(params): Query<GetProductParams>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.product_service.get(params.id).await?;
    let viewer = claims.map(|c| c.user_id);

    Ok(Json(ProductResponse::from_product(&product, viewer)))
}

#[derive(Debug, Deserialize, Default)]
struct ListProductsParams {
    limit: Option<u64>,
    offset: Option<u64>,
    sort_type: Option<u64>,
    min_price: Option<u64>,
    max_price: Option<u64>,
}

/// List products with price filtering, sorting and paging.
///
/// GET /api/v1/product/get_list?limit=&offset=&sort_type=&min_price=&max_price=
async fn list_products(
    State(state): State<AppState>,
    MaybeUser(claims): MaybeUser,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let defaults = ProductQuery::default();
    let query = ProductQuery {
        limit: params.limit.unwrap_or(defaults.limit),
        offset: params.offset.unwrap_or(defaults.offset),
        sort: ProductSort::from_code(params.sort_type.unwrap_or(0)),
        min_price: params.min_price.unwrap_or(0),
        max_price: params.max_price,
    };

    let viewer = claims.map(|c| c.user_id);
    let products = state.product_service.list(query).await?;

    Ok(Json(
        products
            .iter()
            .map(|product| ProductResponse::from_product(product, viewer))
            .collect(),
    ))
}
