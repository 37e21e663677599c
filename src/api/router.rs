use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::product;
use super::state::AppState;

/// Create the full router with application state.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth)
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints
        .nest("/api/v1", auth::create_auth_router())
        // Product endpoints
        .nest("/api/v1/product", product::create_product_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
