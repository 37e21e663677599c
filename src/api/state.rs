//! Shared application state

use std::sync::Arc;

use crate::infrastructure::auth::TokenCodec;
use crate::infrastructure::product::ProductService;
use crate::infrastructure::user::UserService;

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub product_service: Arc<ProductService>,
    pub token_codec: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        product_service: Arc<ProductService>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            user_service,
            product_service,
            token_codec,
        }
    }
}
