//! Serve command - runs the HTTP server

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::api::state::AppState;
use crate::api::create_router_with_state;
use crate::config::{AppConfig, CorsConfig};
use crate::infrastructure::auth::{Argon2Hasher, TokenCodec, TokenConfig};
use crate::infrastructure::logging;
use crate::infrastructure::product::{PostgresProductRepository, ProductService};
use crate::infrastructure::storage::{self, PostgresConfig, PostgresMigrator};
use crate::infrastructure::user::{PostgresUserRepository, UserService};

/// Run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init_logging(&config.logging);

    let pool = storage::connect(
        &PostgresConfig::new(&config.database.url)
            .with_max_connections(config.database.max_connections),
    )
    .await?;

    PostgresMigrator::new(pool.clone()).run().await?;

    let state = build_state(&config, pool);
    let app = create_router_with_state(state).layer(cors_layer(&config.cors)?);

    let addr = SocketAddr::from((config.server.host.parse::<IpAddr>()?, config.server.port));
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(config: &AppConfig, pool: PgPool) -> AppState {
    let hasher = Arc::new(Argon2Hasher::new());
    let token_codec = Arc::new(TokenCodec::new(TokenConfig {
        secret: config.auth.secret.clone(),
        lifetime_hours: config.auth.session_hours,
    }));

    AppState::new(
        Arc::new(UserService::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            hasher,
        )),
        Arc::new(ProductService::new(Arc::new(
            PostgresProductRepository::new(pool),
        ))),
        token_codec,
    )
}

fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origin = config
        .allow_origin
        .parse::<HeaderValue>()
        .context("invalid CORS allow_origin")?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
