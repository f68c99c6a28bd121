//! AlignAI Agricultural Coordination API - Backend Server
//!
//! Coordination layer for harvest forecasting, logistics stress detection,
//! and cold-storage allocation across a district's farmers.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod config;
mod data;
mod error;
mod handlers;
mod repository;
mod routes;
mod services;

pub use config::Config;

use cache::ResponseCache;
use repository::{DataProvider, InMemoryProvider};
use services::dashboard::DashboardResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub cache: Arc<ResponseCache<DashboardResponse>>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "align_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting AlignAI Coordination Server");
    tracing::info!("Environment: {}", config.environment);

    // Seed the in-memory data provider
    let provider: Arc<dyn DataProvider> = Arc::new(InMemoryProvider::with_sample_data());
    tracing::info!("Sample data loaded");

    // Dashboard response cache
    let cache = Arc::new(ResponseCache::new(
        config.cache.enabled,
        Duration::from_secs(config.cache.ttl_seconds),
    ));

    // Create application state
    let state = AppState {
        provider,
        cache,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AlignAI Agricultural Coordination API v1.0"
}
