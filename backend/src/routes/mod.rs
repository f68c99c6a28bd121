//! Route definitions for the AlignAI Coordination Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Forecast pipeline
        .nest("/forecast", forecast_routes())
        // Reference data and farmer registry
        .nest("/data", data_routes())
}

/// Forecast, logistics, storage, and dashboard routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/harvest", post(handlers::harvest_forecast))
        .route("/logistics", post(handlers::logistics_assessment))
        .route("/storage", post(handlers::storage_assessment))
        .route("/dashboard", post(handlers::coordination_dashboard))
}

/// Crop, region, storage, farmer, and weather data routes
fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/crops", get(handlers::list_crops))
        .route("/crops/:crop_id", get(handlers::get_crop))
        .route("/regions", get(handlers::list_regions))
        .route("/regions/:region_id", get(handlers::get_region))
        .route("/storage", get(handlers::list_storage))
        .route("/storage/:storage_id", get(handlers::get_storage))
        .route(
            "/farmers",
            get(handlers::list_farmers).post(handlers::register_farmer),
        )
        .route(
            "/farmers/:farmer_id",
            get(handlers::get_farmer).put(handlers::update_farmer),
        )
        .route("/weather", get(handlers::get_weather))
        .route("/summary", get(handlers::system_summary))
}
