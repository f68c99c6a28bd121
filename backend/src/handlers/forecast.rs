//! Forecast and dashboard HTTP handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::dashboard::{DashboardRequest, DashboardResponse};
use crate::services::forecast::{
    HarvestForecastRequest, HarvestForecastResponse, LogisticsResponse, StorageResponse,
    VolumeAssessmentRequest,
};
use crate::services::{DashboardService, ForecastService};
use crate::AppState;

/// Compute the harvest forecast for one farmer or all farmers
pub async fn harvest_forecast(
    State(state): State<AppState>,
    Json(request): Json<HarvestForecastRequest>,
) -> AppResult<Json<HarvestForecastResponse>> {
    let service = ForecastService::new(state.provider.clone());
    Ok(Json(service.harvest_forecast(request)?))
}

/// Assess logistics stress against transport capacity
pub async fn logistics_assessment(
    State(state): State<AppState>,
    Json(request): Json<VolumeAssessmentRequest>,
) -> AppResult<Json<LogisticsResponse>> {
    let service = ForecastService::new(state.provider.clone());
    Ok(Json(service.logistics(request)?))
}

/// Assess cold-storage allocation for the forecasted excess
pub async fn storage_assessment(
    State(state): State<AppState>,
    Json(request): Json<VolumeAssessmentRequest>,
) -> AppResult<Json<StorageResponse>> {
    let service = ForecastService::new(state.provider.clone());
    Ok(Json(service.storage(request)?))
}

/// Build the unified coordination dashboard
pub async fn coordination_dashboard(
    State(state): State<AppState>,
    Json(request): Json<DashboardRequest>,
) -> AppResult<Json<DashboardResponse>> {
    let service = DashboardService::new(state.provider.clone(), state.cache.clone());
    Ok(Json(service.run(request)?))
}
