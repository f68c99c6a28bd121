//! Farmer registry HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::FarmerRecord;

use crate::error::AppResult;
use crate::services::farmer::{
    FarmerDetail, FarmerListSummary, RegisterFarmerInput, UpdateFarmerInput,
};
use crate::services::FarmerService;
use crate::AppState;

/// List all registered farmers with registry totals
pub async fn list_farmers(State(state): State<AppState>) -> Json<FarmerListSummary> {
    let service = FarmerService::new(state.provider.clone());
    Json(service.list())
}

/// Get a specific farmer with crop and region details
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
) -> AppResult<Json<FarmerDetail>> {
    let service = FarmerService::new(state.provider.clone());
    Ok(Json(service.get(&farmer_id)?))
}

/// Register a new farmer
pub async fn register_farmer(
    State(state): State<AppState>,
    Json(input): Json<RegisterFarmerInput>,
) -> AppResult<(StatusCode, Json<FarmerRecord>)> {
    let service = FarmerService::new(state.provider.clone());
    let record = service.register(input)?;
    // Registry changes make memoized dashboards stale
    state.cache.invalidate_all();
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a farmer's readiness, area, or sowing date
pub async fn update_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
    Json(input): Json<UpdateFarmerInput>,
) -> AppResult<Json<FarmerRecord>> {
    let service = FarmerService::new(state.provider.clone());
    let record = service.update(&farmer_id, input)?;
    state.cache.invalidate_all();
    Ok(Json(record))
}
