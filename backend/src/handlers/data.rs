//! Reference data HTTP handlers: crops, regions, storage, weather, summary

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{whole_percent, CropProfile, Region, StorageFacility, WeatherSignal};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Serialize)]
pub struct CropListResponse {
    pub count: usize,
    pub crops: Vec<CropProfile>,
}

#[derive(Serialize)]
pub struct RegionListResponse {
    pub count: usize,
    pub regions: Vec<Region>,
}

/// A region with its current weather signal attached
#[derive(Serialize)]
pub struct RegionDetail {
    #[serde(flatten)]
    pub region: Region,
    pub weather: Option<WeatherSignal>,
}

/// A facility with availability figures attached for display
#[derive(Serialize)]
pub struct FacilityView {
    #[serde(flatten)]
    pub facility: StorageFacility,
    pub available_capacity: Decimal,
    pub utilization_percent: i32,
}

#[derive(Serialize)]
pub struct StorageListResponse {
    pub count: usize,
    pub total_capacity: Decimal,
    pub total_usage: Decimal,
    pub total_available: Decimal,
    pub overall_utilization_percent: i32,
    pub facilities: Vec<FacilityView>,
}

#[derive(Serialize)]
pub struct SystemSummary {
    pub crops: CropSummary,
    pub regions: RegionSummary,
    pub farmers: FarmerSummary,
    pub storage: StorageEstateSummary,
    pub transport: TransportSummary,
}

#[derive(Serialize)]
pub struct CropSummary {
    pub count: usize,
    pub active: Vec<String>,
}

#[derive(Serialize)]
pub struct RegionSummary {
    pub count: usize,
    pub active: Vec<String>,
}

#[derive(Serialize)]
pub struct FarmerSummary {
    pub count: usize,
    pub total_cultivated_area: Decimal,
}

#[derive(Serialize)]
pub struct StorageEstateSummary {
    pub facility_count: usize,
    pub total_capacity: Decimal,
    pub current_usage: Decimal,
    pub available: Decimal,
}

#[derive(Serialize)]
pub struct TransportSummary {
    pub total_capacity_per_day: Decimal,
}

fn facility_view(facility: StorageFacility) -> FacilityView {
    let available_capacity = facility.available();
    let utilization_percent = if facility.total_capacity > Decimal::ZERO {
        whole_percent(facility.current_usage, facility.total_capacity)
    } else {
        0
    };
    FacilityView {
        facility,
        available_capacity,
        utilization_percent,
    }
}

/// List available crops
pub async fn list_crops(State(state): State<AppState>) -> Json<CropListResponse> {
    let crops = state.provider.crops();
    Json(CropListResponse {
        count: crops.len(),
        crops,
    })
}

/// Get specific crop details
pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<String>,
) -> AppResult<Json<CropProfile>> {
    state
        .provider
        .crop(&crop_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Crop {}", crop_id.to_uppercase())))
}

/// List available regions
pub async fn list_regions(State(state): State<AppState>) -> Json<RegionListResponse> {
    let regions = state.provider.regions();
    Json(RegionListResponse {
        count: regions.len(),
        regions,
    })
}

/// Get specific region details with its weather signal
pub async fn get_region(
    State(state): State<AppState>,
    Path(region_id): Path<String>,
) -> AppResult<Json<RegionDetail>> {
    let region = state
        .provider
        .region(&region_id)
        .ok_or_else(|| AppError::NotFound(format!("Region {}", region_id.to_uppercase())))?;
    let weather = state.provider.weather(&region.region_id);
    Ok(Json(RegionDetail { region, weather }))
}

/// List all storage facilities with estate totals
pub async fn list_storage(State(state): State<AppState>) -> Json<StorageListResponse> {
    let facilities = state.provider.facilities();
    let total_capacity: Decimal = facilities.iter().map(|f| f.total_capacity).sum();
    let total_usage: Decimal = facilities.iter().map(|f| f.current_usage).sum();
    let overall_utilization_percent = if total_capacity > Decimal::ZERO {
        whole_percent(total_usage, total_capacity)
    } else {
        0
    };

    Json(StorageListResponse {
        count: facilities.len(),
        total_capacity,
        total_usage,
        total_available: total_capacity - total_usage,
        overall_utilization_percent,
        facilities: facilities.into_iter().map(facility_view).collect(),
    })
}

/// Get a specific storage facility
pub async fn get_storage(
    State(state): State<AppState>,
    Path(storage_id): Path<String>,
) -> AppResult<Json<FacilityView>> {
    state
        .provider
        .facility(&storage_id)
        .map(|facility| Json(facility_view(facility)))
        .ok_or_else(|| {
            AppError::NotFound(format!("Storage facility {}", storage_id.to_uppercase()))
        })
}

/// Get weather signals for all regions
pub async fn get_weather(
    State(state): State<AppState>,
) -> Json<HashMap<String, WeatherSignal>> {
    Json(state.provider.weather_by_region())
}

/// Overall system summary
pub async fn system_summary(State(state): State<AppState>) -> Json<SystemSummary> {
    let crops = state.provider.crops();
    let regions = state.provider.regions();
    let farmers = state.provider.farmers();
    let facilities = state.provider.facilities();

    let total_cultivated_area: Decimal = farmers.iter().map(|f| f.cultivated_area).sum();
    let total_capacity: Decimal = facilities.iter().map(|f| f.total_capacity).sum();
    let current_usage: Decimal = facilities.iter().map(|f| f.current_usage).sum();
    let transport_capacity: Decimal = regions
        .iter()
        .map(|r| r.transport_capacity_per_day)
        .sum();

    Json(SystemSummary {
        crops: CropSummary {
            count: crops.len(),
            active: crops.into_iter().map(|c| c.crop_type).collect(),
        },
        regions: RegionSummary {
            count: regions.len(),
            active: regions.into_iter().map(|r| r.name).collect(),
        },
        farmers: FarmerSummary {
            count: farmers.len(),
            total_cultivated_area,
        },
        storage: StorageEstateSummary {
            facility_count: facilities.len(),
            total_capacity,
            current_usage,
            available: total_capacity - current_usage,
        },
        transport: TransportSummary {
            total_capacity_per_day: transport_capacity,
        },
    })
}
