//! Business logic services for the AlignAI Coordination Platform

pub mod dashboard;
pub mod farmer;
pub mod forecast;

pub use dashboard::DashboardService;
pub use farmer::FarmerService;
pub use forecast::ForecastService;

use chrono::{NaiveDate, Utc};
use shared::{CropProfile, FarmerRecord, Region, WeatherDeviation, WeatherSignal};

use crate::error::{AppError, AppResult};
use crate::repository::DataProvider;

/// Resolved reference data for one assessment run
pub struct ForecastContext {
    pub crop: CropProfile,
    pub region: Region,
    pub weather: WeatherSignal,
}

/// Resolve the active crop, region, and weather signal.
///
/// The MVP operates a single crop in a single district, so the first entries
/// are authoritative. An explicit request flag overrides the stored weather
/// deviation for what-if queries.
pub fn resolve_context(
    provider: &dyn DataProvider,
    weather_override: Option<i8>,
) -> AppResult<ForecastContext> {
    let crop = provider
        .crops()
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Configuration("no crop profiles loaded".to_string()))?;
    let region = provider
        .regions()
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Configuration("no regions loaded".to_string()))?;
    let mut weather = provider
        .weather(&region.region_id)
        .ok_or_else(|| AppError::NotFound(format!("Weather for region {}", region.region_id)))?;

    if let Some(flag) = weather_override {
        weather.deviation_flag = WeatherDeviation::from(flag);
    }

    Ok(ForecastContext {
        crop,
        region,
        weather,
    })
}

/// Resolve the farmer set an assessment targets: one farmer by id (a miss is
/// a NotFound, never an empty default) or every registered farmer.
pub fn target_farmers(
    provider: &dyn DataProvider,
    farmer_id: Option<&str>,
) -> AppResult<Vec<FarmerRecord>> {
    match farmer_id {
        Some(id) => {
            let farmer = provider
                .farmer(id)
                .ok_or_else(|| AppError::NotFound(format!("Farmer {}", id.to_uppercase())))?;
            Ok(vec![farmer])
        }
        None => Ok(provider.farmers()),
    }
}

/// The calculators take the current date as an explicit input; this is the
/// single place the wall clock enters.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
