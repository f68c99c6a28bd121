//! Forecast assessment services
//!
//! Resolves records through the data provider, runs the pure calculators,
//! and shapes the responses for the API layer.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    aggregate_facilities, aggregate_forecasts, assess_logistics, assess_storage_allocation,
    compute_harvest_forecast, AggregatedForecast, FarmerForecast, ForecastInput,
    LogisticsAssessment, StorageAssessment, StorageSummary,
};

use crate::error::AppResult;
use crate::repository::DataProvider;
use crate::services::{resolve_context, target_farmers, today, ForecastContext};

/// Forecast service backed by the data provider
pub struct ForecastService {
    provider: Arc<dyn DataProvider>,
}

/// Request for a harvest forecast run
#[derive(Debug, Deserialize)]
pub struct HarvestForecastRequest {
    /// Forecast a single farmer; omitted means every registered farmer
    pub farmer_id: Option<String>,
    /// Override the stored weather deviation flag for what-if queries
    pub weather_deviation: Option<i8>,
}

/// Request for a logistics or storage assessment
#[derive(Debug, Deserialize)]
pub struct VolumeAssessmentRequest {
    /// Assess an explicit volume; omitted means the all-farmers aggregate
    pub forecasted_volume: Option<Decimal>,
    pub weather_deviation: Option<i8>,
}

#[derive(Debug, Serialize)]
pub struct HarvestForecastResponse {
    pub crop: String,
    pub region: String,
    pub weather_condition: String,
    #[serde(flatten)]
    pub aggregated: AggregatedForecast,
}

#[derive(Debug, Serialize)]
pub struct LogisticsResponse {
    pub crop: String,
    pub region: String,
    #[serde(flatten)]
    pub assessment: LogisticsAssessment,
}

#[derive(Debug, Serialize)]
pub struct StorageResponse {
    pub crop: String,
    pub region: String,
    pub facilities: StorageSummary,
    #[serde(flatten)]
    pub assessment: StorageAssessment,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// Forecast harvest inflow for one farmer or the whole registry.
    pub fn harvest_forecast(
        &self,
        request: HarvestForecastRequest,
    ) -> AppResult<HarvestForecastResponse> {
        let context = resolve_context(self.provider.as_ref(), request.weather_deviation)?;
        let farmers = target_farmers(self.provider.as_ref(), request.farmer_id.as_deref())?;
        let aggregated = forecast_farmers(&farmers, &context)?;

        Ok(HarvestForecastResponse {
            crop: context.crop.crop_type,
            region: context.region.name,
            weather_condition: context.weather.deviation_flag.condition().to_string(),
            aggregated,
        })
    }

    /// Assess transport stress for an explicit or aggregated volume.
    pub fn logistics(&self, request: VolumeAssessmentRequest) -> AppResult<LogisticsResponse> {
        let context = resolve_context(self.provider.as_ref(), request.weather_deviation)?;
        let volume = self.resolve_volume(request.forecasted_volume, &context)?;
        let assessment = assess_logistics(
            volume,
            context.region.transport_capacity_per_day,
            &context.region.region_id,
        )?;

        Ok(LogisticsResponse {
            crop: context.crop.crop_type,
            region: context.region.name,
            assessment,
        })
    }

    /// Assess cold-storage allocation for an explicit or aggregated volume.
    pub fn storage(&self, request: VolumeAssessmentRequest) -> AppResult<StorageResponse> {
        let context = resolve_context(self.provider.as_ref(), request.weather_deviation)?;
        let volume = self.resolve_volume(request.forecasted_volume, &context)?;
        let estate = aggregate_facilities(
            &self
                .provider
                .facilities_in_region(&context.region.region_id),
        );
        let assessment = assess_storage_allocation(
            volume,
            context.region.transport_capacity_per_day,
            estate.total_capacity,
            estate.total_usage,
        )?;

        Ok(StorageResponse {
            crop: context.crop.crop_type,
            region: context.region.name,
            facilities: estate,
            assessment,
        })
    }

    /// Use the explicit volume when given, otherwise aggregate every
    /// registered farmer's forecast.
    fn resolve_volume(
        &self,
        explicit: Option<Decimal>,
        context: &ForecastContext,
    ) -> AppResult<Decimal> {
        if let Some(volume) = explicit {
            return Ok(volume);
        }
        let farmers = self.provider.farmers();
        let aggregated = forecast_farmers(&farmers, context)?;
        Ok(aggregated.total_forecasted_volume)
    }
}

/// Run the forecaster over a farmer set and aggregate the results.
pub(crate) fn forecast_farmers(
    farmers: &[shared::FarmerRecord],
    context: &ForecastContext,
) -> AppResult<AggregatedForecast> {
    let reference_date = today();
    let forecasts = farmers
        .iter()
        .map(|farmer| {
            let forecast = compute_harvest_forecast(
                &ForecastInput {
                    sowing_date: farmer.sowing_date,
                    avg_maturity_days: context.crop.avg_maturity_days,
                    cultivated_area: farmer.cultivated_area,
                    avg_yield_per_hectare: context.crop.avg_yield_per_hectare,
                    farmer_readiness_score: farmer.readiness_score,
                    weather_deviation: context.weather.deviation_flag,
                    transport_capacity: context.region.transport_capacity_per_day,
                },
                reference_date,
            )?;
            Ok(FarmerForecast {
                farmer_id: farmer.farmer_id.clone(),
                farmer_name: farmer.name.clone(),
                forecast,
            })
        })
        .collect::<Result<Vec<_>, shared::CoreError>>()?;

    Ok(aggregate_forecasts(forecasts)?)
}
