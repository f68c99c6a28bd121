//! Coordination dashboard composition
//!
//! Runs the harvest forecaster per farmer, aggregates, and feeds the total
//! into the logistics and storage assessors to build one combined report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::forecast::{
    aggregate_forecasts, classify_harvest_level, compute_harvest_forecast, AggregatedForecast,
    FarmerForecast, ForecastInput, HarvestLevel, FORECAST_WINDOW_DAYS,
};
use crate::engine::logistics::{assess_logistics, StagingLocation, StressLevel};
use crate::engine::storage::{
    aggregate_facilities, assess_storage_allocation, AllocationDecision, DemandForecast,
    StorageAction, StorageSummary,
};
use crate::error::CoreResult;
use crate::models::{CropProfile, FarmerRecord, Region, StorageFacility, WeatherDeviation, WeatherSignal};

/// Headline metrics for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub harvest_level: HarvestLevel,
    pub forecasted_harvest_volume: Decimal,
    pub logistics_stress_level: StressLevel,
    pub storage_action: StorageAction,
    pub storage_reserve_percentage: i32,
}

/// Weather context echoed back in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherContext {
    pub condition: String,
    pub deviation_flag: WeatherDeviation,
    pub forecast: String,
}

/// Logistics figures broken out for the report (advisories are merged at the
/// top level instead of repeated here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsBreakdown {
    pub alert: bool,
    pub stress_level: StressLevel,
    pub utilization_ratio: Decimal,
    pub transport_capacity: Decimal,
    pub excess_volume: Decimal,
    pub staging_locations: Vec<StagingLocation>,
}

/// Storage figures broken out for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageBreakdown {
    pub facilities: StorageSummary,
    pub allocation: AllocationDecision,
    pub demand: DemandForecast,
}

/// The unified coordination report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedReport {
    pub crop: String,
    pub region: String,
    pub forecast_window: i64,
    pub summary: DashboardSummary,
    pub weather: WeatherContext,
    pub harvest_forecast: AggregatedForecast,
    pub logistics_assessment: LogisticsBreakdown,
    pub storage_assessment: StorageBreakdown,
    pub advisories: Vec<String>,
}

/// Build the combined report for an already-resolved farmer set.
///
/// The first failing sub-step aborts the composition; per-farmer forecast
/// errors are propagated, never dropped.
pub fn run_coordination_dashboard(
    farmers: &[FarmerRecord],
    crop: &CropProfile,
    region: &Region,
    weather: &WeatherSignal,
    facilities: &[StorageFacility],
    today: NaiveDate,
) -> CoreResult<CombinedReport> {
    let forecasts = farmers
        .iter()
        .map(|farmer| {
            let forecast = compute_harvest_forecast(
                &ForecastInput {
                    sowing_date: farmer.sowing_date,
                    avg_maturity_days: crop.avg_maturity_days,
                    cultivated_area: farmer.cultivated_area,
                    avg_yield_per_hectare: crop.avg_yield_per_hectare,
                    farmer_readiness_score: farmer.readiness_score,
                    weather_deviation: weather.deviation_flag,
                    transport_capacity: region.transport_capacity_per_day,
                },
                today,
            )?;
            Ok(FarmerForecast {
                farmer_id: farmer.farmer_id.clone(),
                farmer_name: farmer.name.clone(),
                forecast,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let aggregated = aggregate_forecasts(forecasts)?;
    let total_volume = aggregated.total_forecasted_volume;

    let logistics = assess_logistics(
        total_volume,
        region.transport_capacity_per_day,
        &region.region_id,
    )?;

    let estate = aggregate_facilities(facilities);
    let storage = assess_storage_allocation(
        total_volume,
        region.transport_capacity_per_day,
        estate.total_capacity,
        estate.total_usage,
    )?;

    // Same bands as the per-farmer classification, applied to the aggregate
    let overall_level = classify_harvest_level(total_volume, region.transport_capacity_per_day);

    let mut advisories = logistics.advisories.clone();
    advisories.extend(storage.advisories.iter().cloned());

    Ok(CombinedReport {
        crop: crop.crop_type.clone(),
        region: region.name.clone(),
        forecast_window: FORECAST_WINDOW_DAYS,
        summary: DashboardSummary {
            harvest_level: overall_level,
            forecasted_harvest_volume: total_volume,
            logistics_stress_level: logistics.logistics_stress_level,
            storage_action: storage.allocation_decision.storage_action,
            storage_reserve_percentage: storage.allocation_decision.storage_reserve_percentage,
        },
        weather: WeatherContext {
            condition: weather.deviation_flag.condition().to_string(),
            deviation_flag: weather.deviation_flag,
            forecast: weather.forecast.clone(),
        },
        harvest_forecast: aggregated,
        logistics_assessment: LogisticsBreakdown {
            alert: logistics.logistics_alert,
            stress_level: logistics.logistics_stress_level,
            utilization_ratio: logistics.utilization_ratio,
            transport_capacity: logistics.transport_capacity,
            excess_volume: logistics.excess_volume,
            staging_locations: logistics.staging_locations,
        },
        storage_assessment: StorageBreakdown {
            facilities: estate,
            allocation: storage.allocation_decision,
            demand: storage.demand_forecast,
        },
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::models::PerishabilityCategory;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn tomato() -> CropProfile {
        CropProfile {
            crop_id: "TOMATO".to_string(),
            crop_type: "Tomato".to_string(),
            avg_maturity_days: 90,
            avg_yield_per_hectare: dec("25"),
            category: PerishabilityCategory::Perishable,
            shelf_life_days: 7,
        }
    }

    fn nashik() -> Region {
        Region {
            region_id: "DIST001".to_string(),
            name: "Nashik District".to_string(),
            state: "Maharashtra".to_string(),
            transport_capacity_per_day: dec("100"),
            typical_harvest_window: "Oct-Feb".to_string(),
        }
    }

    fn normal_weather() -> WeatherSignal {
        WeatherSignal {
            region_id: "DIST001".to_string(),
            deviation_flag: WeatherDeviation::Normal,
            forecast: "Normal conditions expected for next 5 days".to_string(),
            temperature_avg: dec("28"),
            humidity_avg: 65,
        }
    }

    fn farmer(id: &str, area: &str, readiness: &str) -> FarmerRecord {
        let created = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        FarmerRecord {
            farmer_id: id.to_string(),
            name: format!("Farmer {id}"),
            region_id: "DIST001".to_string(),
            crop_id: "TOMATO".to_string(),
            sowing_date: date("2025-10-15"),
            cultivated_area: dec(area),
            readiness_score: dec(readiness),
            contact: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn facilities() -> Vec<StorageFacility> {
        vec![
            StorageFacility {
                storage_id: "CS001".to_string(),
                name: "Nashik Cold Storage Hub".to_string(),
                region_id: "DIST001".to_string(),
                total_capacity: dec("500"),
                current_usage: dec("150"),
                facility_type: "Cold Storage".to_string(),
                temperature_range: "4-8°C".to_string(),
            },
            StorageFacility {
                storage_id: "CS002".to_string(),
                name: "Sinnar Agri Warehouse".to_string(),
                region_id: "DIST001".to_string(),
                total_capacity: dec("300"),
                current_usage: dec("100"),
                facility_type: "Cold Storage".to_string(),
                temperature_range: "4-8°C".to_string(),
            },
        ]
    }

    #[test]
    fn test_report_composes_all_assessments() {
        let farmers = vec![
            farmer("F001", "2.5", "0.85"),
            farmer("F002", "1.8", "0.70"),
            farmer("F003", "3.2", "0.95"),
        ];
        let report = run_coordination_dashboard(
            &farmers,
            &tomato(),
            &nashik(),
            &normal_weather(),
            &facilities(),
            date("2026-01-10"),
        )
        .unwrap();

        assert_eq!(report.crop, "Tomato");
        assert_eq!(report.region, "Nashik District");
        assert_eq!(report.forecast_window, 5);
        assert_eq!(report.harvest_forecast.farmer_count, 3);
        assert_eq!(report.weather.condition, "Normal");
        assert_eq!(
            report.summary.forecasted_harvest_volume,
            report.harvest_forecast.total_forecasted_volume
        );
        // 57.81 + 38.25 + 78.00 = 174.06 over capacity 100
        assert_eq!(report.summary.forecasted_harvest_volume, dec("174.06"));
        assert_eq!(report.summary.harvest_level, HarvestLevel::High);
        assert_eq!(report.summary.logistics_stress_level, StressLevel::High);
        assert_eq!(report.logistics_assessment.excess_volume, dec("74.06"));
        // excess 74.06 <= available 550 and below 0.7*550, so partial at
        // round(100*74.06/800) = 9%
        assert_eq!(report.summary.storage_action, StorageAction::ReservePartial);
        assert_eq!(report.summary.storage_reserve_percentage, 9);
    }

    #[test]
    fn test_overall_level_matches_the_shared_bands() {
        let farmers = vec![farmer("F001", "2.5", "0.85")];
        let report = run_coordination_dashboard(
            &farmers,
            &tomato(),
            &nashik(),
            &normal_weather(),
            &facilities(),
            date("2026-01-10"),
        )
        .unwrap();
        // Single farmer at 57.81 tonnes stays LOW on both levels
        assert_eq!(report.summary.harvest_level, HarvestLevel::Low);
        assert_eq!(
            report.harvest_forecast.individual_forecasts[0]
                .forecast
                .harvest_level,
            HarvestLevel::Low
        );
    }

    #[test]
    fn test_advisories_preserve_component_order() {
        let farmers = vec![
            farmer("F001", "2.5", "0.85"),
            farmer("F002", "1.8", "0.70"),
            farmer("F003", "3.2", "0.95"),
        ];
        let report = run_coordination_dashboard(
            &farmers,
            &tomato(),
            &nashik(),
            &normal_weather(),
            &facilities(),
            date("2026-01-10"),
        )
        .unwrap();

        // Logistics advisories first, storage advisories after, order intact
        assert!(report.advisories[0].starts_with("CRITICAL: Pre-position"));
        let storage_start = report.advisories.len() - 3;
        assert!(report.advisories[storage_start].starts_with("PLANNED:"));
    }

    #[test]
    fn test_empty_farmer_set_propagates() {
        let err = run_coordination_dashboard(
            &[],
            &tomato(),
            &nashik(),
            &normal_weather(),
            &facilities(),
            date("2026-01-10"),
        )
        .unwrap_err();
        assert_eq!(err, CoreError::EmptyForecastSet);
    }

    #[test]
    fn test_invalid_farmer_record_is_not_swallowed() {
        let mut bad = farmer("F009", "2.5", "0.85");
        bad.cultivated_area = Decimal::ZERO;
        let err = run_coordination_dashboard(
            &[farmer("F001", "2.5", "0.85"), bad],
            &tomato(),
            &nashik(),
            &normal_weather(),
            &facilities(),
            date("2026-01-10"),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { field: "cultivated_area", .. }));
    }

    #[test]
    fn test_adverse_weather_lowers_the_total() {
        let farmers = vec![farmer("F001", "2.5", "0.85")];
        let mut adverse = normal_weather();
        adverse.deviation_flag = WeatherDeviation::Adverse;
        let normal = run_coordination_dashboard(
            &farmers,
            &tomato(),
            &nashik(),
            &normal_weather(),
            &facilities(),
            date("2026-01-10"),
        )
        .unwrap();
        let degraded = run_coordination_dashboard(
            &farmers,
            &tomato(),
            &nashik(),
            &adverse,
            &facilities(),
            date("2026-01-10"),
        )
        .unwrap();
        assert!(
            degraded.summary.forecasted_harvest_volume
                < normal.summary.forecasted_harvest_volume
        );
        assert_eq!(degraded.weather.condition, "Adverse");
    }
}
