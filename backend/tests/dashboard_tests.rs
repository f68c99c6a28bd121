//! Coordination dashboard integration tests
//!
//! Covers the composition rules: per-farmer forecasts feed one aggregate,
//! the aggregate feeds logistics and storage, and the report stays
//! internally consistent.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    classify_harvest_level, run_coordination_dashboard, CoreError, CropProfile, FarmerRecord,
    HarvestLevel, PerishabilityCategory, Region, StorageFacility, StressLevel, WeatherDeviation,
    WeatherSignal,
};

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

fn weather(flag: WeatherDeviation) -> WeatherSignal {
    WeatherSignal {
        region_id: "DIST001".to_string(),
        deviation_flag: flag,
        forecast: "Normal conditions expected for next 5 days".to_string(),
        temperature_avg: dec("28"),
        humidity_avg: 65,
    }
}

fn farmer(id: &str, sowing: &str, area: &str, readiness: &str) -> FarmerRecord {
    let created = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
    FarmerRecord {
        farmer_id: id.to_string(),
        name: format!("Farmer {id}"),
        region_id: "DIST001".to_string(),
        crop_id: "TOMATO".to_string(),
        sowing_date: date(sowing),
        cultivated_area: dec(area),
        readiness_score: dec(readiness),
        contact: None,
        created_at: created,
        updated_at: created,
    }
}

fn district_farmers() -> Vec<FarmerRecord> {
    vec![
        farmer("F001", "2025-10-15", "2.5", "0.85"),
        farmer("F002", "2025-10-20", "1.8", "0.70"),
        farmer("F003", "2025-10-10", "3.2", "0.95"),
    ]
}

fn district_facilities() -> Vec<StorageFacility> {
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

/// The summary block mirrors the sub-assessments exactly
#[test]
fn test_summary_mirrors_components() {
    let report = run_coordination_dashboard(
        &district_farmers(),
        &tomato(),
        &nashik(),
        &weather(WeatherDeviation::Normal),
        &district_facilities(),
        date("2026-01-10"),
    )
    .unwrap();

    assert_eq!(
        report.summary.forecasted_harvest_volume,
        report.harvest_forecast.total_forecasted_volume
    );
    assert_eq!(
        report.summary.logistics_stress_level,
        report.logistics_assessment.stress_level
    );
    assert_eq!(
        report.summary.storage_action,
        report.storage_assessment.allocation.storage_action
    );
    assert_eq!(
        report.summary.storage_reserve_percentage,
        report.storage_assessment.allocation.storage_reserve_percentage
    );
}

/// The overall level reuses the same bands as the per-farmer classifier
#[test]
fn test_overall_level_uses_shared_bands() {
    let report = run_coordination_dashboard(
        &district_farmers(),
        &tomato(),
        &nashik(),
        &weather(WeatherDeviation::Normal),
        &district_facilities(),
        date("2026-01-10"),
    )
    .unwrap();

    let recomputed = classify_harvest_level(
        report.harvest_forecast.total_forecasted_volume,
        nashik().transport_capacity_per_day,
    );
    assert_eq!(report.summary.harvest_level, recomputed);
    // 57.81 + 31.50 + 78.00 = 167.31 tonnes against 100 t/day
    assert_eq!(report.summary.harvest_level, HarvestLevel::High);
    assert_eq!(report.summary.logistics_stress_level, StressLevel::High);
}

/// Merged advisories are logistics first, storage second, order intact
#[test]
fn test_advisory_merge_order() {
    let report = run_coordination_dashboard(
        &district_farmers(),
        &tomato(),
        &nashik(),
        &weather(WeatherDeviation::Normal),
        &district_facilities(),
        date("2026-01-10"),
    )
    .unwrap();

    // HIGH stress contributes four advisories, RESERVE_PARTIAL three
    assert_eq!(report.advisories.len(), 7);
    assert!(report.advisories[0].starts_with("CRITICAL: Pre-position"));
    assert!(report.advisories[4].starts_with("PLANNED:"));
}

/// A single-farmer report only counts that farmer
#[test]
fn test_single_farmer_scope() {
    let target = vec![farmer("F001", "2025-10-15", "2.5", "0.85")];
    let report = run_coordination_dashboard(
        &target,
        &tomato(),
        &nashik(),
        &weather(WeatherDeviation::Normal),
        &district_facilities(),
        date("2026-01-10"),
    )
    .unwrap();

    assert_eq!(report.harvest_forecast.farmer_count, 1);
    assert_eq!(report.summary.forecasted_harvest_volume, dec("57.81"));
    assert_eq!(report.summary.harvest_level, HarvestLevel::Low);
    assert_eq!(report.summary.logistics_stress_level, StressLevel::Normal);
}

/// An empty farmer set surfaces the aggregation error
#[test]
fn test_empty_farmer_set() {
    let err = run_coordination_dashboard(
        &[],
        &tomato(),
        &nashik(),
        &weather(WeatherDeviation::Normal),
        &district_facilities(),
        date("2026-01-10"),
    )
    .unwrap_err();
    assert_eq!(err, CoreError::EmptyForecastSet);
}

/// A bad record anywhere in the set fails the whole composition
#[test]
fn test_per_farmer_failures_are_not_dropped() {
    let mut farmers = district_farmers();
    farmers[1].readiness_score = dec("1.5");
    let err = run_coordination_dashboard(
        &farmers,
        &tomato(),
        &nashik(),
        &weather(WeatherDeviation::Normal),
        &district_facilities(),
        date("2026-01-10"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidInput {
            field: "farmer_readiness_score",
            ..
        }
    ));
}

/// Weather overrides flow through every forecast in the report
#[test]
fn test_weather_flag_flows_through() {
    let favorable = run_coordination_dashboard(
        &district_farmers(),
        &tomato(),
        &nashik(),
        &weather(WeatherDeviation::Favorable),
        &district_facilities(),
        date("2026-01-10"),
    )
    .unwrap();

    assert_eq!(favorable.weather.condition, "Favorable");
    for individual in &favorable.harvest_forecast.individual_forecasts {
        assert_eq!(individual.forecast.weather_modifier, dec("1.1"));
    }
}

/// Identical inputs produce an identical report
#[test]
fn test_report_idempotence() {
    let run = || {
        run_coordination_dashboard(
            &district_farmers(),
            &tomato(),
            &nashik(),
            &weather(WeatherDeviation::Normal),
            &district_facilities(),
            date("2026-01-10"),
        )
        .unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.summary.forecasted_harvest_volume, b.summary.forecasted_harvest_volume);
    assert_eq!(a.advisories, b.advisories);
    assert_eq!(
        a.storage_assessment.allocation.storage_reserve_percentage,
        b.storage_assessment.allocation.storage_reserve_percentage
    );
}
