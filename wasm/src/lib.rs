//! WebAssembly module for the AlignAI Coordination Platform
//!
//! Provides client-side computation for:
//! - Harvest forecast previews
//! - Harvest level classification
//! - Transport stress assessment
//! - Storage reservation decisions

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript bindings
pub use shared::engine::*;
pub use shared::models::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Forecast parameters received from JavaScript
#[derive(Deserialize)]
struct ForecastParams {
    sowing_date: NaiveDate,
    avg_maturity_days: u32,
    cultivated_area: Decimal,
    avg_yield_per_hectare: Decimal,
    farmer_readiness_score: Decimal,
    weather_deviation_flag: i8,
    transport_capacity: Decimal,
}

/// Compute a harvest forecast from JSON parameters for a given date
#[wasm_bindgen]
pub fn compute_forecast(params_json: &str, today: &str) -> Result<String, JsValue> {
    let params: ForecastParams = serde_json::from_str(params_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid params JSON: {}", e)))?;
    let today: NaiveDate = today
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date: {}", e)))?;

    let input = ForecastInput {
        sowing_date: params.sowing_date,
        avg_maturity_days: params.avg_maturity_days,
        cultivated_area: params.cultivated_area,
        avg_yield_per_hectare: params.avg_yield_per_hectare,
        farmer_readiness_score: params.farmer_readiness_score,
        weather_deviation: WeatherDeviation::from(params.weather_deviation_flag),
        transport_capacity: params.transport_capacity,
    };

    let forecast = compute_harvest_forecast(&input, today)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&forecast).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Classify a forecasted volume against daily transport capacity
#[wasm_bindgen]
pub fn classify_harvest_volume(forecasted_volume: f64, transport_capacity: f64) -> String {
    let volume = Decimal::try_from(forecasted_volume).unwrap_or(Decimal::ZERO);
    let capacity = Decimal::try_from(transport_capacity).unwrap_or(Decimal::ZERO);
    if capacity <= Decimal::ZERO {
        return "UNKNOWN".to_string();
    }
    format!("{}", classify_harvest_level(volume, capacity))
}

/// Weather modifier for a deviation flag
#[wasm_bindgen]
pub fn weather_modifier_for(deviation_flag: i8) -> f64 {
    WeatherDeviation::from(deviation_flag)
        .modifier()
        .to_f64()
        .unwrap_or(1.0)
}

/// Validate a farmer-reported readiness score
#[wasm_bindgen]
pub fn validate_readiness_score(score: f64) -> bool {
    (0.0..=1.0).contains(&score)
}

/// Assess transport stress client-side, returning the assessment as JSON
#[wasm_bindgen]
pub fn assess_transport_stress(
    forecasted_volume: f64,
    transport_capacity: f64,
) -> Result<String, JsValue> {
    let volume = Decimal::try_from(forecasted_volume)
        .map_err(|e| JsValue::from_str(&format!("Invalid volume: {}", e)))?;
    let capacity = Decimal::try_from(transport_capacity)
        .map_err(|e| JsValue::from_str(&format!("Invalid capacity: {}", e)))?;

    let assessment = assess_logistics(volume, capacity, "LOCAL")
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&assessment).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Storage reserve percentage for an excess volume against estate capacity
#[wasm_bindgen]
pub fn storage_reserve_percentage(
    excess_volume: f64,
    available_storage: f64,
    total_capacity: f64,
) -> i32 {
    let excess = Decimal::try_from(excess_volume).unwrap_or(Decimal::ZERO);
    let available = Decimal::try_from(available_storage).unwrap_or(Decimal::ZERO);
    let total = Decimal::try_from(total_capacity).unwrap_or(Decimal::ZERO);
    if total <= Decimal::ZERO {
        return 0;
    }
    determine_storage_action(excess, available, total).storage_reserve_percentage
}
