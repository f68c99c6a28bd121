//! Harvest inflow forecasting
//!
//! Estimates how much produce will enter the system over the next few days:
//! expected harvest date, readiness index, volume forecast, and intensity
//! classification.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::WeatherDeviation;
use crate::types::{round2, round3};
use crate::validation::{require_positive, require_unit_interval};

/// Number of days ahead a forecast claims to cover
pub const FORECAST_WINDOW_DAYS: i64 = 5;

/// Inputs for a single-farmer harvest forecast
#[derive(Debug, Clone)]
pub struct ForecastInput {
    pub sowing_date: NaiveDate,
    pub avg_maturity_days: u32,
    /// Cultivated area in hectares, > 0
    pub cultivated_area: Decimal,
    /// Average yield in tonnes per hectare, > 0
    pub avg_yield_per_hectare: Decimal,
    /// Farmer-reported readiness in [0, 1]
    pub farmer_readiness_score: Decimal,
    pub weather_deviation: WeatherDeviation,
    /// Daily transport capacity in tonnes, > 0
    pub transport_capacity: Decimal,
}

/// Harvest intensity relative to daily transport capacity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarvestLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for HarvestLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarvestLevel::Low => write!(f, "LOW"),
            HarvestLevel::Medium => write!(f, "MEDIUM"),
            HarvestLevel::High => write!(f, "HIGH"),
        }
    }
}

/// A computed harvest forecast. Immutable once computed; recomputed on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvestForecast {
    pub expected_harvest_date: NaiveDate,
    /// Whole days until the expected harvest; negative means overdue
    pub days_to_harvest: i64,
    pub maturity_score: Decimal,
    pub weather_modifier: Decimal,
    pub readiness_index: Decimal,
    pub base_volume_tonnes: Decimal,
    pub forecasted_harvest_volume: Decimal,
    pub harvest_level: HarvestLevel,
    pub confidence_score: Decimal,
    pub forecast_window_days: i64,
}

/// A forecast tagged with the farmer it was computed for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerForecast {
    pub farmer_id: String,
    pub farmer_name: String,
    #[serde(flatten)]
    pub forecast: HarvestForecast,
}

/// Aggregate view over several per-farmer forecasts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedForecast {
    pub total_forecasted_volume: Decimal,
    pub farmer_count: usize,
    pub average_confidence: Decimal,
    pub individual_forecasts: Vec<FarmerForecast>,
}

/// Classify a forecasted volume against daily transport capacity.
///
/// Both cutoffs are inclusive on the MEDIUM side: exactly 0.7x capacity and
/// exactly capacity are MEDIUM. The same bands apply to per-farmer and
/// aggregate volumes, so both call sites share this function.
pub fn classify_harvest_level(
    forecasted_volume: Decimal,
    transport_capacity: Decimal,
) -> HarvestLevel {
    if forecasted_volume < Decimal::new(7, 1) * transport_capacity {
        HarvestLevel::Low
    } else if forecasted_volume <= transport_capacity {
        HarvestLevel::Medium
    } else {
        HarvestLevel::High
    }
}

/// Expected harvest date: sowing date plus the crop's average maturity.
/// Whole-day calendar arithmetic, no timezone involvement.
pub fn expected_harvest_date(
    sowing_date: NaiveDate,
    avg_maturity_days: u32,
) -> CoreResult<NaiveDate> {
    sowing_date
        .checked_add_days(Days::new(u64::from(avg_maturity_days)))
        .ok_or_else(|| CoreError::invalid("sowing_date", "expected harvest date is out of range"))
}

/// Signed whole days from `today` until the expected harvest date
pub fn days_to_harvest(expected: NaiveDate, today: NaiveDate) -> i64 {
    (expected - today).num_days()
}

/// Binary maturity step: full score inside the forecast window, half outside
fn maturity_score(days_to_harvest: i64) -> Decimal {
    if days_to_harvest <= FORECAST_WINDOW_DAYS {
        Decimal::ONE
    } else {
        Decimal::new(5, 1)
    }
}

/// Compute a complete harvest forecast for one farmer.
///
/// `today` is injected by the caller so the computation stays deterministic.
pub fn compute_harvest_forecast(
    input: &ForecastInput,
    today: NaiveDate,
) -> CoreResult<HarvestForecast> {
    require_positive("cultivated_area", input.cultivated_area)?;
    require_positive("avg_yield_per_hectare", input.avg_yield_per_hectare)?;
    require_positive("transport_capacity", input.transport_capacity)?;
    require_unit_interval("farmer_readiness_score", input.farmer_readiness_score)?;

    let expected = expected_harvest_date(input.sowing_date, input.avg_maturity_days)?;
    let days = days_to_harvest(expected, today);
    let maturity = maturity_score(days);
    let modifier = input.weather_deviation.modifier();

    // Weights sum to 1.0, but a favorable modifier pushes the index above
    // 1.0 when readiness and maturity are already high. The classification
    // bands are tuned against that arithmetic, so the index is not clamped.
    let readiness_index = Decimal::new(5, 1) * input.farmer_readiness_score
        + Decimal::new(3, 1) * maturity
        + Decimal::new(2, 1) * modifier;

    let base_volume = input.cultivated_area * input.avg_yield_per_hectare;
    let forecasted_volume = base_volume * readiness_index;

    let confidence = (Decimal::new(5, 1)
        + Decimal::new(3, 1) * input.farmer_readiness_score
        + Decimal::new(15, 2) * maturity)
        .min(Decimal::new(95, 2));

    Ok(HarvestForecast {
        expected_harvest_date: expected,
        days_to_harvest: days,
        maturity_score: round2(maturity),
        weather_modifier: modifier,
        readiness_index: round3(readiness_index),
        base_volume_tonnes: round2(base_volume),
        forecasted_harvest_volume: round2(forecasted_volume),
        harvest_level: classify_harvest_level(forecasted_volume, input.transport_capacity),
        confidence_score: round2(confidence),
        forecast_window_days: FORECAST_WINDOW_DAYS,
    })
}

/// Aggregate per-farmer forecasts into a regional total.
///
/// The sum and mean are order-independent, so callers may compute the
/// individual forecasts in any order. An empty set is an error rather than
/// a NaN-producing division.
pub fn aggregate_forecasts(forecasts: Vec<FarmerForecast>) -> CoreResult<AggregatedForecast> {
    if forecasts.is_empty() {
        return Err(CoreError::EmptyForecastSet);
    }

    let total: Decimal = forecasts
        .iter()
        .map(|f| f.forecast.forecasted_harvest_volume)
        .sum();
    let confidence_sum: Decimal = forecasts
        .iter()
        .map(|f| f.forecast.confidence_score)
        .sum();
    let average_confidence = confidence_sum / Decimal::from(forecasts.len() as u64);

    Ok(AggregatedForecast {
        total_forecasted_volume: round2(total),
        farmer_count: forecasts.len(),
        average_confidence: round2(average_confidence),
        individual_forecasts: forecasts,
    })
}
