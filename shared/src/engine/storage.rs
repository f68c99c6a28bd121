//! Storage allocation forecasting
//!
//! Predicts cold-storage demand from excess harvest volume, compares it to
//! available capacity, and recommends a reservation action.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::models::StorageFacility;
use crate::types::{round2, whole_percent};
use crate::validation::{require_non_negative, require_positive, require_usage_within_capacity};

/// Band for how full the storage estate currently is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtilizationBand {
    Low,
    Medium,
    High,
}

/// Reservation action, ordered by precedence of evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageAction {
    NoAction,
    ReserveImmediately,
    ReserveUrgent,
    ReservePartial,
}

impl std::fmt::Display for StorageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageAction::NoAction => write!(f, "NO_ACTION"),
            StorageAction::ReserveImmediately => write!(f, "RESERVE_IMMEDIATELY"),
            StorageAction::ReserveUrgent => write!(f, "RESERVE_URGENT"),
            StorageAction::ReservePartial => write!(f, "RESERVE_PARTIAL"),
        }
    }
}

/// Ordinal urgency driving advisory strength
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyBand {
    None,
    Medium,
    High,
    Critical,
}

/// Snapshot of current storage availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageAvailability {
    pub total_capacity: Decimal,
    pub current_usage: Decimal,
    pub available_capacity: Decimal,
    pub utilization_percent: Decimal,
    pub utilization_band: UtilizationBand,
}

/// Demand side of the assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandForecast {
    pub forecasted_volume: Decimal,
    pub transport_capacity: Decimal,
    pub excess_requiring_storage: Decimal,
}

/// The reservation decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationDecision {
    pub storage_alert: bool,
    pub storage_action: StorageAction,
    pub storage_reserve_percentage: i32,
    pub excess_volume: Decimal,
    pub available_storage: Decimal,
    pub urgency: UrgencyBand,
}

/// Complete storage assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageAssessment {
    pub current_availability: StorageAvailability,
    pub demand_forecast: DemandForecast,
    pub allocation_decision: AllocationDecision,
    pub advisories: Vec<String>,
}

/// A facility with its remaining free capacity attached for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityStatus {
    #[serde(flatten)]
    pub facility: StorageFacility,
    pub available: Decimal,
}

/// Region-wide storage estate totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSummary {
    pub facility_count: usize,
    pub total_capacity: Decimal,
    pub total_usage: Decimal,
    pub total_available: Decimal,
    pub facilities: Vec<FacilityStatus>,
}

/// Compute the current availability snapshot for a storage estate.
pub fn storage_availability(
    total_capacity: Decimal,
    current_usage: Decimal,
) -> CoreResult<StorageAvailability> {
    require_positive("total_storage_capacity", total_capacity)?;
    require_usage_within_capacity(current_usage, total_capacity)?;

    let available = total_capacity - current_usage;
    let utilization_percent = current_usage / total_capacity * Decimal::ONE_HUNDRED;
    let utilization_band = if utilization_percent < Decimal::from(50) {
        UtilizationBand::Low
    } else if utilization_percent < Decimal::from(80) {
        UtilizationBand::Medium
    } else {
        UtilizationBand::High
    };

    Ok(StorageAvailability {
        total_capacity,
        current_usage,
        available_capacity: available,
        utilization_percent: round2(utilization_percent),
        utilization_band,
    })
}

/// Excess volume that cannot be transported immediately and needs storage
pub fn forecast_storage_demand(forecasted_volume: Decimal, transport_capacity: Decimal) -> Decimal {
    (forecasted_volume - transport_capacity).max(Decimal::ZERO)
}

/// Pick the reservation action for an excess volume.
///
/// The arms are evaluated in precedence order: nothing to store, estate
/// overflow, tight fit (excess above 70% of what is free), partial fit.
pub fn determine_storage_action(
    excess_volume: Decimal,
    available_storage: Decimal,
    total_capacity: Decimal,
) -> AllocationDecision {
    let (action, urgency, reserve_percentage, alert) = if excess_volume <= Decimal::ZERO {
        (StorageAction::NoAction, UrgencyBand::None, 0, false)
    } else if excess_volume > available_storage {
        (
            StorageAction::ReserveImmediately,
            UrgencyBand::Critical,
            100,
            true,
        )
    } else if excess_volume > Decimal::new(7, 1) * available_storage {
        (
            StorageAction::ReserveUrgent,
            UrgencyBand::High,
            whole_percent(excess_volume, total_capacity),
            true,
        )
    } else {
        (
            StorageAction::ReservePartial,
            UrgencyBand::Medium,
            whole_percent(excess_volume, total_capacity),
            true,
        )
    };

    AllocationDecision {
        storage_alert: alert,
        storage_action: action,
        storage_reserve_percentage: reserve_percentage,
        excess_volume: round2(excess_volume),
        available_storage: round2(available_storage),
        urgency,
    }
}

/// Fixed advisory text per reservation action
pub fn storage_advisories(decision: &AllocationDecision) -> Vec<String> {
    match decision.storage_action {
        StorageAction::ReserveImmediately => vec![
            "CRITICAL: Storage capacity insufficient for forecasted excess".to_string(),
            "Contact additional cold storage facilities immediately".to_string(),
            "Prioritize most perishable produce for available storage".to_string(),
            "Consider accelerating market dispatch to free capacity".to_string(),
        ],
        StorageAction::ReserveUrgent => vec![
            "URGENT: Reserve storage capacity now".to_string(),
            format!(
                "Reserve {}% of total capacity",
                decision.storage_reserve_percentage
            ),
            "Recommended reservation window: Next 24-48 hours".to_string(),
        ],
        StorageAction::ReservePartial => vec![
            "PLANNED: Partial storage reservation recommended".to_string(),
            format!(
                "Reserve {}% of total capacity",
                decision.storage_reserve_percentage
            ),
            "Recommended reservation window: Next 3-5 days".to_string(),
        ],
        StorageAction::NoAction => vec![
            "No immediate storage reservation required".to_string(),
            "Transport capacity is sufficient for forecasted volume".to_string(),
        ],
    }
}

/// Assess storage allocation for a forecasted inflow volume.
pub fn assess_storage_allocation(
    forecasted_volume: Decimal,
    transport_capacity: Decimal,
    total_storage_capacity: Decimal,
    current_storage_usage: Decimal,
) -> CoreResult<StorageAssessment> {
    require_non_negative("forecasted_volume", forecasted_volume)?;
    require_non_negative("transport_capacity", transport_capacity)?;

    let availability = storage_availability(total_storage_capacity, current_storage_usage)?;
    let excess_volume = forecast_storage_demand(forecasted_volume, transport_capacity);
    let decision = determine_storage_action(
        excess_volume,
        availability.available_capacity,
        total_storage_capacity,
    );
    let advisories = storage_advisories(&decision);

    Ok(StorageAssessment {
        current_availability: availability,
        demand_forecast: DemandForecast {
            forecasted_volume,
            transport_capacity,
            excess_requiring_storage: excess_volume,
        },
        allocation_decision: decision,
        advisories,
    })
}

/// Aggregate a region's facilities into estate totals, attaching the free
/// capacity of each facility for display.
pub fn aggregate_facilities(facilities: &[StorageFacility]) -> StorageSummary {
    let total_capacity: Decimal = facilities.iter().map(|f| f.total_capacity).sum();
    let total_usage: Decimal = facilities.iter().map(|f| f.current_usage).sum();

    StorageSummary {
        facility_count: facilities.len(),
        total_capacity,
        total_usage,
        total_available: total_capacity - total_usage,
        facilities: facilities
            .iter()
            .map(|f| FacilityStatus {
                facility: f.clone(),
                available: f.available(),
            })
            .collect(),
    }
}
