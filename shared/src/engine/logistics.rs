//! Logistics stress detection
//!
//! Compares forecasted harvest inflow against daily transport capacity,
//! flags surge risk, and produces fleet advisories and staging suggestions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::round2;
use crate::validation::{require_non_negative, require_positive};

/// Transport stress bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StressLevel {
    Normal,
    Elevated,
    High,
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressLevel::Normal => write!(f, "NORMAL"),
            StressLevel::Elevated => write!(f, "ELEVATED"),
            StressLevel::High => write!(f, "HIGH"),
        }
    }
}

/// A suggested staging location for volume the fleet cannot move same-day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingLocation {
    pub location: String,
    pub priority: u8,
    pub suggested_capacity: Decimal,
}

/// Complete logistics stress assessment for a region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsAssessment {
    pub logistics_alert: bool,
    pub logistics_stress_level: StressLevel,
    pub utilization_ratio: Decimal,
    pub forecasted_volume: Decimal,
    pub transport_capacity: Decimal,
    pub excess_volume: Decimal,
    pub advisories: Vec<String>,
    pub staging_locations: Vec<StagingLocation>,
    pub fleet_preposition_required: bool,
}

/// Classify transport stress for a forecasted volume.
///
/// Volume above capacity is HIGH; above 80% of capacity is ELEVATED; both
/// raise the alert flag.
pub fn classify_stress_level(forecasted_volume: Decimal, transport_capacity: Decimal) -> StressLevel {
    if forecasted_volume > transport_capacity {
        StressLevel::High
    } else if forecasted_volume > Decimal::new(8, 1) * transport_capacity {
        StressLevel::Elevated
    } else {
        StressLevel::Normal
    }
}

/// Fixed advisory text per stress level, most urgent first
pub fn stress_advisories(level: StressLevel, excess_volume: Decimal) -> Vec<String> {
    match level {
        StressLevel::High => vec![
            "CRITICAL: Pre-position additional transport fleet immediately".to_string(),
            "Consider staggering harvest timing across 2-3 days".to_string(),
            "Request backup transport from neighboring districts".to_string(),
            format!("Excess volume: {excess_volume} tonnes needs additional capacity"),
        ],
        StressLevel::Elevated => vec![
            "ALERT: Transport utilization approaching capacity".to_string(),
            "Put backup transport on standby".to_string(),
            "Prioritize perishable loads for first transport wave".to_string(),
        ],
        StressLevel::Normal => vec![
            "Transport capacity is sufficient for forecasted volume".to_string(),
            "Standard fleet deployment recommended".to_string(),
        ],
    }
}

/// Suggest staging locations for excess volume.
///
/// Static picks with capped capacities; a geospatial selection would replace
/// these. Empty when there is no excess.
pub fn suggest_staging_locations(_region_id: &str, excess_volume: Decimal) -> Vec<StagingLocation> {
    if excess_volume <= Decimal::ZERO {
        return Vec::new();
    }

    vec![
        StagingLocation {
            location: "Primary Collection Point - Village Hub".to_string(),
            priority: 1,
            suggested_capacity: (Decimal::new(6, 1) * excess_volume).min(Decimal::from(50)),
        },
        StagingLocation {
            location: "Secondary Collection Point - Mandi Approach".to_string(),
            priority: 2,
            suggested_capacity: (Decimal::new(4, 1) * excess_volume).min(Decimal::from(30)),
        },
    ]
}

/// Assess logistics stress for a forecasted inflow volume.
pub fn assess_logistics(
    forecasted_volume: Decimal,
    transport_capacity: Decimal,
    region_id: &str,
) -> CoreResult<LogisticsAssessment> {
    require_non_negative("forecasted_volume", forecasted_volume)?;
    require_positive("transport_capacity", transport_capacity)?;

    let stress_level = classify_stress_level(forecasted_volume, transport_capacity);
    let alert = !matches!(stress_level, StressLevel::Normal);
    let utilization_ratio = round2(forecasted_volume / transport_capacity);
    let excess_volume = round2((forecasted_volume - transport_capacity).max(Decimal::ZERO));

    Ok(LogisticsAssessment {
        logistics_alert: alert,
        logistics_stress_level: stress_level,
        utilization_ratio,
        forecasted_volume,
        transport_capacity,
        excess_volume,
        advisories: stress_advisories(stress_level, excess_volume),
        staging_locations: suggest_staging_locations(region_id, excess_volume),
        fleet_preposition_required: alert,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_surge_scenario() {
        let assessment = assess_logistics(dec("120"), dec("100"), "DIST001").unwrap();
        assert_eq!(assessment.logistics_stress_level, StressLevel::High);
        assert!(assessment.logistics_alert);
        assert!(assessment.fleet_preposition_required);
        assert_eq!(assessment.utilization_ratio, dec("1.2"));
        assert_eq!(assessment.excess_volume, dec("20"));
    }

    #[test]
    fn test_elevated_band_above_eighty_percent() {
        let assessment = assess_logistics(dec("85"), dec("100"), "DIST001").unwrap();
        assert_eq!(assessment.logistics_stress_level, StressLevel::Elevated);
        assert!(assessment.logistics_alert);
        assert_eq!(assessment.excess_volume, Decimal::ZERO);
        assert!(assessment.staging_locations.is_empty());
    }

    #[test]
    fn test_normal_band_boundaries() {
        // Exactly 80% of capacity is still NORMAL; exactly capacity is ELEVATED
        assert_eq!(classify_stress_level(dec("80"), dec("100")), StressLevel::Normal);
        assert_eq!(classify_stress_level(dec("100"), dec("100")), StressLevel::Elevated);
        assert_eq!(classify_stress_level(dec("100.01"), dec("100")), StressLevel::High);
    }

    #[test]
    fn test_no_alert_when_normal() {
        let assessment = assess_logistics(dec("50"), dec("100"), "DIST001").unwrap();
        assert_eq!(assessment.logistics_stress_level, StressLevel::Normal);
        assert!(!assessment.logistics_alert);
        assert!(!assessment.fleet_preposition_required);
        assert_eq!(
            assessment.advisories,
            vec![
                "Transport capacity is sufficient for forecasted volume".to_string(),
                "Standard fleet deployment recommended".to_string(),
            ]
        );
    }

    #[test]
    fn test_high_advisories_interpolate_excess() {
        let assessment = assess_logistics(dec("120"), dec("100"), "DIST001").unwrap();
        assert_eq!(assessment.advisories.len(), 4);
        assert!(assessment.advisories[3].contains("20 tonnes"));
    }

    #[test]
    fn test_staging_capacities_are_split_and_capped() {
        // Small excess: 60/40 split
        let staging = suggest_staging_locations("DIST001", dec("20"));
        assert_eq!(staging.len(), 2);
        assert_eq!(staging[0].priority, 1);
        assert_eq!(staging[0].suggested_capacity, dec("12"));
        assert_eq!(staging[1].priority, 2);
        assert_eq!(staging[1].suggested_capacity, dec("8"));

        // Large excess: static caps take over
        let staging = suggest_staging_locations("DIST001", dec("200"));
        assert_eq!(staging[0].suggested_capacity, dec("50"));
        assert_eq!(staging[1].suggested_capacity, dec("30"));
    }

    #[test]
    fn test_zero_capacity_is_rejected_before_division() {
        let err = assess_logistics(dec("50"), Decimal::ZERO, "DIST001").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput {
                field: "transport_capacity",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_volume_is_rejected() {
        assert!(assess_logistics(dec("-1"), dec("100"), "DIST001").is_err());
    }

    #[test]
    fn test_idempotence() {
        let a = assess_logistics(dec("97"), dec("100"), "DIST001").unwrap();
        let b = assess_logistics(dec("97"), dec("100"), "DIST001").unwrap();
        assert_eq!(a.utilization_ratio, b.utilization_ratio);
        assert_eq!(a.advisories, b.advisories);
        assert_eq!(a.logistics_stress_level, b.logistics_stress_level);
    }
}
