//! Crop reference data

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Agronomic profile for a crop. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub crop_id: String,
    pub crop_type: String,
    /// Average days from sowing to harvest maturity
    pub avg_maturity_days: u32,
    /// Average yield in tonnes per hectare
    pub avg_yield_per_hectare: Decimal,
    pub category: PerishabilityCategory,
    pub shelf_life_days: u32,
}

/// How quickly harvested produce degrades without cold storage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PerishabilityCategory {
    Perishable,
    SemiPerishable,
    Durable,
}

impl std::fmt::Display for PerishabilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerishabilityCategory::Perishable => write!(f, "Perishable"),
            PerishabilityCategory::SemiPerishable => write!(f, "Semi-perishable"),
            PerishabilityCategory::Durable => write!(f, "Durable"),
        }
    }
}
