//! Farmer records

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered farmer's crop declaration.
///
/// Created via registration; readiness, area, and sowing date may be updated
/// afterwards. Records are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerRecord {
    pub farmer_id: String,
    pub name: String,
    pub region_id: String,
    pub crop_id: String,
    pub sowing_date: NaiveDate,
    /// Cultivated area in hectares, always > 0
    pub cultivated_area: Decimal,
    /// Farmer-reported harvest readiness in [0, 1]
    pub readiness_score: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
