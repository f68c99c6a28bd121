//! Cold storage facility models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cold storage facility snapshot.
///
/// Usage is mutated by facility operators outside this system; the
/// calculators only read capacity/usage pairs, with 0 <= usage <= capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageFacility {
    pub storage_id: String,
    pub name: String,
    pub region_id: String,
    /// Total capacity in tonnes
    pub total_capacity: Decimal,
    /// Currently occupied capacity in tonnes
    pub current_usage: Decimal,
    #[serde(rename = "type")]
    pub facility_type: String,
    /// Operating temperature range, e.g. "4-8°C"
    pub temperature_range: String,
}

impl StorageFacility {
    /// Remaining free capacity in tonnes
    pub fn available(&self) -> Decimal {
        self.total_capacity - self.current_usage
    }
}
