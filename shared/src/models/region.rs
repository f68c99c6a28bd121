//! Region reference data

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A coordination district. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub region_id: String,
    pub name: String,
    pub state: String,
    /// Daily outbound transport capacity in tonnes
    pub transport_capacity_per_day: Decimal,
    /// Descriptive harvest window, e.g. "Oct-Feb"
    pub typical_harvest_window: String,
}
