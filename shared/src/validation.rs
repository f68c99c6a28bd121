//! Boundary validation for calculator inputs
//!
//! Ratios are only ever taken over positive denominators, so the guards here
//! reject zero and negative capacities before any computation runs.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};

/// Require a strictly positive quantity (areas, yields, capacities)
pub fn require_positive(field: &'static str, value: Decimal) -> CoreResult<()> {
    if value <= Decimal::ZERO {
        return Err(CoreError::invalid(field, "must be greater than 0"));
    }
    Ok(())
}

/// Require a quantity that may be zero but never negative (volumes, usage)
pub fn require_non_negative(field: &'static str, value: Decimal) -> CoreResult<()> {
    if value < Decimal::ZERO {
        return Err(CoreError::invalid(field, "must not be negative"));
    }
    Ok(())
}

/// Require a score in the closed interval [0, 1]
pub fn require_unit_interval(field: &'static str, value: Decimal) -> CoreResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(CoreError::invalid(field, "must be between 0 and 1"));
    }
    Ok(())
}

/// Require storage usage to fit within the facility's total capacity
pub fn require_usage_within_capacity(usage: Decimal, total: Decimal) -> CoreResult<()> {
    require_non_negative("current_storage_usage", usage)?;
    if usage > total {
        return Err(CoreError::invalid(
            "current_storage_usage",
            "must not exceed total storage capacity",
        ));
    }
    Ok(())
}
