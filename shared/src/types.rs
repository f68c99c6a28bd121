//! Common numeric conventions used across the platform

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a mass or score to 2 decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a composite index to 3 decimal places, half away from zero.
pub fn round3(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// Express `part` of `whole` as a whole-number percentage.
///
/// The caller guarantees `whole > 0`; the result saturates to 0 if the
/// quotient cannot be represented as an i32.
pub fn whole_percent(part: Decimal, whole: Decimal) -> i32 {
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}
