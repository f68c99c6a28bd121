//! Weather signal models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of the short-range weather deviation for a region.
///
/// Serialized as the raw flag (-1, 0, +1); any other incoming value
/// collapses to `Normal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "i8", into = "i8")]
pub enum WeatherDeviation {
    Adverse,
    #[default]
    Normal,
    Favorable,
}

impl From<i8> for WeatherDeviation {
    fn from(flag: i8) -> Self {
        match flag {
            -1 => WeatherDeviation::Adverse,
            1 => WeatherDeviation::Favorable,
            _ => WeatherDeviation::Normal,
        }
    }
}

impl From<WeatherDeviation> for i8 {
    fn from(deviation: WeatherDeviation) -> Self {
        match deviation {
            WeatherDeviation::Adverse => -1,
            WeatherDeviation::Normal => 0,
            WeatherDeviation::Favorable => 1,
        }
    }
}

impl WeatherDeviation {
    /// Multiplicative yield adjustment applied in the readiness index
    pub fn modifier(self) -> Decimal {
        match self {
            WeatherDeviation::Adverse => Decimal::new(9, 1),
            WeatherDeviation::Normal => Decimal::ONE,
            WeatherDeviation::Favorable => Decimal::new(11, 1),
        }
    }

    /// Human-readable condition label
    pub fn condition(self) -> &'static str {
        match self {
            WeatherDeviation::Adverse => "Adverse",
            WeatherDeviation::Normal => "Normal",
            WeatherDeviation::Favorable => "Favorable",
        }
    }
}

/// Weather context for a region over the forecast window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSignal {
    pub region_id: String,
    pub deviation_flag: WeatherDeviation,
    /// Free-text forecast note
    pub forecast: String,
    pub temperature_avg: Decimal,
    pub humidity_avg: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_round_trip() {
        assert_eq!(WeatherDeviation::from(-1), WeatherDeviation::Adverse);
        assert_eq!(WeatherDeviation::from(0), WeatherDeviation::Normal);
        assert_eq!(WeatherDeviation::from(1), WeatherDeviation::Favorable);
        assert_eq!(i8::from(WeatherDeviation::Adverse), -1);
        assert_eq!(i8::from(WeatherDeviation::Favorable), 1);
    }

    #[test]
    fn test_unknown_flags_collapse_to_normal() {
        assert_eq!(WeatherDeviation::from(7), WeatherDeviation::Normal);
        assert_eq!(WeatherDeviation::from(-3), WeatherDeviation::Normal);
    }

    #[test]
    fn test_modifier_values() {
        assert_eq!(WeatherDeviation::Adverse.modifier(), Decimal::new(9, 1));
        assert_eq!(WeatherDeviation::Normal.modifier(), Decimal::ONE);
        assert_eq!(WeatherDeviation::Favorable.modifier(), Decimal::new(11, 1));
    }
}
