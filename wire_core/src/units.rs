//! # Unit Types
//!
//! Type-safe wrappers for the units that cross the boundary between the
//! imperial (NEC, DC) and metric (IEC, BS 7671) sizing engines. These are
//! plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Unit Conventions
//!
//! - NEC and DC tables: length in feet, resistance in Ω per 1000 ft
//! - IEC and BS 7671 tables: length in metres, resistance in Ω per km
//!
//! ## Example
//!
//! ```rust
//! use wire_core::units::{Feet, Meters};
//!
//! let run = Feet(100.0);
//! let metric: Meters = run.into();
//! assert!((metric.0 - 30.48).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Exact length of one foot in metres
pub const METERS_PER_FOOT: f64 = 0.3048;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * METERS_PER_FOOT)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 / METERS_PER_FOOT)
    }
}

/// Length unit used by a standard's reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Feet,
    Meters,
}

impl LengthUnit {
    /// Short symbol for reports
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Meters => "m",
        }
    }

    /// Convert a length expressed in `self` into `target`
    pub fn convert(&self, value: f64, target: LengthUnit) -> f64 {
        match (self, target) {
            (LengthUnit::Feet, LengthUnit::Meters) => Meters::from(Feet(value)).0,
            (LengthUnit::Meters, LengthUnit::Feet) => Feet::from(Meters(value)).0,
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_meters() {
        let m: Meters = Feet(50.0).into();
        assert!((m.0 - 15.24).abs() < 1e-9);
    }

    #[test]
    fn test_length_unit_convert() {
        let ft = LengthUnit::Meters.convert(25.0, LengthUnit::Feet);
        assert!((ft - 82.021).abs() < 0.001);
        assert_eq!(LengthUnit::Feet.convert(12.0, LengthUnit::Feet), 12.0);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&Meters(30.0)).unwrap();
        assert_eq!(json, "30.0");
    }
}
