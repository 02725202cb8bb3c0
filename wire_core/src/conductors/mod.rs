//! # Conductor Reference Tables
//!
//! Static conductor data for each standard: size designation, cross-section,
//! resistance and reactance per table length unit, ampacity at each supported
//! temperature rating, and physical attributes.
//!
//! Each table is built once on first use (`once_cell::sync::Lazy`) from a
//! compact row array and never mutated afterwards. Rows are sorted ascending
//! by cross-section (debug-asserted in [`ConductorTable::new`]), so the
//! candidate search can rely on table order. Each table module's tests assert
//! [`ConductorTable::is_well_formed`] on its data.
//!
//! ## Tables
//!
//! | Standard | Module      | Sizes             | Resistance unit |
//! |----------|-------------|-------------------|-----------------|
//! | NEC      | [`nec`]     | 14 AWG - 1000 kcmil | Ω / 1000 ft   |
//! | IEC      | [`iec`]     | 1.5 - 300 mm²     | Ω / km          |
//! | BS 7671  | [`bs7671`]  | 1.0 - 300 mm²     | Ω / km          |
//! | DC       | [`dc`]      | 18 AWG - 4/0 AWG  | Ω / 1000 ft     |
//!
//! ## Example
//!
//! ```rust
//! use wire_core::conductors::nec;
//!
//! let table = nec::table();
//! let twelve = table.find("12").unwrap();
//! assert_eq!(twelve.ampacity_at(75), Some(25.0));
//! ```

pub mod bs7671;
pub mod dc;
pub mod iec;
pub mod nec;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::standards::Standard;
use crate::voltage_drop::LengthScale;

/// Inches to millimetres
const MM_PER_INCH: f64 = 25.4;

/// Pounds per 1000 ft to kilograms per km
const KG_PER_KM_PER_LB_PER_KFT: f64 = 1.488_164;

/// How a conductor size is designated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    /// American Wire Gauge (18 ... 4/0)
    Awg,
    /// Thousand circular mils (250 ... 1000)
    Kcmil,
    /// Metric cross-section
    SquareMillimeter,
}

impl SizeUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            SizeUnit::Awg => "AWG",
            SizeUnit::Kcmil => "kcmil",
            SizeUnit::SquareMillimeter => "mm²",
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Ampacity of a conductor at one insulation temperature rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatedAmpacity {
    /// Insulation temperature rating (°C)
    pub rating_c: u16,
    /// Tabulated ampacity (A)
    pub amps: f64,
}

/// One row of a conductor reference table.
///
/// Resistance and reactance are per conductor, expressed in the owning
/// table's [`LengthScale`] unit, for copper. Aluminum is handled by the
/// engine's material multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSpec {
    /// Size label as written in the standard ("12", "1/0", "250", "2.5")
    pub size: String,
    /// Designation system of `size`
    pub unit: SizeUnit,
    /// Cross-sectional area (mm²)
    pub area_mm2: f64,
    /// Resistance per table length unit (Ω)
    pub resistance: f64,
    /// Reactance per table length unit (Ω); zero in DC tables
    pub reactance: f64,
    /// Ampacity at each supported temperature rating
    pub ampacity: Vec<RatedAmpacity>,
    /// Overall diameter (mm)
    pub diameter_mm: f64,
    /// Conductor weight (kg/km)
    pub weight_kg_per_km: f64,
}

impl ConductorSpec {
    /// Tabulated ampacity at `rating_c`, if the table carries that rating
    pub fn ampacity_at(&self, rating_c: u16) -> Option<f64> {
        self.ampacity
            .iter()
            .find(|a| a.rating_c == rating_c)
            .map(|a| a.amps)
    }

    /// Size with its unit, e.g. "12 AWG" or "2.5 mm²"
    pub fn designation(&self) -> String {
        format!("{} {}", self.size, self.unit)
    }
}

/// Compact table row used to build imperial tables.
///
/// `(size, unit, area_mm2, resistance, reactance, ampacities, diameter_in, weight_lb_per_kft)`
pub(crate) type ImperialRow<const N: usize> = (&'static str, SizeUnit, f64, f64, f64, [f64; N], f64, f64);

/// Compact table row used to build metric tables.
///
/// `(size, area_mm2, resistance, reactance, ampacities, diameter_mm, weight_kg_per_km)`
pub(crate) type MetricRow<const N: usize> = (&'static str, f64, f64, f64, [f64; N], f64, f64);

/// An immutable, ascending conductor table for one standard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConductorTable {
    /// Human readable source, e.g. "NEC Table 310.16 / Chapter 9 Table 9"
    pub source: &'static str,
    /// Unit of `resistance`/`reactance` in every row
    pub length_scale: LengthScale,
    /// Temperature ratings carried by every row
    pub ratings: &'static [u16],
    entries: Vec<ConductorSpec>,
}

impl ConductorTable {
    pub(crate) fn new(
        source: &'static str,
        length_scale: LengthScale,
        ratings: &'static [u16],
        entries: Vec<ConductorSpec>,
    ) -> Self {
        let table = ConductorTable {
            source,
            length_scale,
            ratings,
            entries,
        };
        debug_assert!(table.is_well_formed(), "malformed conductor table: {source}");
        table
    }

    /// Non-empty, strictly ascending by cross-section, every rating present
    pub fn is_well_formed(&self) -> bool {
        let ascending = self.entries.windows(2).all(|w| w[0].area_mm2 < w[1].area_mm2);
        let complete = self
            .entries
            .iter()
            .all(|e| self.ratings.iter().all(|r| e.ampacity_at(*r).is_some()));
        !self.entries.is_empty() && ascending && complete
    }

    pub(crate) fn from_imperial_rows<const N: usize>(
        source: &'static str,
        length_scale: LengthScale,
        ratings: &'static [u16],
        rows: &[ImperialRow<N>],
    ) -> Self {
        let entries = rows
            .iter()
            .map(|&(size, unit, area, r, x, amps, dia_in, weight)| ConductorSpec {
                size: size.to_string(),
                unit,
                area_mm2: area,
                resistance: r,
                reactance: x,
                ampacity: zip_ratings(ratings, &amps),
                diameter_mm: dia_in * MM_PER_INCH,
                weight_kg_per_km: weight * KG_PER_KM_PER_LB_PER_KFT,
            })
            .collect();
        ConductorTable::new(source, length_scale, ratings, entries)
    }

    pub(crate) fn from_metric_rows<const N: usize>(
        source: &'static str,
        length_scale: LengthScale,
        ratings: &'static [u16],
        rows: &[MetricRow<N>],
    ) -> Self {
        let entries = rows
            .iter()
            .map(|&(size, area, r, x, amps, dia, weight)| ConductorSpec {
                size: size.to_string(),
                unit: SizeUnit::SquareMillimeter,
                area_mm2: area,
                resistance: r,
                reactance: x,
                ampacity: zip_ratings(ratings, &amps),
                diameter_mm: dia,
                weight_kg_per_km: weight,
            })
            .collect();
        ConductorTable::new(source, length_scale, ratings, entries)
    }

    /// All rows, ascending by size
    pub fn entries(&self) -> &[ConductorSpec] {
        &self.entries
    }

    /// Whether the table carries ampacities for `rating_c`
    pub fn supports_rating(&self, rating_c: u16) -> bool {
        self.ratings.contains(&rating_c)
    }

    /// Look up a row by size label (case-insensitive, unit suffix ignored)
    pub fn find(&self, size: &str) -> Option<&ConductorSpec> {
        self.index_of(size).map(|i| &self.entries[i])
    }

    /// Position of a size label in ascending order
    pub fn index_of(&self, size: &str) -> Option<usize> {
        let wanted = normalize_size_label(size);
        self.entries.iter().position(|e| e.size.eq_ignore_ascii_case(&wanted))
    }

    /// Largest conductor in the table
    pub fn largest(&self) -> Option<&ConductorSpec> {
        self.entries.last()
    }

    /// Smallest row whose cross-section is at least `area_mm2`
    pub fn smallest_with_area(&self, area_mm2: f64) -> Option<&ConductorSpec> {
        self.entries.iter().find(|e| e.area_mm2 >= area_mm2)
    }

    /// Rows whose ampacity at `rating_c` meets `required_amps`, ascending
    pub fn candidates(&self, rating_c: u16, required_amps: f64) -> Vec<&ConductorSpec> {
        self.entries
            .iter()
            .filter(|e| e.ampacity_at(rating_c).is_some_and(|a| a >= required_amps))
            .collect()
    }
}

/// The reference table that serves `standard`
pub fn table_for(standard: Standard) -> &'static ConductorTable {
    match standard {
        Standard::Nec => nec::table(),
        Standard::Iec => iec::table(),
        Standard::Bs7671 => bs7671::table(),
        Standard::Dc => dc::table(),
    }
}

fn zip_ratings(ratings: &[u16], amps: &[f64]) -> Vec<RatedAmpacity> {
    ratings
        .iter()
        .zip(amps)
        .map(|(&rating_c, &amps)| RatedAmpacity { rating_c, amps })
        .collect()
}

/// Strip unit suffixes so "12 AWG", "250kcmil" and "2.5 mm2" match table labels
pub fn normalize_size_label(size: &str) -> String {
    let lower = size.trim().to_lowercase();
    let stripped = ["mm²", "mm2", "kcmil", "mcm", "awg", "#"]
        .iter()
        .fold(lower, |acc, suffix| acc.replace(suffix, ""));
    stripped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_size_label() {
        assert_eq!(normalize_size_label("12 AWG"), "12");
        assert_eq!(normalize_size_label("250kcmil"), "250");
        assert_eq!(normalize_size_label(" 2.5 mm² "), "2.5");
        assert_eq!(normalize_size_label("#10"), "10");
    }

    #[test]
    fn test_rejects_unsorted_rows() {
        let row = |size: &str, area: f64| ConductorSpec {
            size: size.to_string(),
            unit: SizeUnit::SquareMillimeter,
            area_mm2: area,
            resistance: 1.0,
            reactance: 0.0,
            ampacity: vec![RatedAmpacity { rating_c: 70, amps: 10.0 }],
            diameter_mm: 1.0,
            weight_kg_per_km: 1.0,
        };
        let table = ConductorTable {
            source: "test",
            length_scale: LengthScale::PerKilometre,
            ratings: &[70],
            entries: vec![row("2.5", 2.5), row("1.5", 1.5)],
        };
        assert!(!table.is_well_formed());
    }

    #[test]
    fn test_rejects_missing_rating() {
        let entry = ConductorSpec {
            size: "1.5".to_string(),
            unit: SizeUnit::SquareMillimeter,
            area_mm2: 1.5,
            resistance: 12.1,
            reactance: 0.0,
            ampacity: vec![RatedAmpacity { rating_c: 70, amps: 19.5 }],
            diameter_mm: 3.1,
            weight_kg_per_km: 14.4,
        };
        let table = ConductorTable {
            source: "test",
            length_scale: LengthScale::PerKilometre,
            ratings: &[70, 90],
            entries: vec![entry],
        };
        assert!(!table.is_well_formed());
    }

    #[test]
    fn test_candidates_are_ascending_and_sufficient() {
        let table = nec::table();
        let candidates = table.candidates(75, 40.0);
        assert_eq!(candidates[0].size, "8");
        assert!(candidates.iter().all(|c| c.ampacity_at(75).unwrap() >= 40.0));
        assert!(candidates.windows(2).all(|w| w[0].area_mm2 < w[1].area_mm2));
    }

    #[test]
    fn test_table_for_each_standard() {
        for standard in Standard::ALL {
            let table = table_for(standard);
            assert!(table.is_well_formed());
            assert_eq!(table.length_scale.length_unit(), standard.length_unit());
        }
    }
}
