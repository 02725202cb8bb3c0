//! # Correction Factors
//!
//! Ampacity correction factors for every supported standard.
//!
//! ## Overview
//!
//! The tabulated ampacity of a conductor assumes reference conditions. The
//! required tabulated ampacity for a circuit is the design current divided
//! by the product of the applicable factors:
//!
//! ```text
//! I_required = I_design / (C_temp × C_group × C_install × C_soil)
//! ```
//!
//! ## Factor Summary
//!
//! | Factor     | Description                    | Source tables                        |
//! |------------|--------------------------------|--------------------------------------|
//! | C_temp     | Ambient (air or ground) temp.  | NEC 310.15(B)(1), IEC B.52.14/15, BS 4B1/4B2 |
//! | C_group    | Number of loaded conductors    | NEC 310.15(C)(1), IEC B.52.17, BS 4C1 |
//! | C_install  | Installation method            | [`crate::installation`]              |
//! | C_soil     | Soil thermal resistivity       | buried runs (D1/D2, direct burial)   |
//!
//! ## Stepwise lookup
//!
//! Every table here is a [`StepTable`]: thresholds ascending, the factor of
//! the first threshold ≥ the actual value is used, and values beyond the last
//! threshold clamp to the last factor (and are reported as out of range).

use serde::{Deserialize, Serialize};

// ============================================================================
// Shared stepwise lookup
// ============================================================================

/// Outcome of a stepwise lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLookup {
    pub factor: f64,
    /// The value exceeded every threshold and was clamped to the last one
    pub clamped: bool,
}

/// Threshold → factor table with "first threshold ≥ value, else last" semantics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTable {
    pub name: &'static str,
    steps: &'static [(f64, f64)],
}

impl StepTable {
    pub const fn new(name: &'static str, steps: &'static [(f64, f64)]) -> Self {
        StepTable { name, steps }
    }

    /// Resolve `value`; an empty table is neutral (factor 1.0)
    pub fn resolve(&self, value: f64) -> StepLookup {
        match self.steps.iter().find(|(threshold, _)| *threshold >= value) {
            Some(&(_, factor)) => StepLookup {
                factor,
                clamped: false,
            },
            None => StepLookup {
                factor: self.steps.last().map_or(1.0, |&(_, f)| f),
                clamped: !self.steps.is_empty(),
            },
        }
    }

    /// Factor for `value`
    pub fn lookup(&self, value: f64) -> f64 {
        self.resolve(value).factor
    }

    /// Largest threshold, i.e. the top of the covered range
    pub fn max_threshold(&self) -> Option<f64> {
        self.steps.last().map(|&(t, _)| t)
    }

    /// Thresholds strictly ascending
    pub fn is_ascending(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].0 < w[1].0)
    }
}

/// The four factors applied to a sizing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactors {
    /// Ambient temperature factor
    pub temperature: f64,
    /// Grouping / bundling factor
    pub grouping: f64,
    /// Installation-method factor
    pub installation: f64,
    /// Soil thermal-resistivity factor (1.0 unless buried)
    pub thermal_resistivity: f64,
}

impl CorrectionFactors {
    /// Product of all four factors
    pub fn combined(&self) -> f64 {
        self.temperature * self.grouping * self.installation * self.thermal_resistivity
    }
}

impl Default for CorrectionFactors {
    fn default() -> Self {
        CorrectionFactors {
            temperature: 1.0,
            grouping: 1.0,
            installation: 1.0,
            thermal_resistivity: 1.0,
        }
    }
}

// ============================================================================
// Soil thermal resistivity
// ============================================================================

/// Reference soil thermal resistivity of buried ampacity tables (K·m/W)
pub const SOIL_RESISTIVITY_BASELINE: f64 = 2.5;

/// Soil thermal-resistivity factor: inverse scaling above the 2.5 K·m/W
/// baseline, neutral at or below it
pub fn soil_thermal_factor(resistivity_km_per_w: f64) -> f64 {
    if resistivity_km_per_w > SOIL_RESISTIVITY_BASELINE {
        SOIL_RESISTIVITY_BASELINE / resistivity_km_per_w
    } else {
        1.0
    }
}

// ============================================================================
// NEC
// ============================================================================

/// NEC 310.15(B)(1), 30 °C basis, 60 °C insulation
pub const NEC_TEMP_60C: StepTable = StepTable::new(
    "NEC 310.15(B)(1) 60 °C",
    &[
        (10.0, 1.29), (15.0, 1.22), (20.0, 1.15), (25.0, 1.08), (30.0, 1.00),
        (35.0, 0.91), (40.0, 0.82), (45.0, 0.71), (50.0, 0.58), (55.0, 0.41),
    ],
);

/// NEC 310.15(B)(1), 30 °C basis, 75 °C insulation
pub const NEC_TEMP_75C: StepTable = StepTable::new(
    "NEC 310.15(B)(1) 75 °C",
    &[
        (10.0, 1.20), (15.0, 1.15), (20.0, 1.11), (25.0, 1.05), (30.0, 1.00),
        (35.0, 0.94), (40.0, 0.88), (45.0, 0.82), (50.0, 0.75), (55.0, 0.67),
        (60.0, 0.58), (65.0, 0.47), (70.0, 0.33),
    ],
);

/// NEC 310.15(B)(1), 30 °C basis, 90 °C insulation
pub const NEC_TEMP_90C: StepTable = StepTable::new(
    "NEC 310.15(B)(1) 90 °C",
    &[
        (10.0, 1.15), (15.0, 1.12), (20.0, 1.08), (25.0, 1.04), (30.0, 1.00),
        (35.0, 0.96), (40.0, 0.91), (45.0, 0.87), (50.0, 0.82), (55.0, 0.76),
        (60.0, 0.71), (65.0, 0.65), (70.0, 0.58), (75.0, 0.50), (80.0, 0.41),
        (85.0, 0.29),
    ],
);

/// NEC 310.15(C)(1), current-carrying conductors in a raceway or cable
pub const NEC_GROUPING: StepTable = StepTable::new(
    "NEC 310.15(C)(1)",
    &[
        (3.0, 1.00), (6.0, 0.80), (9.0, 0.70), (20.0, 0.50),
        (30.0, 0.45), (40.0, 0.40), (41.0, 0.35),
    ],
);

/// Temperature table for an NEC insulation rating
pub fn nec_temperature(rating_c: u16) -> Option<StepTable> {
    match rating_c {
        60 => Some(NEC_TEMP_60C),
        75 => Some(NEC_TEMP_75C),
        90 => Some(NEC_TEMP_90C),
        _ => None,
    }
}

// ============================================================================
// IEC 60364-5-52
// ============================================================================

/// Table B.52.14, air 30 °C basis, PVC
pub const IEC_AIR_70C: StepTable = StepTable::new(
    "IEC B.52.14 PVC",
    &[
        (10.0, 1.22), (15.0, 1.17), (20.0, 1.12), (25.0, 1.06), (30.0, 1.00),
        (35.0, 0.94), (40.0, 0.87), (45.0, 0.79), (50.0, 0.71), (55.0, 0.61),
        (60.0, 0.50),
    ],
);

/// Table B.52.14, air 30 °C basis, XLPE/EPR
pub const IEC_AIR_90C: StepTable = StepTable::new(
    "IEC B.52.14 XLPE",
    &[
        (10.0, 1.15), (15.0, 1.12), (20.0, 1.08), (25.0, 1.04), (30.0, 1.00),
        (35.0, 0.96), (40.0, 0.91), (45.0, 0.87), (50.0, 0.82), (55.0, 0.76),
        (60.0, 0.71), (65.0, 0.65), (70.0, 0.58), (75.0, 0.50), (80.0, 0.41),
    ],
);

/// Table B.52.15, ground 20 °C basis, PVC
pub const GROUND_70C: StepTable = StepTable::new(
    "IEC B.52.15 / BS 4B2 PVC",
    &[
        (10.0, 1.10), (15.0, 1.05), (20.0, 1.00), (25.0, 0.95), (30.0, 0.89),
        (35.0, 0.84), (40.0, 0.77), (45.0, 0.71), (50.0, 0.63), (55.0, 0.55),
        (60.0, 0.45),
    ],
);

/// Table B.52.15, ground 20 °C basis, XLPE/EPR
pub const GROUND_90C: StepTable = StepTable::new(
    "IEC B.52.15 / BS 4B2 XLPE",
    &[
        (10.0, 1.07), (15.0, 1.04), (20.0, 1.00), (25.0, 0.96), (30.0, 0.93),
        (35.0, 0.89), (40.0, 0.85), (45.0, 0.80), (50.0, 0.76), (55.0, 0.71),
        (60.0, 0.65), (65.0, 0.60), (70.0, 0.53), (75.0, 0.46), (80.0, 0.38),
    ],
);

/// Table B.52.17 row 1 (bunched in air, on a surface, embedded or enclosed);
/// identical to BS 7671 Table 4C1 row 1
pub const METRIC_GROUPING: StepTable = StepTable::new(
    "IEC B.52.17 / BS 4C1",
    &[
        (1.0, 1.00), (2.0, 0.80), (3.0, 0.70), (4.0, 0.65), (5.0, 0.60),
        (6.0, 0.57), (7.0, 0.54), (8.0, 0.52), (9.0, 0.50), (12.0, 0.45),
        (16.0, 0.41), (20.0, 0.38),
    ],
);

/// Temperature table for an IEC insulation rating
pub fn iec_temperature(rating_c: u16, buried: bool) -> Option<StepTable> {
    match (rating_c, buried) {
        (70, false) => Some(IEC_AIR_70C),
        (90, false) => Some(IEC_AIR_90C),
        (70, true) => Some(GROUND_70C),
        (90, true) => Some(GROUND_90C),
        _ => None,
    }
}

// ============================================================================
// BS 7671
// ============================================================================

/// Table 4B1, air 30 °C basis, thermoplastic 70 °C
pub const BS_AIR_70C: StepTable = StepTable::new(
    "BS 7671 Table 4B1 70 °C",
    &[
        (25.0, 1.03), (30.0, 1.00), (35.0, 0.94), (40.0, 0.87), (45.0, 0.79),
        (50.0, 0.71), (55.0, 0.61), (60.0, 0.50),
    ],
);

/// Table 4B1, air 30 °C basis, thermosetting 90 °C
pub const BS_AIR_90C: StepTable = StepTable::new(
    "BS 7671 Table 4B1 90 °C",
    &[
        (25.0, 1.02), (30.0, 1.00), (35.0, 0.96), (40.0, 0.91), (45.0, 0.87),
        (50.0, 0.82), (55.0, 0.76), (60.0, 0.71), (65.0, 0.65), (70.0, 0.58),
        (75.0, 0.50), (80.0, 0.41),
    ],
);

/// Temperature table for a BS 7671 insulation rating
pub fn bs7671_temperature(rating_c: u16, buried: bool) -> Option<StepTable> {
    match (rating_c, buried) {
        (70, false) => Some(BS_AIR_70C),
        (90, false) => Some(BS_AIR_90C),
        (70, true) => Some(GROUND_70C),
        (90, true) => Some(GROUND_90C),
        _ => None,
    }
}

// ============================================================================
// DC applications
// ============================================================================

/// 105 °C insulation, 30 °C basis: sqrt((105 − Ta) / 75) at each step
pub const DC_TEMP_105C: StepTable = StepTable::new(
    "ABYC E-11 105 °C",
    &[
        (10.0, 1.13), (20.0, 1.06), (30.0, 1.00), (40.0, 0.93), (50.0, 0.86),
        (60.0, 0.77), (70.0, 0.68), (80.0, 0.58), (90.0, 0.45), (100.0, 0.26),
    ],
);

/// Temperature table for a DC insulation rating (60/75/90 follow the NEC)
pub fn dc_temperature(rating_c: u16) -> Option<StepTable> {
    match rating_c {
        105 => Some(DC_TEMP_105C),
        other => nec_temperature(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TABLES: [StepTable; 13] = [
        NEC_TEMP_60C,
        NEC_TEMP_75C,
        NEC_TEMP_90C,
        NEC_GROUPING,
        IEC_AIR_70C,
        IEC_AIR_90C,
        GROUND_70C,
        GROUND_90C,
        METRIC_GROUPING,
        BS_AIR_70C,
        BS_AIR_90C,
        DC_TEMP_105C,
        StepTable::new("empty", &[]),
    ];

    #[test]
    fn test_all_tables_ascending() {
        for table in ALL_TABLES {
            assert!(table.is_ascending(), "{} is not ascending", table.name);
        }
    }

    #[test]
    fn test_first_threshold_at_or_above() {
        // 31 °C falls in the 31-35 row
        assert_eq!(NEC_TEMP_75C.lookup(31.0), 0.94);
        assert_eq!(NEC_TEMP_75C.lookup(30.0), 1.00);
        assert_eq!(NEC_TEMP_75C.lookup(-20.0), 1.20);
    }

    #[test]
    fn test_clamps_above_last_threshold() {
        let lookup = NEC_TEMP_60C.resolve(58.0);
        assert_eq!(lookup.factor, 0.41);
        assert!(lookup.clamped);
        assert!(!NEC_TEMP_60C.resolve(55.0).clamped);
    }

    #[test]
    fn test_empty_table_is_neutral() {
        let empty = StepTable::new("empty", &[]);
        let lookup = empty.resolve(42.0);
        assert_eq!(lookup.factor, 1.0);
        assert!(!lookup.clamped);
    }

    #[test]
    fn test_grouping_tables() {
        assert_eq!(NEC_GROUPING.lookup(3.0), 1.0);
        assert_eq!(NEC_GROUPING.lookup(4.0), 0.8);
        assert_eq!(NEC_GROUPING.lookup(50.0), 0.35);
        assert_eq!(METRIC_GROUPING.lookup(2.0), 0.80);
        assert_eq!(METRIC_GROUPING.lookup(3.0), 0.70);
        assert_eq!(METRIC_GROUPING.lookup(10.0), 0.45);
    }

    #[test]
    fn test_soil_thermal_factor() {
        assert_eq!(soil_thermal_factor(1.0), 1.0);
        assert_eq!(soil_thermal_factor(2.5), 1.0);
        assert!((soil_thermal_factor(3.0) - 2.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rating_selection() {
        assert!(nec_temperature(105).is_none());
        assert_eq!(iec_temperature(70, true), Some(GROUND_70C));
        assert_eq!(bs7671_temperature(90, false), Some(BS_AIR_90C));
        assert_eq!(dc_temperature(75), Some(NEC_TEMP_75C));
        assert_eq!(DC_TEMP_105C.lookup(80.0), 0.58);
    }

    #[test]
    fn test_bs7671_starts_at_25c() {
        assert_eq!(BS_AIR_70C.lookup(10.0), 1.03);
    }

    #[test]
    fn test_combined() {
        let factors = CorrectionFactors {
            temperature: 0.88,
            grouping: 0.8,
            installation: 1.0,
            thermal_resistivity: 1.0,
        };
        assert!((factors.combined() - 0.704).abs() < 1e-12);
    }
}
