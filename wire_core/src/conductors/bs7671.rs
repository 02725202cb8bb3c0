//! BS 7671 Conductor Table
//!
//! Single-core copper cables 1.0 mm² through 300 mm² (Appendix 4).
//!
//! - Ampacity: reference method C, two cables single-phase. 70 °C column
//!   from Table 4D1A (thermoplastic), 90 °C column from Table 4E1A
//!   (thermosetting).
//! - Resistance and reactance: Table 4D1B voltage drop (mV/A/m, two cables
//!   single-phase) halved to give Ω/km per conductor at conductor operating
//!   temperature.

use once_cell::sync::Lazy;

use super::{ConductorTable, MetricRow};
use crate::voltage_drop::LengthScale;

/// Thermoplastic (70 °C) and thermosetting (90 °C) columns
pub const RATINGS: [u16; 2] = [70, 90];

pub const DEFAULT_RATING: u16 = 70;

#[rustfmt::skip]
const ROWS: [MetricRow<2>; 17] = [
    // size,  mm²,    Ω/km,    X Ω/km, [70, 90 °C],      dia mm, kg/km
    ("1.0",   1.0,    22.0,    0.0,    [15.5, 19.0],     2.9,    9.6),
    ("1.5",   1.5,    14.5,    0.0,    [20.0, 25.0],     3.1,    14.4),
    ("2.5",   2.5,    9.0,     0.0,    [27.0, 34.0],     3.7,    24.0),
    ("4",     4.0,    5.5,     0.0,    [37.0, 46.0],     4.4,    38.0),
    ("6",     6.0,    3.65,    0.0,    [47.0, 59.0],     4.9,    58.0),
    ("10",    10.0,   2.2,     0.0,    [65.0, 81.0],     6.3,    96.0),
    ("16",    16.0,   1.4,     0.0,    [87.0, 109.0],    7.4,    154.0),
    ("25",    25.0,   0.875,   0.100,  [114.0, 143.0],   9.0,    240.0),
    ("35",    35.0,   0.625,   0.0975, [141.0, 176.0],   10.2,   336.0),
    ("50",    50.0,   0.465,   0.095,  [182.0, 228.0],   11.9,   480.0),
    ("70",    70.0,   0.315,   0.0925, [234.0, 293.0],   13.7,   672.0),
    ("95",    95.0,   0.235,   0.0925, [284.0, 355.0],   16.0,   912.0),
    ("120",   120.0,  0.19,    0.090,  [330.0, 413.0],   17.6,   1152.0),
    ("150",   150.0,  0.15,    0.090,  [381.0, 476.0],   19.7,   1440.0),
    ("185",   185.0,  0.125,   0.090,  [436.0, 545.0],   21.9,   1776.0),
    ("240",   240.0,  0.095,   0.0875, [515.0, 644.0],   25.0,   2304.0),
    ("300",   300.0,  0.0775,  0.0875, [594.0, 743.0],   27.8,   2880.0),
];

static TABLE: Lazy<ConductorTable> = Lazy::new(|| {
    ConductorTable::from_metric_rows(
        "BS 7671 Appendix 4 Tables 4D1A/4D1B/4E1A (method C)",
        LengthScale::PerKilometre,
        &RATINGS,
        &ROWS,
    )
});

/// The BS 7671 copper cable table
pub fn table() -> &'static ConductorTable {
    &TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_well_formed() {
        let table = table();
        assert!(table.is_well_formed());
        assert_eq!(table.entries().len(), 17);
    }

    #[test]
    fn test_includes_1mm2_lighting_cable() {
        let cable = table().find("1.0").unwrap();
        assert_eq!(cable.ampacity_at(70), Some(15.5));
        assert!(crate::conductors::iec::table().find("1.0").is_none());
    }

    #[test]
    fn test_small_sizes_are_resistive_only() {
        let cable = table().find("16").unwrap();
        assert_eq!(cable.reactance, 0.0);
        assert!(table().find("25").unwrap().reactance > 0.0);
    }
}
