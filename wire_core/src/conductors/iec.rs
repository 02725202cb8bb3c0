//! IEC 60364-5-52 Conductor Table
//!
//! Copper conductors 1.5 mm² through 300 mm².
//!
//! - Ampacity: reference installation method C (clipped direct), two loaded
//!   conductors, 30 °C air. 70 °C column from Table B.52.2 (PVC), 90 °C
//!   column from Table B.52.4 (XLPE/EPR). Other methods are reached through
//!   the installation-method factor.
//! - Resistance: IEC 60228 class 2 maximum DC resistance at 20 °C (Ω/km)
//! - Reactance: typical single-core values, touching (Ω/km)

use once_cell::sync::Lazy;

use super::{ConductorTable, MetricRow};
use crate::voltage_drop::LengthScale;

/// PVC (70 °C) and XLPE (90 °C) columns
pub const RATINGS: [u16; 2] = [70, 90];

/// PVC insulation unless the request asks for 90 °C
pub const DEFAULT_RATING: u16 = 70;

#[rustfmt::skip]
const ROWS: [MetricRow<2>; 16] = [
    // size,  mm²,    Ω/km,    X Ω/km, [70, 90 °C],      dia mm, kg/km
    ("1.5",   1.5,    12.1,    0.110,  [19.5, 24.0],     3.1,    14.4),
    ("2.5",   2.5,    7.41,    0.100,  [27.0, 33.0],     3.7,    24.0),
    ("4",     4.0,    4.61,    0.095,  [36.0, 45.0],     4.4,    38.0),
    ("6",     6.0,    3.08,    0.090,  [46.0, 58.0],     4.9,    58.0),
    ("10",    10.0,   1.83,    0.086,  [63.0, 80.0],     6.3,    96.0),
    ("16",    16.0,   1.15,    0.083,  [85.0, 107.0],    7.4,    154.0),
    ("25",    25.0,   0.727,   0.081,  [112.0, 142.0],   9.0,    240.0),
    ("35",    35.0,   0.524,   0.080,  [138.0, 175.0],   10.2,   336.0),
    ("50",    50.0,   0.387,   0.079,  [168.0, 212.0],   11.9,   480.0),
    ("70",    70.0,   0.268,   0.078,  [213.0, 270.0],   13.7,   672.0),
    ("95",    95.0,   0.193,   0.077,  [258.0, 328.0],   16.0,   912.0),
    ("120",   120.0,  0.153,   0.076,  [299.0, 382.0],   17.6,   1152.0),
    ("150",   150.0,  0.124,   0.076,  [344.0, 441.0],   19.7,   1440.0),
    ("185",   185.0,  0.0991,  0.075,  [392.0, 506.0],   21.9,   1776.0),
    ("240",   240.0,  0.0754,  0.074,  [461.0, 599.0],   25.0,   2304.0),
    ("300",   300.0,  0.0601,  0.074,  [530.0, 693.0],   27.8,   2880.0),
];

static TABLE: Lazy<ConductorTable> = Lazy::new(|| {
    ConductorTable::from_metric_rows(
        "IEC 60364-5-52 Tables B.52.2/B.52.4 (method C) / IEC 60228",
        LengthScale::PerKilometre,
        &RATINGS,
        &ROWS,
    )
});

/// The IEC copper conductor table
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
        assert_eq!(table.length_scale, LengthScale::PerKilometre);
        assert_eq!(table.entries()[0].size, "1.5");
    }

    #[test]
    fn test_known_values() {
        let cable = table().find("2.5 mm²").unwrap();
        assert_eq!(cable.ampacity_at(70), Some(27.0));
        assert_eq!(cable.ampacity_at(90), Some(33.0));
        assert!((cable.resistance - 7.41).abs() < 1e-9);
        assert_eq!(cable.designation(), "2.5 mm²");
    }

    #[test]
    fn test_no_75c_column() {
        assert!(!table().supports_rating(75));
    }
}
