//! DC Conductor Table
//!
//! Stranded copper, 18 AWG through 4/0 AWG, for low-voltage DC wiring
//! (vehicle, marine, PV and telecom plant).
//!
//! - Resistance: NEC Chapter 9 Table 8, uncoated stranded copper, DC,
//!   Ω per 1000 ft at 75 °C. No reactance.
//! - Ampacity: 60/75/90 °C columns follow NEC Table 310.16 (18 and 16 AWG
//!   extended from Table 402.5); the 105 °C column follows ABYC E-11
//!   Table VI for conductors outside engine spaces.

use once_cell::sync::Lazy;

use super::SizeUnit::Awg;
use super::{ConductorTable, ImperialRow};
use crate::voltage_drop::LengthScale;

pub const RATINGS: [u16; 4] = [60, 75, 90, 105];

#[rustfmt::skip]
const ROWS: [ImperialRow<4>; 14] = [
    // size, unit, mm²,    Ω/kft,   X,   [60, 75, 90, 105 °C],           dia in, lb/kft
    ("18",   Awg,  0.823,  7.77,    0.0, [7.0, 10.0, 14.0, 20.0],        0.046,  4.9),
    ("16",   Awg,  1.31,   4.89,    0.0, [10.0, 13.0, 18.0, 25.0],       0.058,  7.8),
    ("14",   Awg,  2.08,   3.07,    0.0, [15.0, 20.0, 25.0, 35.0],       0.073,  12.4),
    ("12",   Awg,  3.31,   1.93,    0.0, [20.0, 25.0, 30.0, 45.0],       0.092,  19.8),
    ("10",   Awg,  5.26,   1.21,    0.0, [30.0, 35.0, 40.0, 60.0],       0.116,  31.4),
    ("8",    Awg,  8.37,   0.764,   0.0, [40.0, 50.0, 55.0, 80.0],       0.146,  50.0),
    ("6",    Awg,  13.3,   0.491,   0.0, [55.0, 65.0, 75.0, 120.0],      0.184,  79.5),
    ("4",    Awg,  21.2,   0.308,   0.0, [70.0, 85.0, 95.0, 160.0],      0.232,  126.0),
    ("2",    Awg,  33.6,   0.194,   0.0, [95.0, 115.0, 130.0, 210.0],    0.292,  201.0),
    ("1",    Awg,  42.4,   0.154,   0.0, [110.0, 130.0, 145.0, 245.0],   0.332,  253.0),
    ("1/0",  Awg,  53.5,   0.122,   0.0, [125.0, 150.0, 170.0, 285.0],   0.372,  319.0),
    ("2/0",  Awg,  67.4,   0.0967,  0.0, [145.0, 175.0, 195.0, 330.0],   0.418,  403.0),
    ("3/0",  Awg,  85.0,   0.0766,  0.0, [165.0, 200.0, 225.0, 385.0],   0.470,  508.0),
    ("4/0",  Awg,  107.2,  0.0608,  0.0, [195.0, 230.0, 260.0, 445.0],   0.528,  641.0),
];

static TABLE: Lazy<ConductorTable> = Lazy::new(|| {
    ConductorTable::from_imperial_rows(
        "NEC Chapter 9 Table 8 (DC resistance) / ABYC E-11 Table VI",
        LengthScale::PerThousandFeet,
        &RATINGS,
        &ROWS,
    )
});

/// The DC copper conductor table
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
        assert!(table.entries().iter().all(|e| e.reactance == 0.0));
    }

    #[test]
    fn test_105c_column() {
        let six = table().find("6").unwrap();
        assert_eq!(six.ampacity_at(105), Some(120.0));
        assert!((six.resistance - 0.491).abs() < 1e-9);
    }

    #[test]
    fn test_range() {
        let table = table();
        assert_eq!(table.entries()[0].size, "18");
        assert_eq!(table.largest().unwrap().size, "4/0");
    }
}
