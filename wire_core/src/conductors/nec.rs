//! NEC Conductor Table
//!
//! Copper building wire, 14 AWG through 1000 kcmil.
//!
//! - Ampacity: NEC Table 310.16 (not more than three current-carrying
//!   conductors in raceway, cable or earth, 30 °C ambient) at 60/75/90 °C
//! - Resistance and reactance: NEC Chapter 9 Table 9, uncoated copper in
//!   PVC conduit, Ω per 1000 ft at 75 °C
//! - Diameter: Chapter 9 Table 8 stranded conductor (in); weight lb/1000 ft

use once_cell::sync::Lazy;

use super::SizeUnit::{Awg, Kcmil};
use super::{ConductorTable, ImperialRow};
use crate::voltage_drop::LengthScale;

/// Insulation temperature ratings offered by Table 310.16
pub const RATINGS: [u16; 3] = [60, 75, 90];

/// Rating used when the request does not name one (terminations are
/// commonly listed for 75 °C)
pub const DEFAULT_RATING: u16 = 75;

#[rustfmt::skip]
const ROWS: [ImperialRow<3>; 21] = [
    // size,  unit,  mm²,    Ω/kft,  X Ω/kft, [60, 75, 90 °C],        dia in, lb/kft
    ("14",   Awg,   2.08,   3.1,    0.058,   [15.0, 20.0, 25.0],     0.073,  12.4),
    ("12",   Awg,   3.31,   2.0,    0.054,   [20.0, 25.0, 30.0],     0.092,  19.8),
    ("10",   Awg,   5.26,   1.2,    0.050,   [30.0, 35.0, 40.0],     0.116,  31.4),
    ("8",    Awg,   8.37,   0.78,   0.052,   [40.0, 50.0, 55.0],     0.146,  50.0),
    ("6",    Awg,   13.3,   0.49,   0.051,   [55.0, 65.0, 75.0],     0.184,  79.5),
    ("4",    Awg,   21.2,   0.31,   0.048,   [70.0, 85.0, 95.0],     0.232,  126.0),
    ("3",    Awg,   26.7,   0.25,   0.047,   [85.0, 100.0, 115.0],   0.260,  159.0),
    ("2",    Awg,   33.6,   0.19,   0.045,   [95.0, 115.0, 130.0],   0.292,  201.0),
    ("1",    Awg,   42.4,   0.15,   0.046,   [110.0, 130.0, 145.0],  0.332,  253.0),
    ("1/0",  Awg,   53.5,   0.12,   0.044,   [125.0, 150.0, 170.0],  0.372,  319.0),
    ("2/0",  Awg,   67.4,   0.10,   0.043,   [145.0, 175.0, 195.0],  0.418,  403.0),
    ("3/0",  Awg,   85.0,   0.077,  0.042,   [165.0, 200.0, 225.0],  0.470,  508.0),
    ("4/0",  Awg,   107.2,  0.062,  0.041,   [195.0, 230.0, 260.0],  0.528,  641.0),
    ("250",  Kcmil, 126.7,  0.052,  0.041,   [215.0, 255.0, 290.0],  0.575,  757.0),
    ("300",  Kcmil, 152.0,  0.044,  0.041,   [240.0, 285.0, 320.0],  0.630,  908.0),
    ("350",  Kcmil, 177.3,  0.038,  0.040,   [260.0, 310.0, 350.0],  0.681,  1060.0),
    ("400",  Kcmil, 202.7,  0.033,  0.040,   [280.0, 335.0, 380.0],  0.728,  1211.0),
    ("500",  Kcmil, 253.4,  0.027,  0.039,   [320.0, 380.0, 430.0],  0.813,  1514.0),
    ("600",  Kcmil, 304.0,  0.023,  0.039,   [350.0, 420.0, 475.0],  0.893,  1817.0),
    ("750",  Kcmil, 380.0,  0.019,  0.038,   [400.0, 475.0, 535.0],  0.998,  2271.0),
    ("1000", Kcmil, 506.7,  0.015,  0.037,   [455.0, 545.0, 615.0],  1.152,  3028.0),
];

static TABLE: Lazy<ConductorTable> = Lazy::new(|| {
    ConductorTable::from_imperial_rows(
        "NEC Table 310.16 / Chapter 9 Table 9 (copper, PVC conduit)",
        LengthScale::PerThousandFeet,
        &RATINGS,
        &ROWS,
    )
});

/// The NEC copper conductor table
pub fn table() -> &'static ConductorTable {
    &TABLE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conductors::SizeUnit;

    #[test]
    fn test_table_is_well_formed() {
        let table = table();
        assert!(table.is_well_formed());
        assert_eq!(table.entries().len(), 21);
        assert_eq!(table.length_scale, LengthScale::PerThousandFeet);
    }

    #[test]
    fn test_known_values() {
        let table = table();
        let twelve = table.find("12 AWG").unwrap();
        assert_eq!(twelve.ampacity_at(60), Some(20.0));
        assert_eq!(twelve.ampacity_at(90), Some(30.0));
        assert!((twelve.resistance - 2.0).abs() < 1e-9);

        let kcmil = table.find("250").unwrap();
        assert_eq!(kcmil.unit, SizeUnit::Kcmil);
        assert_eq!(kcmil.designation(), "250 kcmil");
    }

    #[test]
    fn test_largest_is_1000_kcmil() {
        let largest = table().largest().unwrap();
        assert_eq!(largest.size, "1000");
        assert_eq!(largest.ampacity_at(90), Some(615.0));
    }

    #[test]
    fn test_unsupported_rating() {
        assert!(!table().supports_rating(105));
        assert!(table().supports_rating(DEFAULT_RATING));
    }
}
