//! # Standard Switching
//!
//! Carries a circuit selection from one standard to another: the run length
//! changes unit, the conductor size maps through fixed gauge ↔ mm²
//! correspondence tables, and the voltage and installation method are kept
//! only if the target standard accepts them.
//!
//! ## Size correspondence
//!
//! The tables pair each size with the nearest standard size of at least the
//! same cross-section in the other system, so a conversion never undersizes.
//! As a result the mapping is not symmetric: 14 AWG (2.08 mm²) maps to
//! 2.5 mm², while 2.5 mm² maps to 12 AWG (3.31 mm²).
//!
//! ## Example
//!
//! ```rust
//! use wire_core::conversion::{switch_standard, CircuitSelection};
//! use wire_core::standards::Standard;
//!
//! let nec = CircuitSelection {
//!     standard: Standard::Nec,
//!     length: 100.0,
//!     voltage: 120.0,
//!     installation_method: "raceway".to_string(),
//!     conductor_size: Some("12".to_string()),
//! };
//! let switched = switch_standard(&nec, Standard::Iec);
//! assert!((switched.selection.length - 30.48).abs() < 1e-9);
//! assert_eq!(switched.selection.conductor_size.as_deref(), Some("4"));
//! assert_eq!(switched.selection.voltage, 230.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conductors::{normalize_size_label, table_for};
use crate::installation::{DcMethod, NecMethod, ReferenceMethod};
use crate::sizing::dc::DcVoltage;
use crate::standards::Standard;

/// AWG / kcmil → nearest mm² of at least equal cross-section
const GAUGE_TO_METRIC: [(&str, &str); 23] = [
    ("18", "1.0"),
    ("16", "1.5"),
    ("14", "2.5"),
    ("12", "4"),
    ("10", "6"),
    ("8", "10"),
    ("6", "16"),
    ("4", "25"),
    ("3", "35"),
    ("2", "35"),
    ("1", "50"),
    ("1/0", "70"),
    ("2/0", "70"),
    ("3/0", "95"),
    ("4/0", "120"),
    ("250", "150"),
    ("300", "185"),
    ("350", "185"),
    ("400", "240"),
    ("500", "300"),
    ("600", "400"),
    ("750", "400"),
    ("1000", "630"),
];

/// mm² → nearest AWG / kcmil of at least equal cross-section
const METRIC_TO_GAUGE: [(&str, &str); 18] = [
    ("0.75", "18"),
    ("1.0", "16"),
    ("1.5", "14"),
    ("2.5", "12"),
    ("4", "10"),
    ("6", "8"),
    ("10", "6"),
    ("16", "4"),
    ("25", "3"),
    ("35", "1"),
    ("50", "1/0"),
    ("70", "3/0"),
    ("95", "4/0"),
    ("120", "250"),
    ("150", "300"),
    ("185", "400"),
    ("240", "500"),
    ("300", "600"),
];

/// What the caller has entered for one standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSelection {
    pub standard: Standard,
    /// One-way length in the standard's length unit
    pub length: f64,
    pub voltage: f64,
    pub installation_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conductor_size: Option<String>,
}

impl CircuitSelection {
    /// The initial selection a standard starts from
    pub fn defaults_for(standard: Standard, length: f64) -> Self {
        CircuitSelection {
            standard,
            length,
            voltage: default_voltage(standard),
            installation_method: default_installation_method(standard).to_string(),
            conductor_size: None,
        }
    }
}

/// A converted selection with a note for every field that changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardSwitch {
    pub selection: CircuitSelection,
    pub notes: Vec<String>,
}

/// Nominal supply voltages offered by a standard
pub fn nominal_voltages(standard: Standard) -> Vec<f64> {
    match standard {
        Standard::Nec => vec![120.0, 208.0, 240.0, 277.0, 480.0, 600.0],
        Standard::Iec => vec![230.0, 400.0, 690.0],
        Standard::Bs7671 => vec![230.0, 400.0],
        Standard::Dc => DcVoltage::ALL.iter().map(DcVoltage::nominal).collect(),
    }
}

pub fn default_voltage(standard: Standard) -> f64 {
    match standard {
        Standard::Nec => 120.0,
        Standard::Iec | Standard::Bs7671 => 230.0,
        Standard::Dc => 12.0,
    }
}

pub fn default_installation_method(standard: Standard) -> &'static str {
    match standard {
        Standard::Nec => NecMethod::default().code(),
        Standard::Iec | Standard::Bs7671 => ReferenceMethod::default().code(),
        Standard::Dc => DcMethod::default().code(),
    }
}

/// Whether `method` parses under the standard's enumeration
pub fn is_valid_installation_method(standard: Standard, method: &str) -> bool {
    match standard {
        Standard::Nec => NecMethod::parse(method).is_some(),
        Standard::Iec | Standard::Bs7671 => ReferenceMethod::parse(method).is_some(),
        Standard::Dc => DcMethod::parse(method).is_some(),
    }
}

/// Convert a one-way length between the standards' length units
pub fn convert_length(length: f64, from: Standard, to: Standard) -> f64 {
    from.length_unit().convert(length, to.length_unit())
}

/// Map a conductor size into the target standard's table.
///
/// Gauge and metric sizes cross through the correspondence tables; within
/// the same system the label carries over. If the mapped size is missing
/// from the target table, the next larger entry by cross-section is used.
/// `None` when no target entry is large enough.
pub fn map_conductor_size(size: &str, from: Standard, to: Standard) -> Option<String> {
    let label = normalize_size_label(size);
    let mapped = match (from.is_metric(), to.is_metric()) {
        (false, true) => lookup(&GAUGE_TO_METRIC, &label, false)?,
        (true, false) => lookup(&METRIC_TO_GAUGE, &label, true)?,
        _ => label,
    };

    let target = table_for(to);
    match target.find(&mapped) {
        Some(entry) => Some(entry.size.clone()),
        None => target
            .smallest_with_area(area_of(&mapped, to.is_metric())?)
            .map(|e| e.size.clone()),
    }
}

fn lookup(table: &[(&str, &str)], label: &str, numeric: bool) -> Option<String> {
    let same = |key: &str| {
        key == label || (numeric && matches!((key.parse::<f64>(), label.parse::<f64>()), (Ok(a), Ok(b)) if a == b))
    };
    table.iter().find(|&&(key, _)| same(key)).map(|(_, to)| to.to_string())
}

/// Cross-section of a size label; gauge sizes are looked up in the
/// NEC and DC tables, which together span 18 AWG to 1000 kcmil
fn area_of(label: &str, metric: bool) -> Option<f64> {
    if metric {
        label.parse().ok()
    } else {
        table_for(Standard::Nec)
            .find(label)
            .or_else(|| table_for(Standard::Dc).find(label))
            .map(|e| e.area_mm2)
    }
}

/// Carry a selection over to `target`
pub fn switch_standard(selection: &CircuitSelection, target: Standard) -> StandardSwitch {
    let from = selection.standard;
    let mut notes = Vec::new();

    let length = convert_length(selection.length, from, target);
    if from.length_unit() != target.length_unit() {
        notes.push(format!(
            "Length {} {} converted to {:.2} {}",
            selection.length,
            from.length_unit().symbol(),
            length,
            target.length_unit().symbol()
        ));
    }

    let voltage = if nominal_voltages(target).iter().any(|v| (v - selection.voltage).abs() < 0.5) {
        selection.voltage
    } else {
        let fallback = default_voltage(target);
        notes.push(format!(
            "{} V is not a {target} nominal voltage; reset to {fallback} V",
            selection.voltage
        ));
        fallback
    };

    let installation_method = if is_valid_installation_method(target, &selection.installation_method) {
        selection.installation_method.clone()
    } else {
        let fallback = default_installation_method(target);
        notes.push(format!(
            "Installation method '{}' is not valid for {target}; reset to '{fallback}'",
            selection.installation_method
        ));
        fallback.to_string()
    };

    let conductor_size = selection.conductor_size.as_deref().and_then(|size| {
        let mapped = map_conductor_size(size, from, target);
        match &mapped {
            Some(new) if *new == normalize_size_label(size) => {}
            Some(new) => notes.push(format!("Conductor {size} mapped to {new}")),
            None => notes.push(format!("Conductor {size} has no equivalent in the {target} table")),
        }
        mapped
    });

    debug!(from = %from, to = %target, changes = notes.len(), "switched standard");

    StandardSwitch {
        selection: CircuitSelection {
            standard: target,
            length,
            voltage,
            installation_method,
            conductor_size,
        },
        notes,
    }
}
