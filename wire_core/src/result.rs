//! # Sizing Result
//!
//! One result shape for every standard. AC engines build it directly; the DC
//! engine produces its own outcome, which is mapped into this shape with an
//! extra [`DcAnalysis`] attached.
//!
//! ## Ampacity figures
//!
//! | Field              | Meaning                                              |
//! |--------------------|------------------------------------------------------|
//! | `design_current`   | load current × continuous multiplier                 |
//! | `required_ampacity`| design current ÷ combined correction factor          |
//! | `base_ampacity`    | tabulated ampacity of the selected size (≥ required) |
//! | `current_capacity` | base ampacity × combined factor (≥ design current)   |

use serde::{Deserialize, Serialize};

use crate::conductors::SizeUnit;
use crate::correction_factors::CorrectionFactors;
use crate::sizing::dc::{DcApplication, DcLoadType, DcVoltage};
use crate::standards::{ConductorMaterial, Standard, VoltageSystem};

/// The recommended conductor and everything that led to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Size label as it appears in the standard's table, e.g. "12" or "2.5"
    pub recommended_size: String,
    pub size_unit: SizeUnit,

    /// Derated ampacity of the selected conductor (A)
    pub current_capacity: f64,
    /// Tabulated ampacity at the applied temperature rating (A)
    pub base_ampacity: f64,
    /// Minimum tabulated ampacity the circuit needed (A)
    pub required_ampacity: f64,
    /// Load current after any continuous multiplier (A)
    pub design_current: f64,

    pub voltage_drop_percent: f64,
    pub voltage_drop_volts: f64,
    /// Resistive loss in the run (W)
    pub power_loss_w: f64,
    /// Delivered fraction of the supply voltage (%)
    pub efficiency_percent: f64,

    pub correction_factors: CorrectionFactors,
    /// Product of the four correction factors
    pub combined_factor: f64,

    pub compliance: Compliance,
    pub metadata: CalculationMetadata,

    /// Ampacity-compliant sizes in ascending order, selection included
    pub alternatives: Vec<AlternativeConductor>,

    /// Present only for DC requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_analysis: Option<DcAnalysis>,
}

impl CalculationResult {
    /// Size with its unit, e.g. "12 AWG"
    pub fn designation(&self) -> String {
        format!("{} {}", self.recommended_size, self.size_unit)
    }

    /// Overall compliance verdict
    pub fn is_compliant(&self) -> bool {
        self.compliance.overall
    }

    pub fn has_warnings(&self) -> bool {
        !self.metadata.warnings.is_empty()
    }
}

/// Per-criterion compliance verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compliance {
    /// Tabulated ampacity covers the required ampacity
    pub current: bool,
    /// Voltage drop within the applied limit
    pub voltage_drop: bool,
    /// Ambient inside the range tabulated for the insulation rating
    pub temperature: bool,
    /// Installation method recognized by the standard
    pub installation: bool,
    /// All of the above (and, for DC, the efficiency target)
    pub overall: bool,
}

impl Compliance {
    pub fn new(current: bool, voltage_drop: bool, temperature: bool, installation: bool) -> Self {
        Compliance {
            current,
            voltage_drop,
            temperature,
            installation,
            overall: current && voltage_drop && temperature && installation,
        }
    }
}

/// Multipliers applied on top of the tabulated values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyFactors {
    /// Continuous-load multiplier the standard defines for this circuit
    pub continuous_load_multiplier: f64,
    /// Whether that multiplier was applied to the design current
    pub continuous_multiplier_applied: bool,
    /// Resistance multiplier for the conductor material (1.0 for copper)
    pub resistance_multiplier: f64,
}

/// How the result was obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationMetadata {
    pub standard: Standard,
    /// Tables and formulas used
    pub method: String,
    pub installation_method: String,
    pub conductor_material: ConductorMaterial,
    pub voltage_system: VoltageSystem,
    /// Insulation temperature rating applied (°C)
    pub temperature_rating: u16,
    /// Ambient temperature applied (°C)
    pub ambient_temperature: f64,
    pub conductor_count: u32,
    /// Voltage-drop limit the selection was held to (%)
    pub voltage_drop_limit_percent: f64,
    /// Absolute maximum voltage drop (%)
    pub maximum_voltage_drop_percent: f64,
    pub safety_factors: SafetyFactors,
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
}

/// One ranked alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeConductor {
    pub size: String,
    pub size_unit: SizeUnit,
    /// Derated ampacity (A)
    pub current_capacity: f64,
    pub voltage_drop_percent: f64,
    /// Meets ampacity and the voltage-drop limit
    pub compliant: bool,
    /// Cross-section relative to the recommended size
    pub relative_cost: f64,
}

/// DC application verdict layered on the shared pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcAnalysis {
    pub application: DcApplication,
    pub voltage_system: DcVoltage,
    pub load_type: DcLoadType,
    /// Nominal voltage of the tag (V)
    pub nominal_voltage: f64,
    /// Supply voltage minus the drop, at the load terminals (V)
    pub effective_voltage: f64,
    /// Temperature correction factor applied
    pub temperature_derating: f64,
    /// Minimum efficiency the application demands (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_target_percent: Option<f64>,
    /// True when the application has no target
    pub meets_efficiency_target: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_is_conjunction() {
        assert!(Compliance::new(true, true, true, true).overall);
        assert!(!Compliance::new(true, false, true, true).overall);
        assert!(!Compliance::new(true, true, false, true).overall);
    }

    #[test]
    fn test_compliance_serialization() {
        let compliance = Compliance::new(true, false, true, true);
        let json = serde_json::to_string(&compliance).unwrap();
        assert!(json.contains("\"voltage_drop\":false"));
        assert!(json.contains("\"overall\":false"));
    }
}
