//! # NEC Sizing
//!
//! Conductor sizing per NFPA 70.
//!
//! ## Procedure
//!
//! 1. Design current = load current × 1.25 for continuous loads (210.19(A),
//!    215.2(A)), applied unless the request turns it off
//! 2. Temperature factor from 310.15(B)(1) for the chosen insulation rating
//! 3. Adjustment factor from 310.15(C)(1) for the number of current-carrying
//!    conductors (three or fewer: 1.0)
//! 4. Installation factor from [`NecMethod`] (free air ≈ Table 310.17)
//! 5. Smallest Table 310.16 size whose ampacity covers the required ampacity
//!    and whose voltage drop, computed with Chapter 9 Table 9 impedance,
//!    stays within the limit (informational notes 210.19(A) and 215.2(A):
//!    3 % branch, 5 % total)

use serde::{Deserialize, Serialize};

use crate::conductors::nec as nec_table;
use crate::correction_factors::{nec_temperature, CorrectionFactors, NEC_GROUPING};
use crate::errors::{CalcError, CalcResult};
use crate::installation::NecMethod;
use crate::result::{CalculationMetadata, CalculationResult, SafetyFactors};
use crate::settings::VoltageDropLimits;
use crate::standards::Standard;

use super::pipeline::{self, Demand, Notes, SearchProfile};
use super::CircuitParameters;

/// Continuous-load multiplier (125 %)
pub const CONTINUOUS_LOAD_MULTIPLIER: f64 = 1.25;

/// Aluminum resistance relative to copper
pub const ALUMINUM_RESISTANCE_MULTIPLIER: f64 = 1.64;

pub const DEFAULT_AMBIENT_C: f64 = 30.0;

/// A typical single-phase or three-phase raceway carries three
pub const DEFAULT_CONDUCTOR_COUNT: u32 = 3;

/// Superseded nominal voltages and the ANSI C84.1 nominal to use instead
const DEPRECATED_VOLTAGES: [(f64, f64); 6] = [
    (110.0, 120.0),
    (115.0, 120.0),
    (220.0, 240.0),
    (230.0, 240.0),
    (440.0, 480.0),
    (460.0, 480.0),
];

/// Typed NEC engine input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NecInput {
    pub circuit: CircuitParameters,
    pub method: NecMethod,
    pub include_continuous_multiplier: bool,
    /// Soil thermal resistivity (K·m/W), direct burial only
    pub soil_thermal_resistivity: Option<f64>,
}

/// Warning for a superseded nominal supply voltage
pub fn deprecated_voltage_warning(voltage: f64) -> Option<String> {
    DEPRECATED_VOLTAGES
        .iter()
        .find(|(old, _)| (voltage - old).abs() < 0.5)
        .map(|(old, nominal)| {
            format!("{old:.0} V is not an ANSI C84.1 nominal voltage; use {nominal:.0} V")
        })
}

/// Size a conductor per the NEC
pub fn size(input: &NecInput, limits: VoltageDropLimits, max_alternatives: usize) -> CalcResult<CalculationResult> {
    let circuit = &input.circuit;
    let rating = circuit.temperature_rating.unwrap_or(nec_table::DEFAULT_RATING);
    let temperature_table = nec_temperature(rating).ok_or_else(|| {
        CalcError::invalid_input(
            "temperature_rating",
            rating.to_string(),
            "NEC Table 310.16 offers 60, 75 and 90 °C",
        )
    })?;

    let ambient = circuit.ambient_c.unwrap_or(DEFAULT_AMBIENT_C);
    let count = circuit.conductor_count.unwrap_or(DEFAULT_CONDUCTOR_COUNT);
    let temperature = temperature_table.resolve(ambient);

    let factors = CorrectionFactors {
        temperature: temperature.factor,
        grouping: circuit
            .grouping_override
            .unwrap_or_else(|| NEC_GROUPING.lookup(f64::from(count))),
        installation: input.method.factor(),
        thermal_resistivity: pipeline::soil_factor(input.method.is_buried(), input.soil_thermal_resistivity),
    };

    let multiplier = if input.include_continuous_multiplier {
        CONTINUOUS_LOAD_MULTIPLIER
    } else {
        1.0
    };
    let resistance_multiplier = pipeline::resistance_multiplier(circuit.material, ALUMINUM_RESISTANCE_MULTIPLIER);

    let profile = SearchProfile {
        standard: Standard::Nec,
        table: nec_table::table(),
        temperature_rating: rating,
        resistance_multiplier,
        voltage_drop_limit: limits.normal_percent,
        max_alternatives,
    };
    let demand = Demand::new(circuit, circuit.current * multiplier);
    let sizing = pipeline::search(&profile, &demand, &factors)?;

    let mut notes = Notes::default();
    notes.circuit_defaults(circuit, ambient, count);
    notes.soil(input.method.is_buried(), input.soil_thermal_resistivity, input.method.code());
    if input.include_continuous_multiplier {
        notes.assume("Load treated as continuous (125 % of load current)");
    }
    if circuit.material.is_aluminum() {
        notes.assume(format!(
            "Aluminum resistance taken as {ALUMINUM_RESISTANCE_MULTIPLIER} × copper; copper ampacity column used"
        ));
    }
    notes.temperature(ambient, &temperature_table, temperature);
    if let Some(warning) = deprecated_voltage_warning(circuit.voltage) {
        notes.warn(warning);
    }

    let metadata = CalculationMetadata {
        standard: Standard::Nec,
        method: format!(
            "NEC Table 310.16 ({rating} °C column), 310.15(B)(1) temperature and 310.15(C)(1) adjustment factors, Chapter 9 Table 9 impedance"
        ),
        installation_method: input.method.display_name().to_string(),
        conductor_material: circuit.material,
        voltage_system: circuit.system,
        temperature_rating: rating,
        ambient_temperature: ambient,
        conductor_count: count,
        voltage_drop_limit_percent: limits.normal_percent,
        maximum_voltage_drop_percent: limits.maximum_percent,
        safety_factors: SafetyFactors {
            continuous_load_multiplier: CONTINUOUS_LOAD_MULTIPLIER,
            continuous_multiplier_applied: input.include_continuous_multiplier,
            resistance_multiplier,
        },
        assumptions: notes.assumptions,
        warnings: notes.warnings,
    };

    Ok(pipeline::assemble(sizing, factors, !temperature.clamped, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::{ConductorMaterial, VoltageSystem};

    fn input(current: f64, length: f64) -> NecInput {
        NecInput {
            circuit: CircuitParameters {
                current,
                length,
                voltage: 120.0,
                system: VoltageSystem::SinglePhase,
                material: ConductorMaterial::Copper,
                ambient_c: None,
                conductor_count: None,
                power_factor: None,
                grouping_override: None,
                temperature_rating: Some(75),
            },
            method: NecMethod::Raceway,
            include_continuous_multiplier: true,
            soil_thermal_resistivity: None,
        }
    }

    #[test]
    fn test_branch_circuit() {
        let result = size(&input(15.0, 50.0), VoltageDropLimits::default(), 5).unwrap();
        // 14 AWG carries 18.75 A but drops 3.33 %
        assert_eq!(result.recommended_size, "12");
        assert!((result.design_current - 18.75).abs() < 1e-9);
        assert_eq!(result.base_ampacity, 25.0);
        assert!((result.voltage_drop_percent - 2.16).abs() < 0.01);
        assert!(result.compliance.overall);
        assert_eq!(result.metadata.safety_factors.continuous_load_multiplier, 1.25);
        assert_eq!(result.alternatives[0].size, "14");
        assert!(!result.alternatives[0].compliant);
    }

    #[test]
    fn test_grouping_derates() {
        let mut nine = input(15.0, 10.0);
        nine.circuit.conductor_count = Some(9);
        let result = size(&nine, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.correction_factors.grouping, 0.70);
        // 18.75 / 0.70 = 26.8 A
        assert_eq!(result.recommended_size, "10");
    }

    #[test]
    fn test_grouping_override_replaces_table() {
        let mut six = input(15.0, 10.0);
        six.circuit.conductor_count = Some(6);
        six.circuit.grouping_override = Some(0.9);
        let result = size(&six, VoltageDropLimits::default(), 5).unwrap();
        // table would give 0.80 for six conductors
        assert_eq!(result.correction_factors.grouping, 0.9);
        assert!((result.required_ampacity - 18.75 / 0.9).abs() < 1e-9);
        assert_eq!(result.recommended_size, "12");
        assert!(result
            .metadata
            .assumptions
            .iter()
            .any(|a| a == "Grouping factor overridden to 0.90"));
    }

    #[test]
    fn test_direct_burial_applies_soil_resistivity() {
        let mut buried = input(15.0, 10.0);
        buried.method = NecMethod::DirectBurial;
        buried.soil_thermal_resistivity = Some(5.0);
        let result = size(&buried, VoltageDropLimits::default(), 5).unwrap();
        assert!((result.correction_factors.thermal_resistivity - 0.5).abs() < 1e-12);
        // 18.75 / 0.5 = 37.5 A; 10 AWG carries 35 A
        assert!((result.required_ampacity - 37.5).abs() < 1e-9);
        assert_eq!(result.recommended_size, "8");

        buried.soil_thermal_resistivity = None;
        let result = size(&buried, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.correction_factors.thermal_resistivity, 1.0);
        assert!(result.metadata.assumptions.iter().any(|a| a.contains("2.5 K·m/W assumed")));
    }

    #[test]
    fn test_soil_resistivity_ignored_in_raceway() {
        let mut raceway = input(15.0, 10.0);
        raceway.soil_thermal_resistivity = Some(5.0);
        let result = size(&raceway, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.correction_factors.thermal_resistivity, 1.0);
        assert!(result
            .metadata
            .assumptions
            .iter()
            .any(|a| a.contains("ignored for above-ground method raceway")));
    }

    #[test]
    fn test_free_air_factor() {
        let mut free_air = input(15.0, 10.0);
        free_air.method = NecMethod::FreeAir;
        let result = size(&free_air, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.correction_factors.installation, 1.3);
        assert!(result.current_capacity > result.base_ampacity);
    }

    #[test]
    fn test_hot_ambient_is_clamped_and_flagged() {
        let mut hot = input(10.0, 10.0);
        hot.circuit.ambient_c = Some(80.0);
        let result = size(&hot, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.correction_factors.temperature, 0.33);
        assert!(!result.compliance.temperature);
        assert!(!result.compliance.overall);
        assert!(result.metadata.warnings.iter().any(|w| w.contains("clamped")));
    }

    #[test]
    fn test_deprecated_voltage() {
        assert!(deprecated_voltage_warning(110.0).unwrap().contains("120 V"));
        assert!(deprecated_voltage_warning(120.0).is_none());
        assert!(deprecated_voltage_warning(460.0).unwrap().contains("480 V"));
    }

    #[test]
    fn test_unsupported_rating() {
        let mut odd = input(10.0, 10.0);
        odd.circuit.temperature_rating = Some(105);
        let err = size(&odd, VoltageDropLimits::default(), 5).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
