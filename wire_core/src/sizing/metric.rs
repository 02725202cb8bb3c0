//! Shared engine for the metric standards (IEC 60364-5-52 and BS 7671).
//!
//! Both use the ten reference installation methods, no continuous-load
//! multiplier, air temperature tables on a 30 °C basis and ground tables on
//! a 20 °C basis for buried methods. Buried methods (D1, D2) also take the
//! soil thermal-resistivity factor. The standards differ only in their
//! conductor table, air temperature table and aluminum multiplier, which
//! each module supplies as a [`MetricStandard`].

use serde::{Deserialize, Serialize};

use crate::conductors::ConductorTable;
use crate::correction_factors::{CorrectionFactors, StepTable, METRIC_GROUPING};
use crate::errors::{CalcError, CalcResult};
use crate::installation::ReferenceMethod;
use crate::result::{CalculationMetadata, CalculationResult, SafetyFactors};
use crate::settings::VoltageDropLimits;
use crate::standards::Standard;

use super::pipeline::{self, Demand, Notes, SearchProfile};
use super::CircuitParameters;

/// Air temperature basis of the ampacity tables (°C)
pub const DEFAULT_AIR_AMBIENT_C: f64 = 30.0;

/// Ground temperature basis for buried methods (°C)
pub const DEFAULT_GROUND_AMBIENT_C: f64 = 20.0;

/// The tables assume a single circuit
pub const DEFAULT_CONDUCTOR_COUNT: u32 = 1;

/// Pre-IEC 60038 nominal voltages and their harmonized replacements
const DEPRECATED_VOLTAGES: [(f64, f64); 4] = [(220.0, 230.0), (240.0, 230.0), (380.0, 400.0), (415.0, 400.0)];

/// Typed input for the IEC and BS 7671 engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInput {
    pub circuit: CircuitParameters,
    pub method: ReferenceMethod,
    /// K·m/W; defaults to the 2.5 K·m/W table basis
    pub soil_thermal_resistivity: Option<f64>,
}

/// What distinguishes one metric standard from the other
pub(crate) struct MetricStandard {
    pub standard: Standard,
    pub table: fn() -> &'static ConductorTable,
    pub default_rating: u16,
    pub temperature: fn(u16, bool) -> Option<StepTable>,
    pub aluminum_multiplier: f64,
    /// Reference tables named in the result metadata
    pub references: &'static str,
}

/// Warning for a nominal voltage superseded by IEC 60038
pub fn deprecated_voltage_warning(voltage: f64) -> Option<String> {
    DEPRECATED_VOLTAGES
        .iter()
        .find(|(old, _)| (voltage - old).abs() < 0.5)
        .map(|(old, nominal)| format!("{old:.0} V was harmonized to {nominal:.0} V by IEC 60038"))
}

pub(crate) fn size(
    profile: &MetricStandard,
    input: &MetricInput,
    limits: VoltageDropLimits,
    max_alternatives: usize,
) -> CalcResult<CalculationResult> {
    let circuit = &input.circuit;
    let buried = input.method.is_buried();
    let rating = circuit.temperature_rating.unwrap_or(profile.default_rating);
    let temperature_table = (profile.temperature)(rating, buried).ok_or_else(|| {
        CalcError::invalid_input(
            "temperature_rating",
            rating.to_string(),
            format!("{} tables offer 70 and 90 °C", profile.standard.display_name()),
        )
    })?;

    let default_ambient = if buried {
        DEFAULT_GROUND_AMBIENT_C
    } else {
        DEFAULT_AIR_AMBIENT_C
    };
    let ambient = circuit.ambient_c.unwrap_or(default_ambient);
    let count = circuit.conductor_count.unwrap_or(DEFAULT_CONDUCTOR_COUNT);
    let temperature = temperature_table.resolve(ambient);

    let factors = CorrectionFactors {
        temperature: temperature.factor,
        grouping: circuit
            .grouping_override
            .unwrap_or_else(|| METRIC_GROUPING.lookup(f64::from(count))),
        installation: input.method.factor(),
        thermal_resistivity: pipeline::soil_factor(buried, input.soil_thermal_resistivity),
    };

    let resistance_multiplier = pipeline::resistance_multiplier(circuit.material, profile.aluminum_multiplier);
    let search_profile = SearchProfile {
        standard: profile.standard,
        table: (profile.table)(),
        temperature_rating: rating,
        resistance_multiplier,
        voltage_drop_limit: limits.normal_percent,
        max_alternatives,
    };
    let demand = Demand::new(circuit, circuit.current);
    let sizing = pipeline::search(&search_profile, &demand, &factors)?;

    let mut notes = Notes::default();
    notes.circuit_defaults(circuit, ambient, count);
    notes.soil(buried, input.soil_thermal_resistivity, input.method.code());
    if circuit.material.is_aluminum() {
        notes.assume(format!(
            "Aluminum resistance taken as {} × copper; copper ampacity column used",
            profile.aluminum_multiplier
        ));
    }
    notes.temperature(ambient, &temperature_table, temperature);
    if let Some(warning) = deprecated_voltage_warning(circuit.voltage) {
        notes.warn(warning);
    }

    let metadata = CalculationMetadata {
        standard: profile.standard,
        method: format!(
            "{} ({rating} °C), reference method {} with {}",
            profile.references,
            input.method.code(),
            temperature_table.name
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
            continuous_load_multiplier: 1.0,
            continuous_multiplier_applied: false,
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

    #[test]
    fn test_deprecated_voltage() {
        assert!(deprecated_voltage_warning(240.0).unwrap().contains("230 V"));
        assert!(deprecated_voltage_warning(415.0).unwrap().contains("400 V"));
        assert!(deprecated_voltage_warning(230.0).is_none());
        assert!(deprecated_voltage_warning(400.0).is_none());
    }
}
