//! # BS 7671 Sizing
//!
//! Appendix 4 method: tabulated current-carrying capacity I_t ≥ I_b / (Ca ×
//! Cg × Ci × Cs), then voltage drop from the Table 4D1B mV/A/m figures
//! (stored halved as Ω/km per conductor so the shared formulas apply).
//! Appendix 4 section 6.4 limits: 3 % lighting, 5 % other uses.

use crate::conductors::bs7671 as bs7671_table;
use crate::correction_factors::bs7671_temperature;
use crate::errors::CalcResult;
use crate::result::CalculationResult;
use crate::settings::VoltageDropLimits;
use crate::standards::Standard;

use super::metric::{self, MetricInput, MetricStandard};

pub const ALUMINUM_RESISTANCE_MULTIPLIER: f64 = 1.6;

const BS7671: MetricStandard = MetricStandard {
    standard: Standard::Bs7671,
    table: bs7671_table::table,
    default_rating: bs7671_table::DEFAULT_RATING,
    temperature: bs7671_temperature,
    aluminum_multiplier: ALUMINUM_RESISTANCE_MULTIPLIER,
    references: "BS 7671 Appendix 4 Tables 4D1A/4E1A, 4D1B voltage drop, 4B1/4C1 factors",
};

/// Size a cable per BS 7671
pub fn size(input: &MetricInput, limits: VoltageDropLimits, max_alternatives: usize) -> CalcResult<CalculationResult> {
    metric::size(&BS7671, input, limits, max_alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installation::ReferenceMethod;
    use crate::sizing::CircuitParameters;
    use crate::standards::{ConductorMaterial, VoltageSystem};

    fn input(current: f64, length: f64) -> MetricInput {
        MetricInput {
            circuit: CircuitParameters {
                current,
                length,
                voltage: 230.0,
                system: VoltageSystem::SinglePhase,
                material: ConductorMaterial::Copper,
                ambient_c: None,
                conductor_count: None,
                power_factor: None,
                grouping_override: None,
                temperature_rating: None,
            },
            method: ReferenceMethod::C,
            soil_thermal_resistivity: None,
        }
    }

    #[test]
    fn test_radial_circuit() {
        let result = size(&input(16.0, 25.0), VoltageDropLimits::default(), 5).unwrap();
        // 1.5 mm²: 2·16·25·14.5·0.85/1000 = 9.86 V (4.3 %)
        assert_eq!(result.recommended_size, "2.5");
        assert!((result.voltage_drop_percent - 2.66).abs() < 0.01);
        assert_eq!(result.metadata.standard, Standard::Bs7671);
    }

    #[test]
    fn test_lighting_circuit_uses_1mm2() {
        let result = size(&input(6.0, 10.0), VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.recommended_size, "1.0");
        assert!(result.compliance.overall);
    }

    #[test]
    fn test_cool_ambient_uplift() {
        let mut cool = input(6.0, 10.0);
        cool.circuit.ambient_c = Some(20.0);
        let result = size(&cool, VoltageDropLimits::default(), 5).unwrap();
        // Table 4B1 starts at 25 °C
        assert_eq!(result.correction_factors.temperature, 1.03);
    }

    #[test]
    fn test_deprecated_240v_warns() {
        let mut old = input(16.0, 25.0);
        old.circuit.voltage = 240.0;
        let result = size(&old, VoltageDropLimits::default(), 5).unwrap();
        assert!(result.metadata.warnings.iter().any(|w| w.contains("IEC 60038")));
    }
}
