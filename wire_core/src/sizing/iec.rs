//! # IEC 60364-5-52 Sizing
//!
//! Copper conductors 1.5–300 mm² against the reference method C ampacity
//! columns, converted to other methods by [`ReferenceMethod::factor`].
//! Air temperatures use Table B.52.14, buried methods Table B.52.15 with the
//! soil thermal-resistivity factor, grouping Table B.52.17.
//!
//! [`ReferenceMethod::factor`]: crate::installation::ReferenceMethod::factor

use crate::conductors::iec as iec_table;
use crate::correction_factors::iec_temperature;
use crate::errors::CalcResult;
use crate::result::CalculationResult;
use crate::settings::VoltageDropLimits;
use crate::standards::Standard;

use super::metric::{self, MetricInput, MetricStandard};

/// Aluminum resistance relative to copper (IEC 60228 class 2)
pub const ALUMINUM_RESISTANCE_MULTIPLIER: f64 = 1.61;

const IEC: MetricStandard = MetricStandard {
    standard: Standard::Iec,
    table: iec_table::table,
    default_rating: iec_table::DEFAULT_RATING,
    temperature: iec_temperature,
    aluminum_multiplier: ALUMINUM_RESISTANCE_MULTIPLIER,
    references: "IEC 60364-5-52 Tables B.52.2/B.52.4, IEC 60228 resistance",
};

/// Size a conductor per IEC 60364-5-52
pub fn size(input: &MetricInput, limits: VoltageDropLimits, max_alternatives: usize) -> CalcResult<CalculationResult> {
    metric::size(&IEC, input, limits, max_alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installation::ReferenceMethod;
    use crate::sizing::CircuitParameters;
    use crate::standards::{ConductorMaterial, VoltageSystem};

    fn input(current: f64, length: f64, method: ReferenceMethod) -> MetricInput {
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
            method,
            soil_thermal_resistivity: None,
        }
    }

    #[test]
    fn test_socket_circuit() {
        let result = size(&input(16.0, 25.0, ReferenceMethod::C), VoltageDropLimits::default(), 5).unwrap();
        // 1.5 mm² carries 19.5 A but drops 3.6 %
        assert_eq!(result.recommended_size, "2.5");
        assert_eq!(result.current_capacity, 27.0);
        assert!((result.voltage_drop_percent - 2.21).abs() < 0.01);
        assert_eq!(result.metadata.temperature_rating, 70);
        assert!(!result.metadata.safety_factors.continuous_multiplier_applied);
    }

    #[test]
    fn test_three_phase_grouped() {
        let mut three = input(32.0, 50.0, ReferenceMethod::C);
        three.circuit.voltage = 400.0;
        three.circuit.system = VoltageSystem::ThreePhase;
        three.circuit.conductor_count = Some(3);
        let result = size(&three, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.correction_factors.grouping, 0.70);
        // 32 / 0.70 = 45.7 A
        assert_eq!(result.recommended_size, "6");
        assert!(result.voltage_drop_percent < 2.0);
    }

    #[test]
    fn test_buried_uses_ground_table_and_soil() {
        let mut buried = input(16.0, 25.0, ReferenceMethod::D2);
        buried.soil_thermal_resistivity = Some(3.0);
        let result = size(&buried, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.metadata.ambient_temperature, 20.0);
        assert_eq!(result.correction_factors.temperature, 1.0);
        assert!((result.correction_factors.thermal_resistivity - 2.5 / 3.0).abs() < 1e-12);
        assert!(result.metadata.method.contains("B.52.15"));
    }

    #[test]
    fn test_soil_ignored_above_ground() {
        let mut surface = input(16.0, 25.0, ReferenceMethod::C);
        surface.soil_thermal_resistivity = Some(3.0);
        let result = size(&surface, VoltageDropLimits::default(), 5).unwrap();
        assert_eq!(result.correction_factors.thermal_resistivity, 1.0);
        assert!(result.metadata.assumptions.iter().any(|a| a.contains("ignored")));
    }

    #[test]
    fn test_insulated_wall_needs_larger_conductor() {
        let surface = size(&input(20.0, 5.0, ReferenceMethod::C), VoltageDropLimits::default(), 5).unwrap();
        let wall = size(&input(20.0, 5.0, ReferenceMethod::A1), VoltageDropLimits::default(), 5).unwrap();
        // 20 / 0.72 = 27.8 A
        assert_eq!(surface.recommended_size, "2.5");
        assert_eq!(wall.recommended_size, "4");
    }
}
