//! Shared conductor search.
//!
//! Every engine resolves its own correction factors and limits, then hands
//! the same three things to [`search`]: a profile (table, rating, limits),
//! the circuit demand, and the factors. The search filters the table by
//! required ampacity and walks the candidates in ascending order until one
//! meets the voltage-drop limit. If none does, the smallest ampacity-compliant
//! candidate is returned with voltage-drop compliance false.

use tracing::debug;

use crate::conductors::{ConductorSpec, ConductorTable, SizeUnit};
use crate::correction_factors::{soil_thermal_factor, CorrectionFactors, StepLookup, StepTable, SOIL_RESISTIVITY_BASELINE};
use crate::errors::{CalcError, CalcResult};
use crate::result::{AlternativeConductor, CalculationMetadata, CalculationResult, Compliance};
use crate::standards::{ConductorMaterial, Standard, VoltageSystem};
use crate::voltage_drop::{analyze, CircuitRun, DropAnalysis, Impedance};

use super::CircuitParameters;

/// cos φ assumed for AC circuits when the request gives none
pub const DEFAULT_POWER_FACTOR: f64 = 0.85;

/// Table, rating and limits the search runs against
pub(crate) struct SearchProfile<'a> {
    pub standard: Standard,
    pub table: &'a ConductorTable,
    pub temperature_rating: u16,
    pub resistance_multiplier: f64,
    pub voltage_drop_limit: f64,
    pub max_alternatives: usize,
}

/// Electrical demand of the circuit
#[derive(Debug, Clone, Copy)]
pub(crate) struct Demand {
    pub system: VoltageSystem,
    /// Drives voltage drop and loss
    pub load_current: f64,
    /// Drives the ampacity requirement
    pub design_current: f64,
    pub length: f64,
    pub voltage: f64,
    pub power_factor: f64,
}

impl Demand {
    pub fn new(circuit: &CircuitParameters, design_current: f64) -> Self {
        let power_factor = if circuit.system.is_ac() {
            circuit.power_factor.unwrap_or(DEFAULT_POWER_FACTOR)
        } else {
            1.0
        };
        Demand {
            system: circuit.system,
            load_current: circuit.current,
            design_current,
            length: circuit.length,
            voltage: circuit.voltage,
            power_factor,
        }
    }
}

/// Outcome of the conductor search
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sizing {
    pub size: String,
    pub unit: SizeUnit,
    pub base_ampacity: f64,
    pub current_capacity: f64,
    pub required_ampacity: f64,
    pub design_current: f64,
    pub drop: DropAnalysis,
    pub voltage_drop_compliant: bool,
    pub alternatives: Vec<AlternativeConductor>,
}

/// Resistance multiplier for a conductor material
pub(crate) fn resistance_multiplier(material: ConductorMaterial, aluminum: f64) -> f64 {
    match material {
        ConductorMaterial::Copper => 1.0,
        ConductorMaterial::Aluminum => aluminum,
    }
}

/// Tabulated ampacity needed once every factor is applied
pub(crate) fn required_ampacity(design_current: f64, factors: &CorrectionFactors) -> f64 {
    design_current / factors.combined()
}

/// Select the smallest conductor meeting ampacity and, where reachable, the
/// voltage-drop limit
pub(crate) fn search(profile: &SearchProfile<'_>, demand: &Demand, factors: &CorrectionFactors) -> CalcResult<Sizing> {
    let combined = factors.combined();
    let required = required_ampacity(demand.design_current, factors);
    let rating = profile.temperature_rating;

    let run = CircuitRun {
        system: demand.system,
        current: demand.load_current,
        length: demand.length,
        voltage: demand.voltage,
        power_factor: demand.power_factor,
        scale: profile.table.length_scale,
    };

    let evaluated: Vec<(&ConductorSpec, f64, DropAnalysis)> = profile
        .table
        .candidates(rating, required)
        .into_iter()
        .filter_map(|conductor| {
            let ampacity = conductor.ampacity_at(rating)?;
            let impedance = Impedance {
                resistance: conductor.resistance * profile.resistance_multiplier,
                reactance: conductor.reactance,
            };
            Some((conductor, ampacity, analyze(&run, impedance)))
        })
        .collect();

    if evaluated.is_empty() {
        return Err(no_suitable_conductor(profile, required));
    }

    let limit = profile.voltage_drop_limit;
    let (index, voltage_drop_compliant) = match evaluated.iter().position(|(_, _, d)| d.percent <= limit) {
        Some(i) => (i, true),
        // fallback: smallest ampacity-compliant size, flagged non-compliant
        None => (0, false),
    };
    let (selected, base_ampacity, drop) = evaluated[index];

    debug!(
        standard = %profile.standard,
        required_ampacity = required,
        candidates = evaluated.len(),
        size = %selected.designation(),
        voltage_drop_percent = drop.percent,
        voltage_drop_compliant,
        "conductor selected"
    );

    let alternatives = evaluated
        .iter()
        .take(profile.max_alternatives)
        .map(|&(conductor, ampacity, d)| AlternativeConductor {
            size: conductor.size.clone(),
            size_unit: conductor.unit,
            current_capacity: ampacity * combined,
            voltage_drop_percent: d.percent,
            compliant: d.percent <= limit,
            relative_cost: conductor.area_mm2 / selected.area_mm2,
        })
        .collect();

    Ok(Sizing {
        size: selected.size.clone(),
        unit: selected.unit,
        base_ampacity,
        current_capacity: base_ampacity * combined,
        required_ampacity: required,
        design_current: demand.design_current,
        drop,
        voltage_drop_compliant,
        alternatives,
    })
}

fn no_suitable_conductor(profile: &SearchProfile<'_>, required: f64) -> CalcError {
    let largest = profile.table.largest();
    CalcError::NoSuitableConductor {
        standard: profile.standard.identifier().to_string(),
        required_ampacity: required,
        temperature_rating: profile.temperature_rating,
        largest_size: largest.map(|c| c.designation()).unwrap_or_default(),
        largest_ampacity: largest
            .and_then(|c| c.ampacity_at(profile.temperature_rating))
            .unwrap_or(0.0),
    }
}

/// Assumptions and warnings gathered while an engine resolves its inputs
#[derive(Debug, Default)]
pub(crate) struct Notes {
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
}

impl Notes {
    pub fn assume(&mut self, note: impl Into<String>) {
        self.assumptions.push(note.into());
    }

    pub fn warn(&mut self, note: impl Into<String>) {
        self.warnings.push(note.into());
    }

    /// Record the defaults and overrides common to every engine
    pub fn circuit_defaults(&mut self, circuit: &CircuitParameters, ambient_c: f64, count: u32) {
        if circuit.ambient_c.is_none() {
            self.assume(format!("Ambient temperature {ambient_c:.0} °C assumed"));
        }
        if circuit.conductor_count.is_none() {
            self.assume(format!("{count} current-carrying conductor(s) assumed"));
        }
        if let Some(factor) = circuit.grouping_override {
            self.assume(format!("Grouping factor overridden to {factor:.2}"));
        }
        if circuit.system.is_ac() && circuit.power_factor.is_none() {
            self.assume(format!("Power factor {DEFAULT_POWER_FACTOR} assumed"));
        }
    }

    /// Record the soil resistivity assumed for a buried run, or dropped for
    /// one above ground
    pub fn soil(&mut self, buried: bool, resistivity: Option<f64>, method: &str) {
        match (buried, resistivity) {
            (true, None) => self.assume(format!("Soil thermal resistivity {SOIL_RESISTIVITY_BASELINE} K·m/W assumed")),
            (false, Some(_)) => self.assume(format!("Soil thermal resistivity ignored for above-ground method {method}")),
            _ => {}
        }
    }

    /// Warn when the ambient lies beyond the temperature table
    pub fn temperature(&mut self, ambient_c: f64, table: &StepTable, lookup: StepLookup) {
        if lookup.clamped {
            self.warn(format!(
                "Ambient {ambient_c:.0} °C is beyond the {} table (up to {:.0} °C); factor clamped to {:.2}",
                table.name,
                table.max_threshold().unwrap_or(ambient_c),
                lookup.factor
            ));
        }
    }
}

/// Soil factor for a run: buried runs derate above the reference
/// resistivity, everything else takes 1.0
pub fn soil_factor(buried: bool, resistivity: Option<f64>) -> f64 {
    if buried {
        soil_thermal_factor(resistivity.unwrap_or(SOIL_RESISTIVITY_BASELINE))
    } else {
        1.0
    }
}

/// Build the unified result from a completed search
pub(crate) fn assemble(
    sizing: Sizing,
    factors: CorrectionFactors,
    temperature_compliant: bool,
    mut metadata: CalculationMetadata,
) -> CalculationResult {
    if !sizing.voltage_drop_compliant {
        metadata.warnings.push(format!(
            "No conductor meeting the ampacity requirement keeps voltage drop within {:.1}%; smallest size returned at {:.2}%",
            metadata.voltage_drop_limit_percent, sizing.drop.percent
        ));
    }
    if sizing.drop.percent > metadata.maximum_voltage_drop_percent {
        metadata.warnings.push(format!(
            "Voltage drop {:.2}% exceeds the {:.1}% maximum",
            sizing.drop.percent, metadata.maximum_voltage_drop_percent
        ));
    }

    CalculationResult {
        recommended_size: sizing.size,
        size_unit: sizing.unit,
        current_capacity: sizing.current_capacity,
        base_ampacity: sizing.base_ampacity,
        required_ampacity: sizing.required_ampacity,
        design_current: sizing.design_current,
        voltage_drop_percent: sizing.drop.percent,
        voltage_drop_volts: sizing.drop.volts,
        power_loss_w: sizing.drop.power_loss_w,
        efficiency_percent: sizing.drop.efficiency_percent,
        combined_factor: factors.combined(),
        correction_factors: factors,
        compliance: Compliance::new(
            sizing.base_ampacity >= sizing.required_ampacity,
            sizing.voltage_drop_compliant,
            temperature_compliant,
            true,
        ),
        metadata,
        alternatives: sizing.alternatives,
        dc_analysis: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conductors::{iec, nec};

    fn circuit(current: f64, length: f64) -> CircuitParameters {
        CircuitParameters {
            current,
            length,
            voltage: 120.0,
            system: VoltageSystem::SinglePhase,
            material: ConductorMaterial::Copper,
            ambient_c: None,
            conductor_count: None,
            power_factor: Some(1.0),
            grouping_override: None,
            temperature_rating: None,
        }
    }

    fn nec_profile(limit: f64) -> SearchProfile<'static> {
        SearchProfile {
            standard: Standard::Nec,
            table: nec::table(),
            temperature_rating: 75,
            resistance_multiplier: 1.0,
            voltage_drop_limit: limit,
            max_alternatives: 5,
        }
    }

    #[test]
    fn test_smallest_ampacity_compliant_when_drop_is_small() {
        let demand = Demand::new(&circuit(15.0, 10.0), 15.0);
        let sizing = search(&nec_profile(3.0), &demand, &CorrectionFactors::default()).unwrap();
        assert_eq!(sizing.size, "14");
        assert!(sizing.voltage_drop_compliant);
        assert_eq!(sizing.alternatives.len(), 5);
        assert!((sizing.alternatives[0].relative_cost - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_upsizes_for_voltage_drop() {
        // 14 AWG: 2·15·110·3.1/1000 = 10.23 V (8.5 %), 10 AWG still 3.3 %
        let demand = Demand::new(&circuit(15.0, 110.0), 15.0);
        let sizing = search(&nec_profile(3.0), &demand, &CorrectionFactors::default()).unwrap();
        assert_eq!(sizing.size, "8");
        assert!(sizing.drop.percent <= 3.0);
        assert!(!sizing.alternatives[0].compliant);
        assert!(sizing.alternatives[0].relative_cost < 1.0);
    }

    #[test]
    fn test_unreachable_limit_returns_smallest() {
        let demand = Demand::new(&circuit(15.0, 100.0), 15.0);
        let sizing = search(&nec_profile(0.001), &demand, &CorrectionFactors::default()).unwrap();
        assert_eq!(sizing.size, "14");
        assert!(!sizing.voltage_drop_compliant);
    }

    #[test]
    fn test_factors_raise_required_ampacity() {
        let factors = CorrectionFactors {
            temperature: 0.5,
            ..CorrectionFactors::default()
        };
        let demand = Demand::new(&circuit(20.0, 10.0), 20.0);
        let sizing = search(&nec_profile(3.0), &demand, &factors).unwrap();
        assert!((sizing.required_ampacity - 40.0).abs() < 1e-9);
        assert_eq!(sizing.size, "8");
        assert!((sizing.current_capacity - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_suitable_conductor() {
        let demand = Demand::new(&circuit(800.0, 10.0), 800.0);
        let err = search(&nec_profile(3.0), &demand, &CorrectionFactors::default()).unwrap_err();
        match err {
            CalcError::NoSuitableConductor { largest_size, largest_ampacity, .. } => {
                assert_eq!(largest_size, "1000 kcmil");
                assert_eq!(largest_ampacity, 545.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_aluminum_multiplier_raises_drop() {
        let demand = Demand::new(&circuit(16.0, 25.0), 16.0);
        let mut profile = SearchProfile {
            standard: Standard::Iec,
            table: iec::table(),
            temperature_rating: 70,
            resistance_multiplier: 1.0,
            voltage_drop_limit: 100.0,
            max_alternatives: 5,
        };
        let copper = search(&profile, &demand, &CorrectionFactors::default()).unwrap();
        profile.resistance_multiplier = 1.61;
        let aluminum = search(&profile, &demand, &CorrectionFactors::default()).unwrap();
        assert_eq!(copper.size, aluminum.size);
        assert!(aluminum.drop.percent > copper.drop.percent);
    }

    #[test]
    fn test_dc_demand_ignores_power_factor() {
        let mut dc = circuit(10.0, 10.0);
        dc.system = VoltageSystem::Dc;
        dc.power_factor = Some(0.5);
        assert_eq!(Demand::new(&dc, 10.0).power_factor, 1.0);

        let mut ac = circuit(10.0, 10.0);
        ac.power_factor = None;
        assert_eq!(Demand::new(&ac, 10.0).power_factor, DEFAULT_POWER_FACTOR);
    }
}
