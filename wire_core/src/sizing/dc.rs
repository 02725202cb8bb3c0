//! # DC Application Sizing
//!
//! Low-voltage DC circuits for four application profiles. The shared search
//! runs with no reactance term; each profile contributes its own default
//! insulation rating, supported voltage systems and voltage-drop limits, and
//! solar and telecom add an efficiency target on top.
//!
//! ## Profiles
//!
//! | Application | Rating | Voltages (V)                  | VD general / critical / non-critical | Efficiency |
//! |-------------|--------|-------------------------------|---------------------------|------------|
//! | Automotive  | 105 °C | 12, 24, 48                    | 2 / 1 / 3 %               | -          |
//! | Marine      | 105 °C | 12, 24, 32, 48                | 3 / 3 / 10 % (ABYC E-11)  | -          |
//! | Solar       | 90 °C  | 12, 24, 48, 96, 600, 1000, 1500 | 2 / 1 / 3 %             | 98 %       |
//! | Telecom     | 75 °C  | 24, 48                        | 1 / 0.5 / 2 %             | 99 %       |
//!
//! Limits come from [`DcLimits`] and may be replaced per request by a
//! custom limit. PV source circuits take the 125 % continuous multiplier
//! (NEC 690.8(A)).
//!
//! The engine returns a [`DcSizingOutcome`], which converts into the shared
//! [`CalculationResult`] with the [`DcAnalysis`] attached.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conductors::dc as dc_table;
use crate::correction_factors::{dc_temperature, CorrectionFactors, NEC_GROUPING};
use crate::errors::{CalcError, CalcResult};
use crate::installation::DcMethod;
use crate::result::{CalculationMetadata, CalculationResult, DcAnalysis, SafetyFactors};
use crate::settings::DcLimits;
use crate::standards::Standard;

use super::pipeline::{self, Demand, Notes, SearchProfile, Sizing};
use super::CircuitParameters;

/// Aluminum resistance relative to copper
pub const ALUMINUM_RESISTANCE_MULTIPLIER: f64 = 1.64;

pub const DEFAULT_AMBIENT_C: f64 = 30.0;

/// Supply and return
pub const DEFAULT_CONDUCTOR_COUNT: u32 = 2;

/// PV source-circuit multiplier
pub const SOLAR_CONTINUOUS_MULTIPLIER: f64 = 1.25;

/// Relative departure of the supply from the tag's nominal that draws a warning
pub const TAG_MISMATCH_TOLERANCE: f64 = 0.25;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

// ============================================================================
// Application profiles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DcApplication {
    Automotive,
    Marine,
    Solar,
    Telecom,
}

impl DcApplication {
    pub const ALL: [DcApplication; 4] = [
        DcApplication::Automotive,
        DcApplication::Marine,
        DcApplication::Solar,
        DcApplication::Telecom,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DcApplication::Automotive => "automotive",
            DcApplication::Marine => "marine",
            DcApplication::Solar => "solar",
            DcApplication::Telecom => "telecom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DcApplication::Automotive => "Automotive",
            DcApplication::Marine => "Marine",
            DcApplication::Solar => "Solar PV",
            DcApplication::Telecom => "Telecom",
        }
    }

    /// Insulation rating assumed when the request gives none (°C)
    pub fn default_rating(&self) -> u16 {
        match self {
            DcApplication::Automotive | DcApplication::Marine => 105,
            DcApplication::Solar => 90,
            DcApplication::Telecom => 75,
        }
    }

    pub fn supported_voltages(&self) -> &'static [DcVoltage] {
        use DcVoltage::*;
        match self {
            DcApplication::Automotive => &[V12, V24, V48],
            DcApplication::Marine => &[V12, V24, V32, V48],
            DcApplication::Solar => &[V12, V24, V48, V96, V600, V1000, V1500],
            DcApplication::Telecom => &[V24, V48],
        }
    }

    pub fn supports(&self, voltage: DcVoltage) -> bool {
        self.supported_voltages().contains(&voltage)
    }

    /// Minimum delivered efficiency (%)
    pub fn efficiency_target(&self) -> Option<f64> {
        match self {
            DcApplication::Solar => Some(98.0),
            DcApplication::Telecom => Some(99.0),
            DcApplication::Automotive | DcApplication::Marine => None,
        }
    }

    pub fn continuous_multiplier(&self) -> f64 {
        match self {
            DcApplication::Solar => SOLAR_CONTINUOUS_MULTIPLIER,
            _ => 1.0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "automotive" | "vehicle" | "auto" => Some(DcApplication::Automotive),
            "marine" | "boat" => Some(DcApplication::Marine),
            "solar" | "pv" | "photovoltaic" => Some(DcApplication::Solar),
            "telecom" | "telecommunications" => Some(DcApplication::Telecom),
            _ => None,
        }
    }
}

impl fmt::Display for DcApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Nominal DC voltage-system tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DcVoltage {
    #[serde(rename = "12V")]
    V12,
    #[serde(rename = "24V")]
    V24,
    #[serde(rename = "32V")]
    V32,
    #[serde(rename = "48V")]
    V48,
    #[serde(rename = "96V")]
    V96,
    #[serde(rename = "600V")]
    V600,
    #[serde(rename = "1000V")]
    V1000,
    #[serde(rename = "1500V")]
    V1500,
}

impl DcVoltage {
    pub const ALL: [DcVoltage; 8] = [
        DcVoltage::V12,
        DcVoltage::V24,
        DcVoltage::V32,
        DcVoltage::V48,
        DcVoltage::V96,
        DcVoltage::V600,
        DcVoltage::V1000,
        DcVoltage::V1500,
    ];

    pub fn nominal(&self) -> f64 {
        match self {
            DcVoltage::V12 => 12.0,
            DcVoltage::V24 => 24.0,
            DcVoltage::V32 => 32.0,
            DcVoltage::V48 => 48.0,
            DcVoltage::V96 => 96.0,
            DcVoltage::V600 => 600.0,
            DcVoltage::V1000 => 1000.0,
            DcVoltage::V1500 => 1500.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DcVoltage::V12 => "12V",
            DcVoltage::V24 => "24V",
            DcVoltage::V32 => "32V",
            DcVoltage::V48 => "48V",
            DcVoltage::V96 => "96V",
            DcVoltage::V600 => "600V",
            DcVoltage::V1000 => "1000V",
            DcVoltage::V1500 => "1500V",
        }
    }

    /// Accepts "12V", "12 v", "12VDC" or a bare "12"
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let digits = lower.trim_end_matches("dc").trim_end_matches('v').trim();
        let volts: f64 = digits.parse().ok()?;
        DcVoltage::ALL.into_iter().find(|v| v.nominal() == volts)
    }

    /// Supply departs from the nominal by more than [`TAG_MISMATCH_TOLERANCE`]
    pub fn mismatches(&self, supply_voltage: f64) -> bool {
        ((supply_voltage - self.nominal()) / self.nominal()).abs() > TAG_MISMATCH_TOLERANCE
    }
}

impl fmt::Display for DcVoltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Criticality of the load, selecting the application's voltage-drop limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DcLoadType {
    #[default]
    General,
    /// Navigation lights, bilge pumps, radio
    Critical,
    /// Cabin lighting and similar
    NonCritical,
}

impl DcLoadType {
    pub const ALL: [DcLoadType; 3] = [DcLoadType::General, DcLoadType::Critical, DcLoadType::NonCritical];

    pub fn code(&self) -> &'static str {
        match self {
            DcLoadType::General => "general",
            DcLoadType::Critical => "critical",
            DcLoadType::NonCritical => "non_critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "general" | "normal" => Some(DcLoadType::General),
            "critical" => Some(DcLoadType::Critical),
            "non_critical" | "noncritical" => Some(DcLoadType::NonCritical),
            _ => None,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Typed DC engine input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcInput {
    pub circuit: CircuitParameters,
    pub method: DcMethod,
    pub application: DcApplication,
    pub voltage_system: DcVoltage,
    pub load_type: DcLoadType,
    pub custom_voltage_drop_limit: Option<f64>,
    /// Soil thermal resistivity (K·m/W), direct burial only
    pub soil_thermal_resistivity: Option<f64>,
}

/// What the DC engine produces before mapping into [`CalculationResult`]
#[derive(Debug, Clone, PartialEq)]
pub struct DcSizingOutcome {
    sizing: Sizing,
    factors: CorrectionFactors,
    temperature_compliant: bool,
    metadata: CalculationMetadata,
    analysis: DcAnalysis,
}

impl DcSizingOutcome {
    pub fn analysis(&self) -> &DcAnalysis {
        &self.analysis
    }
}

impl From<DcSizingOutcome> for CalculationResult {
    fn from(outcome: DcSizingOutcome) -> Self {
        let meets_target = outcome.analysis.meets_efficiency_target;
        let mut result = pipeline::assemble(
            outcome.sizing,
            outcome.factors,
            outcome.temperature_compliant,
            outcome.metadata,
        );
        result.compliance.overall &= meets_target;
        result.dc_analysis = Some(outcome.analysis);
        result
    }
}

/// Voltage-drop limit for the request: custom, else the application's limit
/// for the load type
pub fn voltage_drop_limit(input: &DcInput, limits: &DcLimits) -> f64 {
    input
        .custom_voltage_drop_limit
        .unwrap_or_else(|| limits.for_application(input.application).for_load(input.load_type))
}

/// Size a DC conductor for an application profile
pub fn size(input: &DcInput, limits: &DcLimits, max_alternatives: usize) -> CalcResult<DcSizingOutcome> {
    let circuit = &input.circuit;
    let application = input.application;
    let rating = circuit.temperature_rating.unwrap_or(application.default_rating());
    let temperature_table = dc_temperature(rating).ok_or_else(|| {
        CalcError::invalid_input(
            "temperature_rating",
            rating.to_string(),
            "DC table offers 60, 75, 90 and 105 °C",
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

    let limit = voltage_drop_limit(input, limits);
    let maximum = limit.max(limits.for_application(application).non_critical);
    let multiplier = application.continuous_multiplier();
    let resistance_multiplier = pipeline::resistance_multiplier(circuit.material, ALUMINUM_RESISTANCE_MULTIPLIER);

    let profile = SearchProfile {
        standard: Standard::Dc,
        table: dc_table::table(),
        temperature_rating: rating,
        resistance_multiplier,
        voltage_drop_limit: limit,
        max_alternatives,
    };
    let demand = Demand::new(circuit, circuit.current * multiplier);
    let sizing = pipeline::search(&profile, &demand, &factors)?;

    let target = application.efficiency_target();
    let efficiency = sizing.drop.efficiency_percent;
    let meets_efficiency_target = target.map_or(true, |t| efficiency >= t);

    let mut notes = Notes::default();
    notes.circuit_defaults(circuit, ambient, count);
    notes.soil(input.method.is_buried(), input.soil_thermal_resistivity, input.method.code());
    if circuit.temperature_rating.is_none() {
        notes.assume(format!("{rating} °C insulation assumed for {} wiring", application.code()));
    }
    if input.custom_voltage_drop_limit.is_some() {
        notes.assume(format!("Custom voltage-drop limit {limit}% replaces the application limit"));
    }
    if multiplier > 1.0 {
        notes.assume("PV source circuit sized at 125 % of load current");
    }
    if circuit.material.is_aluminum() {
        notes.assume(format!("Aluminum resistance taken as {ALUMINUM_RESISTANCE_MULTIPLIER} × copper"));
    }
    notes.temperature(ambient, &temperature_table, temperature);
    if input.voltage_system.mismatches(circuit.voltage) {
        notes.warn(format!(
            "Supply {:.1} V departs more than {:.0}% from the {} system nominal",
            circuit.voltage,
            TAG_MISMATCH_TOLERANCE * 100.0,
            input.voltage_system
        ));
    }
    if let (Some(t), false) = (target, meets_efficiency_target) {
        notes.warn(format!(
            "Efficiency {efficiency:.2}% misses the {} target of {t:.0}%",
            application.code()
        ));
    }

    let analysis = DcAnalysis {
        application,
        voltage_system: input.voltage_system,
        load_type: input.load_type,
        nominal_voltage: input.voltage_system.nominal(),
        effective_voltage: circuit.voltage - sizing.drop.volts,
        temperature_derating: temperature.factor,
        efficiency_target_percent: target,
        meets_efficiency_target,
    };

    let metadata = CalculationMetadata {
        standard: Standard::Dc,
        method: format!(
            "{} profile, NEC Chapter 9 Table 8 DC resistance, {rating} °C ampacity, VD = 2·I·L·R",
            application.display_name()
        ),
        installation_method: input.method.display_name().to_string(),
        conductor_material: circuit.material,
        voltage_system: circuit.system,
        temperature_rating: rating,
        ambient_temperature: ambient,
        conductor_count: count,
        voltage_drop_limit_percent: limit,
        maximum_voltage_drop_percent: maximum,
        safety_factors: SafetyFactors {
            continuous_load_multiplier: multiplier,
            continuous_multiplier_applied: multiplier > 1.0,
            resistance_multiplier,
        },
        assumptions: notes.assumptions,
        warnings: notes.warnings,
    };

    Ok(DcSizingOutcome {
        sizing,
        factors,
        temperature_compliant: !temperature.clamped,
        metadata,
        analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::{ConductorMaterial, VoltageSystem};

    fn input(application: DcApplication, voltage_system: DcVoltage, current: f64, length: f64) -> DcInput {
        DcInput {
            circuit: CircuitParameters {
                current,
                length,
                voltage: voltage_system.nominal(),
                system: VoltageSystem::Dc,
                material: ConductorMaterial::Copper,
                ambient_c: None,
                conductor_count: None,
                power_factor: None,
                grouping_override: None,
                temperature_rating: None,
            },
            method: DcMethod::FreeAir,
            application,
            voltage_system,
            load_type: DcLoadType::General,
            custom_voltage_drop_limit: None,
            soil_thermal_resistivity: None,
        }
    }

    fn run(input: &DcInput) -> CalculationResult {
        CalculationResult::from(size(input, &DcLimits::default(), 5).unwrap())
    }

    #[test]
    fn test_outcome_carries_analysis_into_result() {
        let outcome = size(&input(DcApplication::Marine, DcVoltage::V24, 10.0, 10.0), &DcLimits::default(), 5).unwrap();
        let analysis = outcome.analysis().clone();
        assert_eq!(analysis.nominal_voltage, 24.0);
        assert!(analysis.efficiency_target_percent.is_none());
        let result = CalculationResult::from(outcome);
        assert_eq!(result.dc_analysis, Some(analysis));
        assert_eq!(result.metadata.maximum_voltage_drop_percent, 10.0);
    }

    #[test]
    fn test_buried_array_run_derates_for_soil() {
        let free_air = run(&input(DcApplication::Solar, DcVoltage::V48, 8.0, 30.0));
        let mut buried = input(DcApplication::Solar, DcVoltage::V48, 8.0, 30.0);
        buried.method = DcMethod::DirectBurial;
        buried.soil_thermal_resistivity = Some(5.0);
        let result = run(&buried);
        assert!((result.correction_factors.thermal_resistivity - 0.5).abs() < 1e-12);
        assert!((result.required_ampacity - 2.0 * free_air.required_ampacity).abs() < 1e-9);
        assert_eq!(result.metadata.installation_method, "Direct burial");
    }

    #[test]
    fn test_engine_bay_circuit() {
        let mut hot = input(DcApplication::Automotive, DcVoltage::V12, 25.0, 8.0);
        hot.circuit.ambient_c = Some(80.0);
        let result = run(&hot);
        // 25 / 0.58 = 43.1 A; 10 and 8 AWG exceed 2 %
        assert_eq!(result.recommended_size, "6");
        assert!((result.required_ampacity - 43.103).abs() < 0.01);
        assert!(result.voltage_drop_percent <= 2.0);
        assert!(result.efficiency_percent > 95.0);
        let dc = result.dc_analysis.unwrap();
        assert_eq!(dc.temperature_derating, 0.58);
        assert!((dc.effective_voltage - (12.0 - result.voltage_drop_volts)).abs() < 1e-12);
    }

    #[test]
    fn test_telecom_is_strictest() {
        let limits = DcLimits::default();
        let telecom = voltage_drop_limit(&input(DcApplication::Telecom, DcVoltage::V48, 10.0, 10.0), &limits);
        for application in DcApplication::ALL {
            let other = voltage_drop_limit(&input(application, DcVoltage::V24, 10.0, 10.0), &limits);
            assert!(telecom <= other);
        }
    }

    #[test]
    fn test_marine_load_types() {
        let limits = DcLimits::default();
        let mut marine = input(DcApplication::Marine, DcVoltage::V12, 10.0, 10.0);
        marine.load_type = DcLoadType::Critical;
        assert_eq!(voltage_drop_limit(&marine, &limits), 3.0);
        marine.load_type = DcLoadType::NonCritical;
        assert_eq!(voltage_drop_limit(&marine, &limits), 10.0);
        marine.custom_voltage_drop_limit = Some(5.0);
        assert_eq!(voltage_drop_limit(&marine, &limits), 5.0);
    }

    #[test]
    fn test_solar_multiplier_and_target() {
        let result = run(&input(DcApplication::Solar, DcVoltage::V48, 8.0, 30.0));
        assert!((result.design_current - 10.0).abs() < 1e-12);
        assert!(result.metadata.safety_factors.continuous_multiplier_applied);
        assert_eq!(result.metadata.temperature_rating, 90);
        let dc = result.dc_analysis.unwrap();
        assert_eq!(dc.efficiency_target_percent, Some(98.0));
        assert!(dc.meets_efficiency_target);
    }

    #[test]
    fn test_missed_efficiency_fails_overall() {
        let mut loose = input(DcApplication::Telecom, DcVoltage::V48, 10.0, 50.0);
        loose.custom_voltage_drop_limit = Some(3.0);
        let result = run(&loose);
        // 12 AWG drops 4.0 %, 10 AWG 2.5 %: inside 3 % but short of 99 % efficiency
        assert_eq!(result.recommended_size, "10");
        assert!(result.compliance.voltage_drop);
        assert!(!result.dc_analysis.as_ref().unwrap().meets_efficiency_target);
        assert!(!result.compliance.overall);
        assert!(result.metadata.warnings.iter().any(|w| w.contains("target")));
    }

    #[test]
    fn test_tag_mismatch_warning() {
        let mut odd = input(DcApplication::Marine, DcVoltage::V12, 5.0, 5.0);
        odd.circuit.voltage = 24.0;
        let result = run(&odd);
        assert!(result.metadata.warnings.iter().any(|w| w.contains("12V")));

        odd.circuit.voltage = 14.4;
        assert!(run(&odd).metadata.warnings.is_empty());
    }

    #[test]
    fn test_voltage_tags() {
        assert_eq!(DcVoltage::parse("12V"), Some(DcVoltage::V12));
        assert_eq!(DcVoltage::parse("48 vdc"), Some(DcVoltage::V48));
        assert_eq!(DcVoltage::parse("1500"), Some(DcVoltage::V1500));
        assert_eq!(DcVoltage::parse("36V"), None);
        assert!(DcApplication::Marine.supports(DcVoltage::V32));
        assert!(!DcApplication::Telecom.supports(DcVoltage::V12));
        assert_eq!(serde_json::to_string(&DcVoltage::V24).unwrap(), "\"24V\"");
    }
}
