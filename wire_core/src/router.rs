//! # Calculation Router
//!
//! Entry point of the engine. A [`CalculationInput`] is checked in one pass
//! and every violated constraint is collected before any engine runs; the
//! request is then converted into a typed [`SizingRequest`] and dispatched
//! to exactly one engine.
//!
//! ## Order of checks
//!
//! 1. The standard identifier; an unknown one fails immediately with
//!    [`CalcError::UnsupportedStandard`]
//! 2. Everything else, aggregated into one [`CalcError::Validation`]
//!
//! ## Domains
//!
//! | Field               | NEC         | IEC / BS 7671 | DC          |
//! |---------------------|-------------|---------------|-------------|
//! | voltage (V)         | ≤ 1000      | ≤ 1000        | ≤ 1500      |
//! | ambient (°C)        | −40 … 85    | −40 … 80      | −40 … 100   |
//! | current (A)         | ≤ 25 000    | ≤ 25 000      | ≤ 25 000    |
//! | length (ft / m)     | ≤ 10 000    | ≤ 10 000      | ≤ 10 000    |
//! | conductor count     | 1 … 100     | 1 … 100       | 1 … 100     |
//!
//! ## Example
//!
//! ```rust
//! use wire_core::input::CalculationInput;
//! use wire_core::router::Router;
//!
//! let input = CalculationInput::new("NEC", 15.0, 50.0, 120.0)
//!     .with_voltage_system("single_phase")
//!     .with_installation_method("raceway")
//!     .with_material("copper");
//!
//! let result = Router::default().size(&input).unwrap();
//! assert_eq!(result.designation(), "12 AWG");
//! ```

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::conductors;
use crate::errors::{CalcError, CalcResult, ValidationIssue};
use crate::input::CalculationInput;
use crate::installation::{DcMethod, NecMethod, ReferenceMethod};
use crate::result::CalculationResult;
use crate::settings::SizingSettings;
use crate::sizing::dc::{DcApplication, DcLoadType, DcVoltage};
use crate::sizing::{CircuitParameters, DcInput, MetricInput, NecInput, SizingRequest};
use crate::standards::{ConductorMaterial, Standard, VoltageSystem};

/// Largest load current accepted (A)
pub const MAX_CURRENT_A: f64 = 25_000.0;

/// Longest one-way run accepted, in the standard's length unit
pub const MAX_LENGTH: f64 = 10_000.0;

pub const MAX_CONDUCTOR_COUNT: u32 = 100;

/// Accepted soil thermal resistivity (K·m/W)
pub const SOIL_RESISTIVITY_RANGE: RangeInclusive<f64> = 0.3..=10.0;

/// Supply and ambient limits of one standard
#[derive(Debug, Clone, PartialEq)]
pub struct StandardDomain {
    pub max_voltage: f64,
    pub ambient_c: RangeInclusive<f64>,
}

impl StandardDomain {
    pub fn of(standard: Standard) -> Self {
        match standard {
            Standard::Nec => StandardDomain {
                max_voltage: 1000.0,
                ambient_c: -40.0..=85.0,
            },
            Standard::Iec | Standard::Bs7671 => StandardDomain {
                max_voltage: 1000.0,
                ambient_c: -40.0..=80.0,
            },
            Standard::Dc => StandardDomain {
                max_voltage: 1500.0,
                ambient_c: -40.0..=100.0,
            },
        }
    }
}

/// Validates requests and dispatches them with one set of limits
#[derive(Debug, Clone, Default)]
pub struct Router {
    settings: SizingSettings,
}

impl Router {
    pub fn new(settings: SizingSettings) -> Self {
        Router { settings }
    }

    pub fn settings(&self) -> &SizingSettings {
        &self.settings
    }

    /// Check a request and convert it into a typed engine input
    pub fn validate(&self, input: &CalculationInput) -> CalcResult<SizingRequest> {
        validate(input)
    }

    /// Validate, dispatch and return the unified result.
    ///
    /// # Errors
    ///
    /// - `UnsupportedStandard` for an unknown identifier
    /// - `Validation` listing every violated constraint
    /// - `NoSuitableConductor` when no table entry meets the required ampacity
    pub fn size(&self, input: &CalculationInput) -> CalcResult<CalculationResult> {
        let request = validate(input).inspect_err(|e| debug!(error = %e, "sizing request rejected"))?;
        let result = request.size(&self.settings)?;
        if result.has_warnings() {
            warn!(
                standard = %request.standard(),
                current = request.circuit().current,
                size = %result.designation(),
                warnings = ?result.metadata.warnings,
                "sizing result carries warnings"
            );
        }
        Ok(result)
    }
}

/// Size with the default settings
pub fn size(input: &CalculationInput) -> CalcResult<CalculationResult> {
    Router::default().size(input)
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Default)]
struct Issues(Vec<ValidationIssue>);

impl Issues {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(ValidationIssue::new(field, message));
    }

    fn positive_at_most(&mut self, field: &str, label: &str, value: f64, max: f64, unit: &str) {
        if value.is_nan() || value <= 0.0 {
            self.push(field, format!("{label} must be positive"));
        } else if value > max {
            self.push(field, format!("{label} {value} {unit} exceeds the limit of {max} {unit}"));
        }
    }

    fn required<T>(
        &mut self,
        field: &str,
        value: Option<&str>,
        parse: impl Fn(&str) -> Option<T>,
        expected: &str,
    ) -> Option<T> {
        match value {
            None => {
                self.push(field, "Required field is missing");
                None
            }
            Some(raw) => {
                let parsed = parse(raw);
                if parsed.is_none() {
                    self.push(field, format!("'{raw}' is not recognized (expected: {expected})"));
                }
                parsed
            }
        }
    }

    fn fraction(&mut self, field: &str, label: &str, value: Option<f64>) {
        if let Some(v) = value {
            if v.is_nan() || v <= 0.0 || v > 1.0 {
                self.push(field, format!("{label} {v} must be greater than 0 and at most 1"));
            }
        }
    }
}

enum Method {
    Nec(NecMethod),
    Reference(ReferenceMethod),
    Dc(DcMethod),
}

fn codes<T: Copy>(all: &[T], code: impl Fn(T) -> &'static str) -> String {
    all.iter().map(|&m| code(m)).collect::<Vec<_>>().join(", ")
}

fn parse_method(standard: Standard, raw: Option<&str>, issues: &mut Issues) -> Option<Method> {
    const FIELD: &str = "installation_method";
    match standard {
        Standard::Nec => issues
            .required(FIELD, raw, NecMethod::parse, &codes(&NecMethod::ALL, |m| m.code()))
            .map(Method::Nec),
        Standard::Iec | Standard::Bs7671 => issues
            .required(FIELD, raw, ReferenceMethod::parse, &codes(&ReferenceMethod::ALL, |m| m.code()))
            .map(Method::Reference),
        Standard::Dc => issues
            .required(FIELD, raw, DcMethod::parse, &codes(&DcMethod::ALL, |m| m.code()))
            .map(Method::Dc),
    }
}

fn parse_dc_profile(input: &CalculationInput, issues: &mut Issues) -> Option<(DcApplication, DcVoltage, DcLoadType)> {
    let application = issues.required(
        "application_type",
        input.application_type.as_deref(),
        DcApplication::parse,
        &codes(&DcApplication::ALL, |a| a.code()),
    );
    let tag = issues.required(
        "dc_voltage_system",
        input.dc_voltage_system.as_deref(),
        DcVoltage::parse,
        &codes(&DcVoltage::ALL, |v| v.label()),
    );
    let load_type = match input.load_type.as_deref() {
        None => Some(DcLoadType::default()),
        raw => issues.required("load_type", raw, DcLoadType::parse, &codes(&DcLoadType::ALL, |l| l.code())),
    };

    if let Some(limit) = input.custom_voltage_drop_limit {
        if limit.is_nan() || limit <= 0.0 || limit >= 100.0 {
            issues.push(
                "custom_voltage_drop_limit",
                format!("Custom voltage-drop limit {limit}% must be between 0 and 100"),
            );
        }
    }

    if let (Some(application), Some(tag)) = (application, tag) {
        if !application.supports(tag) {
            issues.push(
                "dc_voltage_system",
                format!(
                    "{tag} is not a {} voltage system (supported: {})",
                    application.code(),
                    codes(application.supported_voltages(), |v| v.label())
                ),
            );
        }
    }

    Some((application?, tag?, load_type?))
}

fn missing(field: &str) -> CalcError {
    CalcError::validation(vec![ValidationIssue::new(field, "Required field is missing")])
}

/// Check a request against common and standard-specific constraints
pub fn validate(input: &CalculationInput) -> CalcResult<SizingRequest> {
    let standard: Standard = input.standard.parse()?;
    let domain = StandardDomain::of(standard);
    let mut issues = Issues::default();

    issues.positive_at_most("current", "Current", input.current, MAX_CURRENT_A, "A");
    issues.positive_at_most(
        "length",
        "Length",
        input.length,
        MAX_LENGTH,
        standard.length_unit().symbol(),
    );
    issues.positive_at_most("voltage", "Voltage", input.voltage, domain.max_voltage, "V");

    let system = issues.required(
        "voltage_system",
        input.voltage_system.as_deref(),
        VoltageSystem::parse,
        &codes(&VoltageSystem::ALL, |s| s.code()),
    );
    match system {
        Some(VoltageSystem::Dc) if !standard.is_dc() => {
            issues.push("voltage_system", format!("{standard} sizes AC circuits only"));
        }
        Some(s) if s.is_ac() && standard.is_dc() => {
            issues.push("voltage_system", "DC applications require the dc voltage system");
        }
        _ => {}
    }

    let material = issues.required(
        "conductor_material",
        input.conductor_material.as_deref(),
        ConductorMaterial::parse,
        &codes(&ConductorMaterial::ALL, |m| m.code()),
    );
    let method = parse_method(standard, input.installation_method.as_deref(), &mut issues);

    if let Some(ambient) = input.ambient_temperature {
        if !domain.ambient_c.contains(&ambient) {
            issues.push(
                "ambient_temperature",
                format!(
                    "Ambient {ambient} °C is outside the {standard} range of {} to {} °C",
                    domain.ambient_c.start(),
                    domain.ambient_c.end()
                ),
            );
        }
    }
    if let Some(count) = input.conductor_count {
        if !(1..=MAX_CONDUCTOR_COUNT).contains(&count) {
            issues.push(
                "conductor_count",
                format!("Conductor count {count} must be between 1 and {MAX_CONDUCTOR_COUNT}"),
            );
        }
    }
    issues.fraction("power_factor", "Power factor", input.power_factor);
    issues.fraction("grouping_factor_override", "Grouping factor", input.grouping_factor_override);
    if let Some(resistivity) = input.soil_thermal_resistivity {
        if !SOIL_RESISTIVITY_RANGE.contains(&resistivity) {
            issues.push(
                "soil_thermal_resistivity",
                format!(
                    "Soil thermal resistivity {resistivity} K·m/W is outside {} to {} K·m/W",
                    SOIL_RESISTIVITY_RANGE.start(),
                    SOIL_RESISTIVITY_RANGE.end()
                ),
            );
        }
    }
    if let Some(rating) = input.temperature_rating {
        let table = conductors::table_for(standard);
        if !table.supports_rating(rating) {
            let offered = table.ratings.iter().map(u16::to_string).collect::<Vec<_>>().join(", ");
            issues.push(
                "temperature_rating",
                format!("{rating} °C is not offered by {standard} (available: {offered} °C)"),
            );
        }
    }

    let dc_profile = if standard.is_dc() {
        parse_dc_profile(input, &mut issues)
    } else {
        None
    };

    if !issues.0.is_empty() {
        return Err(CalcError::validation(issues.0));
    }

    let circuit = CircuitParameters {
        current: input.current,
        length: input.length,
        voltage: input.voltage,
        system: system.ok_or_else(|| missing("voltage_system"))?,
        material: material.ok_or_else(|| missing("conductor_material"))?,
        ambient_c: input.ambient_temperature,
        conductor_count: input.conductor_count,
        power_factor: input.power_factor,
        grouping_override: input.grouping_factor_override,
        temperature_rating: input.temperature_rating,
    };

    let request = match method.ok_or_else(|| missing("installation_method"))? {
        Method::Nec(method) => SizingRequest::Nec(NecInput {
            circuit,
            method,
            include_continuous_multiplier: input.include_continuous_multiplier.unwrap_or(true),
            soil_thermal_resistivity: input.soil_thermal_resistivity,
        }),
        Method::Reference(method) => {
            let metric = MetricInput {
                circuit,
                method,
                soil_thermal_resistivity: input.soil_thermal_resistivity,
            };
            if standard == Standard::Bs7671 {
                SizingRequest::Bs7671(metric)
            } else {
                SizingRequest::Iec(metric)
            }
        }
        Method::Dc(method) => {
            let (application, voltage_system, load_type) = dc_profile.ok_or_else(|| missing("application_type"))?;
            SizingRequest::Dc(DcInput {
                circuit,
                method,
                application,
                voltage_system,
                load_type,
                custom_voltage_drop_limit: input.custom_voltage_drop_limit,
                soil_thermal_resistivity: input.soil_thermal_resistivity,
            })
        }
    };

    debug!(standard = %standard, "sizing request validated");
    Ok(request)
}
