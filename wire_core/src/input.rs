//! # Sizing Request
//!
//! [`CalculationInput`] is the loosely typed request every caller hands to
//! the router. Categorical fields are plain strings and most fields are
//! optional, so a request can be deserialized from whatever JSON a form or
//! script produces. The router validates it in one pass and converts it into
//! the typed, per-standard engine inputs in [`crate::sizing`].
//!
//! ## Example
//!
//! ```rust
//! use wire_core::input::CalculationInput;
//!
//! let input = CalculationInput::new("NEC", 15.0, 50.0, 120.0)
//!     .with_voltage_system("single_phase")
//!     .with_installation_method("raceway")
//!     .with_material("copper")
//!     .with_temperature_rating(75);
//!
//! let json = serde_json::to_string(&input).unwrap();
//! assert!(json.contains("\"standard\":\"NEC\""));
//! ```

use serde::{Deserialize, Serialize};

/// A conductor sizing request.
///
/// Lengths are one-way, in feet for NEC/DC and metres for IEC/BS 7671.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculationInput {
    /// Standard identifier ("NEC", "IEC", "BS7671", "DC")
    pub standard: String,

    /// Load current (A)
    pub current: f64,

    /// One-way circuit length (ft or m, per standard)
    pub length: f64,

    /// Supply voltage (V); line-to-line for three-phase
    pub voltage: f64,

    /// "single_phase", "three_phase" or "dc"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_system: Option<String>,

    /// Installation method code from the standard's enumeration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_method: Option<String>,

    /// "copper" or "aluminum"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conductor_material: Option<String>,

    /// Ambient temperature (°C); ground temperature for buried methods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_temperature: Option<f64>,

    /// Number of current-carrying conductors grouped together
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conductor_count: Option<u32>,

    /// cos φ for AC circuits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,

    /// Replaces the tabulated grouping factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_factor_override: Option<f64>,

    /// Soil thermal resistivity (K·m/W), buried metric methods only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_thermal_resistivity: Option<f64>,

    /// Insulation temperature rating (°C)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_rating: Option<u16>,

    /// Apply the NEC 125 % continuous-load multiplier (defaults to true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_continuous_multiplier: Option<bool>,

    /// DC voltage-system tag, e.g. "12V"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_voltage_system: Option<String>,

    /// DC application: "automotive", "marine", "solar" or "telecom"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_type: Option<String>,

    /// DC load type: "general", "critical" or "non_critical"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_type: Option<String>,

    /// Replaces the DC application's voltage-drop limit (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_voltage_drop_limit: Option<f64>,
}

impl CalculationInput {
    /// Create a request with the four mandatory quantities
    pub fn new(standard: impl Into<String>, current: f64, length: f64, voltage: f64) -> Self {
        CalculationInput {
            standard: standard.into(),
            current,
            length,
            voltage,
            ..Default::default()
        }
    }

    pub fn with_voltage_system(mut self, system: impl Into<String>) -> Self {
        self.voltage_system = Some(system.into());
        self
    }

    pub fn with_installation_method(mut self, method: impl Into<String>) -> Self {
        self.installation_method = Some(method.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.conductor_material = Some(material.into());
        self
    }

    pub fn with_ambient(mut self, ambient_c: f64) -> Self {
        self.ambient_temperature = Some(ambient_c);
        self
    }

    pub fn with_conductor_count(mut self, count: u32) -> Self {
        self.conductor_count = Some(count);
        self
    }

    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = Some(power_factor);
        self
    }

    pub fn with_grouping_override(mut self, factor: f64) -> Self {
        self.grouping_factor_override = Some(factor);
        self
    }

    pub fn with_soil_resistivity(mut self, resistivity: f64) -> Self {
        self.soil_thermal_resistivity = Some(resistivity);
        self
    }

    pub fn with_temperature_rating(mut self, rating_c: u16) -> Self {
        self.temperature_rating = Some(rating_c);
        self
    }

    pub fn with_continuous_multiplier(mut self, include: bool) -> Self {
        self.include_continuous_multiplier = Some(include);
        self
    }

    /// Set the DC tag and application in one step
    pub fn with_dc_application(mut self, tag: impl Into<String>, application: impl Into<String>) -> Self {
        self.dc_voltage_system = Some(tag.into());
        self.application_type = Some(application.into());
        self
    }

    pub fn with_load_type(mut self, load_type: impl Into<String>) -> Self {
        self.load_type = Some(load_type.into());
        self
    }

    pub fn with_custom_voltage_drop_limit(mut self, percent: f64) -> Self {
        self.custom_voltage_drop_limit = Some(percent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let json = r#"{"standard":"IEC","current":16.0,"length":25.0,"voltage":230.0}"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.standard, "IEC");
        assert!(input.voltage_system.is_none());
        assert!(input.include_continuous_multiplier.is_none());
    }

    #[test]
    fn test_absent_mandatory_quantities_are_zero() {
        // Left for the router to reject alongside every other issue
        let input: CalculationInput = serde_json::from_str(r#"{"standard":"NEC"}"#).unwrap();
        assert_eq!(input.current, 0.0);
        assert_eq!(input.length, 0.0);
    }

    #[test]
    fn test_builder_and_optional_fields_skipped() {
        let input = CalculationInput::new("DC", 25.0, 8.0, 12.0)
            .with_voltage_system("dc")
            .with_dc_application("12V", "automotive")
            .with_ambient(80.0);
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"application_type\":\"automotive\""));
        assert!(!json.contains("power_factor"));

        let roundtrip: CalculationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, input);
    }
}
