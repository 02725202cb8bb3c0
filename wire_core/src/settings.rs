//! # Sizing Settings
//!
//! Tunable limits for the sizing engines. Defaults are compiled in; a TOML
//! file may override any subset of them.
//!
//! ```toml
//! max_alternatives = 3
//!
//! [nec]
//! normal_percent = 2.0
//! maximum_percent = 5.0
//!
//! # DC tables must give all three load types
//! [dc.marine]
//! general = 3.0
//! critical = 2.5
//! non_critical = 10.0
//! ```
//!
//! Settings are validated on load: every limit must lie in (0, 100], a
//! normal limit may not exceed its maximum, and at most
//! [`MAX_ALTERNATIVES_CAP`] alternatives can be requested.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::sizing::dc::{DcApplication, DcLoadType};
use crate::standards::Standard;

/// Upper bound on `max_alternatives`
pub const MAX_ALTERNATIVES_CAP: usize = 20;

/// Normal and absolute-maximum voltage drop for an AC standard (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltageDropLimits {
    /// Limit the selected conductor is held to
    pub normal_percent: f64,
    /// Absolute maximum; exceeding it is reported as a warning
    pub maximum_percent: f64,
}

impl Default for VoltageDropLimits {
    fn default() -> Self {
        VoltageDropLimits {
            normal_percent: 3.0,
            maximum_percent: 5.0,
        }
    }
}

/// Voltage-drop limits of one DC application by load type (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcLoadLimits {
    pub general: f64,
    pub critical: f64,
    pub non_critical: f64,
}

impl DcLoadLimits {
    pub const fn new(general: f64, critical: f64, non_critical: f64) -> Self {
        DcLoadLimits {
            general,
            critical,
            non_critical,
        }
    }

    pub fn for_load(&self, load_type: DcLoadType) -> f64 {
        match load_type {
            DcLoadType::General => self.general,
            DcLoadType::Critical => self.critical,
            DcLoadType::NonCritical => self.non_critical,
        }
    }

    fn values(&self) -> [(&'static str, f64); 3] {
        [
            ("general", self.general),
            ("critical", self.critical),
            ("non_critical", self.non_critical),
        ]
    }
}

/// Per-application DC voltage-drop limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcLimits {
    pub automotive: DcLoadLimits,
    /// ABYC E-11: 3 % critical, 10 % non-critical
    pub marine: DcLoadLimits,
    pub solar: DcLoadLimits,
    pub telecom: DcLoadLimits,
}

impl Default for DcLimits {
    fn default() -> Self {
        DcLimits {
            automotive: DcLoadLimits::new(2.0, 1.0, 3.0),
            marine: DcLoadLimits::new(3.0, 3.0, 10.0),
            solar: DcLoadLimits::new(2.0, 1.0, 3.0),
            telecom: DcLoadLimits::new(1.0, 0.5, 2.0),
        }
    }
}

impl DcLimits {
    pub fn for_application(&self, application: DcApplication) -> &DcLoadLimits {
        match application {
            DcApplication::Automotive => &self.automotive,
            DcApplication::Marine => &self.marine,
            DcApplication::Solar => &self.solar,
            DcApplication::Telecom => &self.telecom,
        }
    }
}

/// All tunable limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingSettings {
    /// Number of ranked alternatives to report
    pub max_alternatives: usize,
    pub nec: VoltageDropLimits,
    pub iec: VoltageDropLimits,
    pub bs7671: VoltageDropLimits,
    pub dc: DcLimits,
}

impl Default for SizingSettings {
    fn default() -> Self {
        SizingSettings {
            max_alternatives: 5,
            nec: VoltageDropLimits::default(),
            iec: VoltageDropLimits::default(),
            bs7671: VoltageDropLimits::default(),
            dc: DcLimits::default(),
        }
    }
}

impl SizingSettings {
    /// Parse and validate settings from TOML text
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: SizingSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Voltage-drop limits of an AC standard; `None` for DC
    pub fn ac_limits(&self, standard: Standard) -> Option<VoltageDropLimits> {
        match standard {
            Standard::Nec => Some(self.nec),
            Standard::Iec => Some(self.iec),
            Standard::Bs7671 => Some(self.bs7671),
            Standard::Dc => None,
        }
    }

    /// Check every limit, reporting the first offending field
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_alternatives > MAX_ALTERNATIVES_CAP {
            return Err(CalcError::invalid_input(
                "max_alternatives",
                self.max_alternatives.to_string(),
                format!("At most {} alternatives can be reported", MAX_ALTERNATIVES_CAP),
            ));
        }

        for (standard, limits) in Standard::ALL.iter().filter_map(|&s| Some((s, self.ac_limits(s)?))) {
            let name = standard.identifier().to_lowercase();
            check_percent(&format!("{name}.normal_percent"), limits.normal_percent)?;
            check_percent(&format!("{name}.maximum_percent"), limits.maximum_percent)?;
            if limits.normal_percent > limits.maximum_percent {
                return Err(CalcError::invalid_input(
                    format!("{name}.normal_percent"),
                    limits.normal_percent.to_string(),
                    format!("Normal limit exceeds the maximum of {}%", limits.maximum_percent),
                ));
            }
        }

        for application in DcApplication::ALL {
            for (load, value) in self.dc.for_application(application).values() {
                check_percent(&format!("dc.{}.{}", application.code(), load), value)?;
            }
        }

        Ok(())
    }
}

fn check_percent(field: &str, value: f64) -> CalcResult<()> {
    if value > 0.0 && value <= 100.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Voltage-drop limits must be greater than 0 and at most 100 percent",
        ))
    }
}

/// Load settings from a TOML file.
///
/// # Errors
///
/// - `FileError` if the file cannot be read
/// - `SerializationError` if the TOML is malformed
/// - `InvalidInput` if a limit is out of range
pub fn load_settings(path: &Path) -> CalcResult<SizingSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let settings = SizingSettings::from_toml_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded sizing settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SizingSettings::default();
        assert_eq!(settings.max_alternatives, 5);
        assert_eq!(settings.ac_limits(Standard::Nec).unwrap().normal_percent, 3.0);
        assert!(settings.ac_limits(Standard::Dc).is_none());
        assert_eq!(settings.dc.telecom.for_load(DcLoadType::General), 1.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let settings = SizingSettings::from_toml_str(
            r#"
            max_alternatives = 3

            [nec]
            normal_percent = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.max_alternatives, 3);
        assert_eq!(settings.nec.normal_percent, 2.0);
        assert_eq!(settings.nec.maximum_percent, 5.0);
        assert_eq!(settings.iec, VoltageDropLimits::default());
        assert_eq!(settings.dc, DcLimits::default());
    }

    #[test]
    fn test_dc_override_requires_all_load_types() {
        let result = SizingSettings::from_toml_str("[dc.marine]\ncritical = 2.5\n");
        assert!(matches!(result, Err(CalcError::SerializationError { .. })));

        let settings = SizingSettings::from_toml_str(
            "[dc.marine]\ngeneral = 3.0\ncritical = 2.5\nnon_critical = 10.0\n",
        )
        .unwrap();
        assert_eq!(settings.dc.marine.critical, 2.5);
        assert_eq!(settings.dc.automotive, DcLimits::default().automotive);
    }

    #[test]
    fn test_rejects_non_positive_limit() {
        let err = SizingSettings::from_toml_str("[iec]\nnormal_percent = 0.0\n").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("iec.normal_percent"));
    }

    #[test]
    fn test_rejects_normal_above_maximum() {
        let err = SizingSettings::from_toml_str("[bs7671]\nnormal_percent = 6.0\n").unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
        assert!(err.to_string().contains("bs7671.normal_percent"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings(Path::new("/nonexistent/wiresize.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
