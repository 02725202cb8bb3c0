//! # Wiring Standards
//!
//! Identifiers for the supported wiring standards and the small enumerations
//! every sizing request carries: voltage system and conductor material.
//!
//! Requests arrive with loosely typed strings; the router parses them into
//! these closed enums exactly once, so nothing downstream ever sees an
//! unrecognized value.
//!
//! ## Example
//!
//! ```rust
//! use wire_core::standards::Standard;
//!
//! let standard: Standard = "bs7671".parse().unwrap();
//! assert_eq!(standard, Standard::Bs7671);
//! assert!("CSA".parse::<Standard>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::units::LengthUnit;

/// Wiring standard that selects the sizing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standard {
    /// US National Electrical Code (NFPA 70)
    Nec,
    /// IEC 60364-5-52
    Iec,
    /// UK BS 7671 (IET Wiring Regulations)
    Bs7671,
    /// Low-voltage DC application profiles
    Dc,
}

impl Standard {
    /// All standards in dispatch order
    pub const ALL: [Standard; 4] = [Standard::Nec, Standard::Iec, Standard::Bs7671, Standard::Dc];

    /// Canonical identifier accepted by the router
    pub fn identifier(&self) -> &'static str {
        match self {
            Standard::Nec => "NEC",
            Standard::Iec => "IEC",
            Standard::Bs7671 => "BS7671",
            Standard::Dc => "DC",
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Standard::Nec => "NEC (NFPA 70)",
            Standard::Iec => "IEC 60364-5-52",
            Standard::Bs7671 => "BS 7671",
            Standard::Dc => "DC Applications",
        }
    }

    /// Canonical identifiers of every supported standard
    pub fn supported_identifiers() -> Vec<String> {
        Standard::ALL.iter().map(|s| s.identifier().to_string()).collect()
    }

    /// Length unit the standard's reference tables are expressed in
    pub fn length_unit(&self) -> LengthUnit {
        match self {
            Standard::Nec | Standard::Dc => LengthUnit::Feet,
            Standard::Iec | Standard::Bs7671 => LengthUnit::Meters,
        }
    }

    /// Whether the standard sizes DC circuits
    pub fn is_dc(&self) -> bool {
        matches!(self, Standard::Dc)
    }

    /// Whether the standard uses metric conductor sizes
    pub fn is_metric(&self) -> bool {
        matches!(self, Standard::Iec | Standard::Bs7671)
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for Standard {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "NEC" | "US" | "NFPA70" => Ok(Standard::Nec),
            "IEC" | "IEC60364" | "IEC6036452" => Ok(Standard::Iec),
            "BS7671" | "UK" | "BS" => Ok(Standard::Bs7671),
            "DC" => Ok(Standard::Dc),
            _ => Err(CalcError::UnsupportedStandard {
                standard: s.to_string(),
                supported: Standard::supported_identifiers(),
            }),
        }
    }
}

/// Supply arrangement of the circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoltageSystem {
    SinglePhase,
    ThreePhase,
    Dc,
}

impl VoltageSystem {
    pub const ALL: [VoltageSystem; 3] = [
        VoltageSystem::SinglePhase,
        VoltageSystem::ThreePhase,
        VoltageSystem::Dc,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            VoltageSystem::SinglePhase => "single_phase",
            VoltageSystem::ThreePhase => "three_phase",
            VoltageSystem::Dc => "dc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VoltageSystem::SinglePhase => "Single-phase AC",
            VoltageSystem::ThreePhase => "Three-phase AC",
            VoltageSystem::Dc => "DC",
        }
    }

    pub fn is_ac(&self) -> bool {
        !matches!(self, VoltageSystem::Dc)
    }

    /// Parse from a request string ("single_phase", "1ph", "three-phase", "dc", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "single_phase" | "single" | "1ph" | "1_phase" | "1" => Some(VoltageSystem::SinglePhase),
            "three_phase" | "three" | "3ph" | "3_phase" | "3" => Some(VoltageSystem::ThreePhase),
            "dc" => Some(VoltageSystem::Dc),
            _ => None,
        }
    }
}

impl fmt::Display for VoltageSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    pub const ALL: [ConductorMaterial; 2] = [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    pub fn code(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "copper",
            ConductorMaterial::Aluminum => "aluminum",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }

    pub fn is_aluminum(&self) -> bool {
        matches!(self, ConductorMaterial::Aluminum)
    }

    /// Parse from a request string ("copper", "cu", "aluminium", "al", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "copper" | "cu" => Some(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Some(ConductorMaterial::Aluminum),
            _ => None,
        }
    }
}

impl fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_aliases() {
        assert_eq!("NEC".parse::<Standard>().unwrap(), Standard::Nec);
        assert_eq!("us".parse::<Standard>().unwrap(), Standard::Nec);
        assert_eq!("IEC 60364".parse::<Standard>().unwrap(), Standard::Iec);
        assert_eq!("BS-7671".parse::<Standard>().unwrap(), Standard::Bs7671);
        assert_eq!("dc".parse::<Standard>().unwrap(), Standard::Dc);
    }

    #[test]
    fn test_unknown_standard_lists_supported() {
        let err = "JIS".parse::<Standard>().unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_STANDARD");
        let message = err.to_string();
        for id in ["NEC", "IEC", "BS7671", "DC"] {
            assert!(message.contains(id), "missing {id} in {message}");
        }
    }

    #[test]
    fn test_voltage_system_parse() {
        assert_eq!(VoltageSystem::parse("single-phase"), Some(VoltageSystem::SinglePhase));
        assert_eq!(VoltageSystem::parse("3ph"), Some(VoltageSystem::ThreePhase));
        assert_eq!(VoltageSystem::parse("DC"), Some(VoltageSystem::Dc));
        assert_eq!(VoltageSystem::parse("two_phase"), None);
    }

    #[test]
    fn test_material_parse() {
        assert_eq!(ConductorMaterial::parse("Aluminium"), Some(ConductorMaterial::Aluminum));
        assert_eq!(ConductorMaterial::parse("cu"), Some(ConductorMaterial::Copper));
        assert_eq!(ConductorMaterial::parse("silver"), None);
    }

    #[test]
    fn test_length_units() {
        assert_eq!(Standard::Nec.length_unit(), LengthUnit::Feet);
        assert_eq!(Standard::Bs7671.length_unit(), LengthUnit::Meters);
    }
}
