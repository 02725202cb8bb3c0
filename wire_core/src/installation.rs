//! # Installation Methods
//!
//! Closed per-standard enumerations of how a conductor is routed, each with
//! its installation-method factor. Request strings are parsed into these
//! enums by the router, so an unrecognized method can never reach the
//! correction-factor lookup.
//!
//! ## Factor Summary
//!
//! | Standard        | Basis of the tabulated ampacity | Other methods          |
//! |-----------------|---------------------------------|------------------------|
//! | NEC             | Table 310.16 (raceway/cable/earth) | free air ≈ 310.17   |
//! | IEC / BS 7671   | Reference method C              | ratios to method C     |
//! | DC              | Free air                        | enclosure derating     |

use std::fmt;

use serde::{Deserialize, Serialize};

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

// ============================================================================
// NEC
// ============================================================================

/// NEC wiring methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NecMethod {
    /// Conductors in an enclosed raceway (EMT, RMC, PVC conduit)
    #[default]
    Raceway,
    /// Multiconductor cable (NM, MC, UF)
    Cable,
    /// Cables in cable tray
    CableTray,
    /// Single conductors in free air (Table 310.17 basis)
    FreeAir,
    /// Directly buried in earth
    DirectBurial,
}

impl NecMethod {
    pub const ALL: [NecMethod; 5] = [
        NecMethod::Raceway,
        NecMethod::Cable,
        NecMethod::CableTray,
        NecMethod::FreeAir,
        NecMethod::DirectBurial,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            NecMethod::Raceway => "raceway",
            NecMethod::Cable => "cable",
            NecMethod::CableTray => "cable_tray",
            NecMethod::FreeAir => "free_air",
            NecMethod::DirectBurial => "direct_burial",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NecMethod::Raceway => "Enclosed raceway",
            NecMethod::Cable => "Multiconductor cable",
            NecMethod::CableTray => "Cable tray",
            NecMethod::FreeAir => "Free air",
            NecMethod::DirectBurial => "Direct burial",
        }
    }

    /// Installation factor relative to Table 310.16
    pub fn factor(&self) -> f64 {
        match self {
            NecMethod::Raceway => 1.0,
            NecMethod::Cable => 1.0,
            NecMethod::CableTray => 1.0,
            NecMethod::FreeAir => 1.3,
            NecMethod::DirectBurial => 1.0,
        }
    }

    pub fn is_buried(&self) -> bool {
        matches!(self, NecMethod::DirectBurial)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "raceway" | "enclosed_raceway" | "conduit" | "emt" => Some(NecMethod::Raceway),
            "cable" | "nm_cable" | "mc_cable" => Some(NecMethod::Cable),
            "cable_tray" | "tray" => Some(NecMethod::CableTray),
            "free_air" | "air" => Some(NecMethod::FreeAir),
            "direct_burial" | "buried" | "underground" => Some(NecMethod::DirectBurial),
            _ => None,
        }
    }
}

impl fmt::Display for NecMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// IEC 60364-5-52 / BS 7671 reference methods
// ============================================================================

/// Reference installation methods shared by IEC 60364-5-52 and BS 7671
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReferenceMethod {
    /// Insulated conductors in conduit in a thermally insulated wall
    A1,
    /// Multicore cable in conduit in a thermally insulated wall
    A2,
    /// Insulated conductors in conduit or trunking on a wall
    B1,
    /// Multicore cable in conduit or trunking on a wall
    B2,
    /// Clipped direct to a surface
    #[default]
    C,
    /// Cable in ducts in the ground
    D1,
    /// Cable direct in the ground
    D2,
    /// Multicore cable in free air
    E,
    /// Single-core cables touching in free air
    F,
    /// Single-core cables spaced in free air
    G,
}

impl ReferenceMethod {
    pub const ALL: [ReferenceMethod; 10] = [
        ReferenceMethod::A1,
        ReferenceMethod::A2,
        ReferenceMethod::B1,
        ReferenceMethod::B2,
        ReferenceMethod::C,
        ReferenceMethod::D1,
        ReferenceMethod::D2,
        ReferenceMethod::E,
        ReferenceMethod::F,
        ReferenceMethod::G,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ReferenceMethod::A1 => "A1",
            ReferenceMethod::A2 => "A2",
            ReferenceMethod::B1 => "B1",
            ReferenceMethod::B2 => "B2",
            ReferenceMethod::C => "C",
            ReferenceMethod::D1 => "D1",
            ReferenceMethod::D2 => "D2",
            ReferenceMethod::E => "E",
            ReferenceMethod::F => "F",
            ReferenceMethod::G => "G",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReferenceMethod::A1 => "A1 - conduit in insulated wall",
            ReferenceMethod::A2 => "A2 - multicore in conduit in insulated wall",
            ReferenceMethod::B1 => "B1 - conduit on wall",
            ReferenceMethod::B2 => "B2 - multicore in conduit on wall",
            ReferenceMethod::C => "C - clipped direct",
            ReferenceMethod::D1 => "D1 - ducts in ground",
            ReferenceMethod::D2 => "D2 - direct in ground",
            ReferenceMethod::E => "E - multicore in free air",
            ReferenceMethod::F => "F - single-core touching in free air",
            ReferenceMethod::G => "G - single-core spaced in free air",
        }
    }

    /// Ratio of the method's ampacity to reference method C
    pub fn factor(&self) -> f64 {
        match self {
            ReferenceMethod::A1 => 0.72,
            ReferenceMethod::A2 => 0.69,
            ReferenceMethod::B1 => 0.89,
            ReferenceMethod::B2 => 0.85,
            ReferenceMethod::C => 1.00,
            ReferenceMethod::D1 => 0.81,
            ReferenceMethod::D2 => 0.96,
            ReferenceMethod::E => 1.11,
            ReferenceMethod::F => 1.15,
            ReferenceMethod::G => 1.25,
        }
    }

    /// Buried methods take the soil thermal-resistivity factor and ground temperatures
    pub fn is_buried(&self) -> bool {
        matches!(self, ReferenceMethod::D1 | ReferenceMethod::D2)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "a1" | "conduit_in_insulated_wall" => Some(ReferenceMethod::A1),
            "a2" | "multicore_in_insulated_wall" => Some(ReferenceMethod::A2),
            "b1" | "conduit_on_wall" | "trunking" | "conduit" => Some(ReferenceMethod::B1),
            "b2" | "multicore_conduit_on_wall" => Some(ReferenceMethod::B2),
            "c" | "surface" | "clipped_direct" => Some(ReferenceMethod::C),
            "d1" | "duct_in_ground" | "underground_duct" => Some(ReferenceMethod::D1),
            "d2" | "direct_in_ground" | "direct_burial" | "buried" => Some(ReferenceMethod::D2),
            "e" | "free_air" | "multicore_free_air" => Some(ReferenceMethod::E),
            "f" | "free_air_touching" => Some(ReferenceMethod::F),
            "g" | "free_air_spaced" => Some(ReferenceMethod::G),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// DC applications
// ============================================================================

/// Routing of low-voltage DC conductors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DcMethod {
    /// Chassis or open wiring in free air
    #[default]
    FreeAir,
    /// Enclosed in conduit or loom
    Conduit,
    /// Inside an engine space or compartment
    EngineSpace,
    /// Direct burial (PV array home runs)
    DirectBurial,
}

impl DcMethod {
    pub const ALL: [DcMethod; 4] = [
        DcMethod::FreeAir,
        DcMethod::Conduit,
        DcMethod::EngineSpace,
        DcMethod::DirectBurial,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DcMethod::FreeAir => "free_air",
            DcMethod::Conduit => "conduit",
            DcMethod::EngineSpace => "engine_space",
            DcMethod::DirectBurial => "direct_burial",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DcMethod::FreeAir => "Free air",
            DcMethod::Conduit => "Conduit / loom",
            DcMethod::EngineSpace => "Engine space",
            DcMethod::DirectBurial => "Direct burial",
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            DcMethod::FreeAir => 1.0,
            DcMethod::Conduit => 0.8,
            DcMethod::EngineSpace => 0.85,
            DcMethod::DirectBurial => 1.0,
        }
    }

    pub fn is_buried(&self) -> bool {
        matches!(self, DcMethod::DirectBurial)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "free_air" | "air" | "chassis" | "open" => Some(DcMethod::FreeAir),
            "conduit" | "loom" | "enclosed" => Some(DcMethod::Conduit),
            "engine_space" | "engine_room" | "engine_compartment" => Some(DcMethod::EngineSpace),
            "direct_burial" | "buried" | "underground" => Some(DcMethod::DirectBurial),
            _ => None,
        }
    }
}

impl fmt::Display for DcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_reference_methods() {
        assert_eq!(ReferenceMethod::ALL.len(), 10);
        for method in ReferenceMethod::ALL {
            assert_eq!(ReferenceMethod::parse(method.code()), Some(method));
        }
    }

    #[test]
    fn test_surface_is_method_c() {
        assert_eq!(ReferenceMethod::parse("surface"), Some(ReferenceMethod::C));
        assert_eq!(ReferenceMethod::parse("Clipped-Direct"), Some(ReferenceMethod::C));
        assert_eq!(ReferenceMethod::C.factor(), 1.0);
    }

    #[test]
    fn test_only_d_methods_are_buried() {
        let buried: Vec<_> = ReferenceMethod::ALL.iter().filter(|m| m.is_buried()).collect();
        assert_eq!(buried, vec![&ReferenceMethod::D1, &ReferenceMethod::D2]);
    }

    #[test]
    fn test_nec_aliases_round_trip() {
        assert_eq!(NecMethod::parse("enclosed raceway"), Some(NecMethod::Raceway));
        assert_eq!(NecMethod::parse("conduit"), Some(NecMethod::Raceway));
        for method in NecMethod::ALL {
            assert_eq!(NecMethod::parse(method.code()), Some(method));
        }
        assert_eq!(NecMethod::parse("clipped_direct"), None);
    }

    #[test]
    fn test_dc_methods() {
        assert_eq!(DcMethod::parse("engine room"), Some(DcMethod::EngineSpace));
        assert!(DcMethod::Conduit.factor() < DcMethod::FreeAir.factor());
        assert_eq!(DcMethod::parse("A1"), None);
    }
}
