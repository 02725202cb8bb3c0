//! # Sizing Engines
//!
//! One engine per standard, all built on the shared search in `pipeline`.
//! The router converts a validated request into a [`SizingRequest`], a
//! closed enum holding the typed input for exactly one engine, and calls
//! [`SizingRequest::size`].
//!
//! ## Engine deltas
//!
//! | Engine            | Continuous multiplier | Installation methods      | Extra factors / checks        |
//! |-------------------|-----------------------|---------------------------|-------------------------------|
//! | [`nec`]           | 1.25 (optional)       | [`NecMethod`]             | 60/75/90 °C columns, soil resistivity for direct burial |
//! | [`iec`]           | none                  | [`ReferenceMethod`]       | soil resistivity for D1/D2    |
//! | [`bs7671`]        | none                  | [`ReferenceMethod`]       | soil resistivity for D1/D2    |
//! | [`dc`]            | 1.25 for solar        | [`DcMethod`]              | per-application limits, efficiency targets, soil resistivity for direct burial |
//!
//! [`NecMethod`]: crate::installation::NecMethod
//! [`ReferenceMethod`]: crate::installation::ReferenceMethod
//! [`DcMethod`]: crate::installation::DcMethod

pub mod bs7671;
pub mod dc;
pub mod iec;
pub mod metric;
pub mod nec;
pub(crate) mod pipeline;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::result::CalculationResult;
use crate::settings::SizingSettings;
use crate::standards::{ConductorMaterial, Standard, VoltageSystem};

pub use dc::DcInput;
pub use metric::MetricInput;
pub use nec::NecInput;
pub use pipeline::DEFAULT_POWER_FACTOR;

/// Validated circuit quantities shared by every engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitParameters {
    /// Load current (A)
    pub current: f64,
    /// One-way length in the standard's length unit
    pub length: f64,
    /// Supply voltage (V)
    pub voltage: f64,
    pub system: VoltageSystem,
    pub material: ConductorMaterial,
    pub ambient_c: Option<f64>,
    pub conductor_count: Option<u32>,
    pub power_factor: Option<f64>,
    pub grouping_override: Option<f64>,
    pub temperature_rating: Option<u16>,
}

/// Typed input for exactly one sizing engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "standard", rename_all = "snake_case")]
pub enum SizingRequest {
    Nec(NecInput),
    Iec(MetricInput),
    Bs7671(MetricInput),
    Dc(DcInput),
}

impl SizingRequest {
    pub fn standard(&self) -> Standard {
        match self {
            SizingRequest::Nec(_) => Standard::Nec,
            SizingRequest::Iec(_) => Standard::Iec,
            SizingRequest::Bs7671(_) => Standard::Bs7671,
            SizingRequest::Dc(_) => Standard::Dc,
        }
    }

    pub fn circuit(&self) -> &CircuitParameters {
        match self {
            SizingRequest::Nec(input) => &input.circuit,
            SizingRequest::Iec(input) | SizingRequest::Bs7671(input) => &input.circuit,
            SizingRequest::Dc(input) => &input.circuit,
        }
    }

    /// Run the matching engine; DC outcomes are mapped into the shared result
    pub fn size(&self, settings: &SizingSettings) -> CalcResult<CalculationResult> {
        debug!(standard = %self.standard(), "dispatching sizing request");
        let alternatives = settings.max_alternatives;
        match self {
            SizingRequest::Nec(input) => nec::size(input, settings.nec, alternatives),
            SizingRequest::Iec(input) => iec::size(input, settings.iec, alternatives),
            SizingRequest::Bs7671(input) => bs7671::size(input, settings.bs7671, alternatives),
            SizingRequest::Dc(input) => dc::size(input, &settings.dc, alternatives).map(CalculationResult::from),
        }
    }
}
