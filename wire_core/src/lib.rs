//! # wire_core - Conductor Sizing Engine
//!
//! `wire_core` recommends the smallest electrical conductor that satisfies
//! current-carrying capacity and voltage-drop rules under one of four
//! standards: the US National Electrical Code, IEC 60364-5-52, BS 7671, or
//! low-voltage DC application profiles (automotive, marine, solar, telecom).
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every calculation is a pure function of its input
//! - **JSON-First**: requests and results implement Serialize/Deserialize
//! - **Rich Errors**: validation reports every violated constraint at once
//! - **Static Tables**: reference data is built once and never mutated
//!
//! ## Quick Start
//!
//! ```rust
//! use wire_core::{size, CalculationInput};
//!
//! let input = CalculationInput::new("IEC", 16.0, 25.0, 230.0)
//!     .with_voltage_system("single_phase")
//!     .with_installation_method("C")
//!     .with_material("copper");
//!
//! let result = size(&input).unwrap();
//! assert_eq!(result.designation(), "2.5 mm²");
//! assert!(result.compliance.overall);
//! ```
//!
//! ## Modules
//!
//! - [`router`] - Request validation and dispatch
//! - [`sizing`] - Per-standard engines and the shared conductor search
//! - [`conductors`] - Conductor reference tables
//! - [`correction_factors`] - Temperature, grouping and soil factor tables
//! - [`installation`] - Installation methods per standard
//! - [`voltage_drop`] - Voltage drop, power loss and efficiency formulas
//! - [`conversion`] - Carrying a selection between standards
//! - [`settings`] - Tunable voltage-drop limits (TOML)
//! - [`input`] / [`result`] - Request and result shapes
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod conductors;
pub mod conversion;
pub mod correction_factors;
pub mod errors;
pub mod input;
pub mod installation;
pub mod result;
pub mod router;
pub mod settings;
pub mod sizing;
pub mod standards;
pub mod units;
pub mod voltage_drop;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult, ValidationIssue};
pub use input::CalculationInput;
pub use result::{CalculationResult, Compliance};
pub use router::{size, Router};
pub use settings::{load_settings, SizingSettings};
pub use standards::Standard;
