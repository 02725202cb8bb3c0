//! # Error Types
//!
//! Structured error types for wire_core. These errors are designed to be
//! informative for both humans and machines, providing enough context to
//! understand and fix a rejected sizing request programmatically.
//!
//! Every engine error is terminal for the call: the computation is pure and
//! deterministic, so the only remedy is a different input. Non-fatal findings
//! travel as warnings in the result metadata instead.
//!
//! ## Example
//!
//! ```rust
//! use wire_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length: f64) -> CalcResult<()> {
//!     if length <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length",
//!             length.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wire_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// A single violated input constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    /// Request field the constraint applies to (e.g. "current")
    pub field: String,
    /// Human readable description of the violation
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Structured error type for sizing operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by callers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more request fields are malformed or out of range.
    ///
    /// All violations are collected before reporting.
    #[error("Validation failed: {}", join_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },

    /// The standard identifier is not recognized
    #[error("Unsupported standard '{standard}'. Supported standards: {}", .supported.join(", "))]
    UnsupportedStandard {
        standard: String,
        supported: Vec<String>,
    },

    /// No table entry meets the derated ampacity requirement
    #[error(
        "No suitable conductor in the {standard} table: required ampacity {required_ampacity:.1} A at {temperature_rating} °C exceeds the largest size ({largest_size}, {largest_ampacity:.0} A)"
    )]
    NoSuitableConductor {
        standard: String,
        required_ampacity: f64,
        temperature_rating: u16,
        largest_size: String,
        largest_ampacity: f64,
    },

    /// An input value outside the sizing request is invalid (conversion, settings)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a Validation error from collected issues
    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        CalcError::Validation { issues }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Validation issues carried by this error (empty for other variants)
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            CalcError::Validation { issues } => issues,
            _ => &[],
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "VALIDATION_FAILED",
            CalcError::UnsupportedStandard { .. } => "UNSUPPORTED_STANDARD",
            CalcError::NoSuitableConductor { .. } => "NO_SUITABLE_CONDUCTOR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}
