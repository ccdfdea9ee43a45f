//! # Error Types
//!
//! Structured error types for conn_core. Every failure here describes invalid
//! engineering input (a wrong connection type, a member without the property a
//! limit state needs, a geometry that cannot exist), never a transient fault,
//! so nothing is retried and no partial result is ever returned.
//!
//! ## Example
//!
//! ```rust
//! use conn_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(t_in: f64) -> CalcResult<()> {
//!     if t_in <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "thickness_in",
//!             t_in.to_string(),
//!             "Thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for conn_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for connection design operations.
///
/// Each variant names the offending member, connection, or quantity so the
/// caller can surface it to the engineer without extra bookkeeping.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is out of range (non-positive spacing, zero bolt count, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A calculator received the wrong connection payload
    #[error("Configuration mismatch in {calculator}: expected {expected} connection, got {found}")]
    ConfigurationMismatch {
        calculator: String,
        expected: String,
        found: String,
    },

    /// A member lacks a geometric or material property the check requires
    #[error("Member '{member}' is missing required property '{property}'")]
    MissingProperty { member: String, property: String },

    /// Geometry resolves to something that cannot be built
    #[error("Geometry infeasible for {context}: {reason}")]
    GeometryInfeasible { context: String, reason: String },

    /// Arithmetic or comparison between quantities of different dimension
    #[error("Dimension mismatch in {operation}: {left} vs {right}")]
    DimensionMismatch {
        operation: String,
        left: String,
        right: String,
    },

    /// Material, bolt grade, or electrode designation not in the registry
    #[error("Unknown {kind} designation: {designation}")]
    UnknownDesignation { kind: String, designation: String },

    /// Steel shape not found in the section database
    #[error("Unknown steel shape: {shape}")]
    UnknownShape { shape: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigurationMismatch error
    pub fn configuration_mismatch(
        calculator: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        CalcError::ConfigurationMismatch {
            calculator: calculator.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a MissingProperty error
    pub fn missing_property(member: impl Into<String>, property: impl Into<String>) -> Self {
        CalcError::MissingProperty {
            member: member.into(),
            property: property.into(),
        }
    }

    /// Create a GeometryInfeasible error
    pub fn geometry_infeasible(context: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::GeometryInfeasible {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        CalcError::DimensionMismatch {
            operation: operation.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create an UnknownDesignation error
    pub fn unknown_designation(kind: impl Into<String>, designation: impl Into<String>) -> Self {
        CalcError::UnknownDesignation {
            kind: kind.into(),
            designation: designation.into(),
        }
    }

    /// Create an UnknownShape error
    pub fn unknown_shape(shape: impl Into<String>) -> Self {
        CalcError::UnknownShape { shape: shape.into() }
    }

    /// Design errors are deterministic given their inputs; retrying never helps.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ConfigurationMismatch { .. } => "CONFIGURATION_MISMATCH",
            CalcError::MissingProperty { .. } => "MISSING_PROPERTY",
            CalcError::GeometryInfeasible { .. } => "GEOMETRY_INFEASIBLE",
            CalcError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            CalcError::UnknownDesignation { .. } => "UNKNOWN_DESIGNATION",
            CalcError::UnknownShape { .. } => "UNKNOWN_SHAPE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
