//! # Error Types
//!
//! Structured error types for liftbeam_core. Every variant carries enough
//! context to tell the caller which input to fix without parsing a message.
//!
//! ## Example
//!
//! ```rust
//! use liftbeam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_in: f64) -> CalcResult<()> {
//!     if span_in <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "span",
//!             span_in.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for liftbeam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculations and catalog loading.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, wrong count, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Steel section not found in the catalog
    #[error("Steel section not found: {label}")]
    SectionNotFound { label: String },

    /// A calculation step could not produce a result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SectionNotFound error
    pub fn section_not_found(label: impl Into<String>) -> Self {
        CalcError::SectionNotFound { label: label.into() }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Check if this is a recoverable error (e.g., the file can be fixed and reloaded)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SectionNotFound { .. } => "SECTION_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

/// Reject NaN and infinite values for a named input field.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("beams[0].span", "-5", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidInput"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::section_not_found("W8X18").error_code(), "SECTION_NOT_FOUND");
        assert_eq!(
            CalcError::calculation_failed("Bending moment", "no reference point").error_code(),
            "CALCULATION_FAILED"
        );
        assert!(CalcError::file_error("read", "shapes.csv", "not found").is_recoverable());
        assert!(!CalcError::serialization("bad json").is_recoverable());
    }

    #[test]
    fn test_require_finite() {
        assert!(require_finite("car_weight", 1200.0).is_ok());
        assert!(require_finite("car_weight", f64::NAN).is_err());
        assert!(require_finite("car_weight", f64::INFINITY).is_err());
    }
}
