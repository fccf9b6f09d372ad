//! Typed errors for quantity construction, comparison, lookup and parsing
//!
//! Every failure is synchronous and deterministic. Callers can match on the
//! variant, or use [`QuantityError::code`] for a stable machine-readable tag.

use crate::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_MAGNITUDE: &str = "INVALID_MAGNITUDE";
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
    pub const NULL_ARGUMENT: &str = "NULL_ARGUMENT";
    pub const UNIT_NOT_FOUND: &str = "UNIT_NOT_FOUND";
    pub const AMBIGUOUS_ABBREVIATION: &str = "AMBIGUOUS_ABBREVIATION";
    pub const FORMAT_ERROR: &str = "FORMAT_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INVALID_CONVERSION: &str = "INVALID_CONVERSION";
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    /// Malformed numeric input (NaN, infinity, unparsable magnitude)
    #[error("Invalid magnitude: {0}")]
    InvalidMagnitude(String),

    /// Two quantities of different physical dimensions were combined or compared
    #[error("Dimension mismatch: cannot combine {left} with {right}")]
    DimensionMismatch { left: String, right: String },

    /// Comparison target is not a quantity of the expected type
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    /// Comparison target is absent
    #[error("Argument '{0}' is absent")]
    NullArgument(&'static str),

    #[error("Unit not found in {dimension}: '{unit}'")]
    UnitNotFound { dimension: String, unit: String },

    #[error("Ambiguous abbreviation '{abbreviation}' in {dimension}: matches {}", .candidates.join(", "))]
    AmbiguousAbbreviation {
        dimension: String,
        abbreviation: String,
        candidates: Vec<String>,
    },

    /// Text that does not have the shape "<number> <abbreviation>"
    #[error("Format error: {0}")]
    Format(String),

    #[error("Division by zero")]
    DivisionByZero,

    /// A unit table entry whose conversion cannot be inverted
    #[error("Invalid conversion for {unit}: {reason}")]
    InvalidConversion { unit: String, reason: String },
}

impl QuantityError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidMagnitude(_) => codes::INVALID_MAGNITUDE,
            Self::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            Self::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            Self::NullArgument(_) => codes::NULL_ARGUMENT,
            Self::UnitNotFound { .. } => codes::UNIT_NOT_FOUND,
            Self::AmbiguousAbbreviation { .. } => codes::AMBIGUOUS_ABBREVIATION,
            Self::Format(_) => codes::FORMAT_ERROR,
            Self::DivisionByZero => codes::DIV_ZERO,
            Self::InvalidConversion { .. } => codes::INVALID_CONVERSION,
        }
    }

    /// Suggestion for fixing the error, when one applies
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidMagnitude(_) => Some("Use a finite number".to_string()),
            Self::DimensionMismatch { left, .. } => {
                Some(format!("Convert both operands to {} first", left))
            }
            Self::UnitNotFound { dimension, .. } => {
                Some(format!("Check the abbreviation against the units of {}", dimension))
            }
            Self::AmbiguousAbbreviation { candidates, .. } => {
                Some(format!("Use the exact-case abbreviation of one of: {}", candidates.join(", ")))
            }
            Self::Format(_) => Some("Expected text like \"12.5 °\"".to_string()),
            Self::DivisionByZero => Some("Ensure divisor is not zero".to_string()),
            Self::InvalidConversion { .. } => Some("This is a bug in the unit table".to_string()),
            Self::TypeMismatch { .. } | Self::NullArgument(_) => None,
        }
    }

    pub fn unit_not_found(dimension: &str, unit: impl Into<String>) -> Self {
        Self::UnitNotFound {
            dimension: dimension.to_string(),
            unit: unit.into(),
        }
    }

    pub fn dimension_mismatch(left: &str, right: &str) -> Self {
        Self::DimensionMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

impl From<NumberError> for QuantityError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::Format(format!("invalid number: {}", s)),
            NumberError::DivisionByZero => Self::DivisionByZero,
            NumberError::NotFinite(s) => Self::InvalidMagnitude(s),
            NumberError::OutOfRange(s) => Self::InvalidMagnitude(format!("exponent {} out of range", s)),
        }
    }
}
