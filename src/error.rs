//! # Error Types
//!
//! This module defines error types used throughout the posprint library.
//!
//! Only the parser (and the validating constructors it shares with the Rust
//! API) can fail inside the pipeline. Layout, rendering and encoding are total
//! over a valid [`Receipt`](crate::document::Receipt), so they return plain
//! values.

use thiserror::Error;

use crate::transport::TransportError;

/// A receipt description was rejected.
///
/// Raised before any layout or encoding work starts; a failed description
/// never produces a partial receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input is not well-formed JSON, or a field has the wrong JSON type.
    #[error("malformed description: {0}")]
    Malformed(String),

    /// A required field is absent.
    #[error("{context}: missing required field '{field}'")]
    MissingField {
        context: String,
        field: &'static str,
    },

    /// The `type` discriminator names no known element.
    #[error("{context}: unknown element type \"{type_name}\"")]
    UnknownElementType { context: String, type_name: String },

    /// Alignment outside `left`, `center`, `right`.
    #[error("{context}: invalid align: expected \"left\", \"center\", or \"right\", got \"{value}\"")]
    InvalidAlignment { context: String, value: String },

    /// A width, count or line length that must be positive was not.
    #[error("{context}: '{field}' must be positive, got {value}")]
    NonPositive {
        context: String,
        field: &'static str,
        value: i64,
    },

    /// Any other field value the model cannot represent.
    #[error("{context}: invalid {field}: {message}")]
    InvalidField {
        context: String,
        field: &'static str,
        message: String,
    },

    /// The columns of a row are wider than the printer line.
    #[error("{context}: column widths sum to {total}, exceeding {chars_per_line} chars per line")]
    RowTooWide {
        context: String,
        total: usize,
        chars_per_line: usize,
    },
}

impl ValidationError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Malformed(_) => "malformed",
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::UnknownElementType { .. } => "unknown_element_type",
            ValidationError::InvalidAlignment { .. } => "invalid_alignment",
            ValidationError::NonPositive { .. } => "non_positive",
            ValidationError::InvalidField { .. } => "invalid_field",
            ValidationError::RowTooWide { .. } => "row_too_wide",
        }
    }
}

/// Main error type for posprint operations
#[derive(Debug, Error)]
pub enum PosPrintError {
    /// The receipt description was rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_stable() {
        let err = ValidationError::RowTooWide {
            context: "elements[0]".into(),
            total: 12,
            chars_per_line: 10,
        };
        assert_eq!(err.kind(), "row_too_wide");
        assert_eq!(
            err.to_string(),
            "elements[0]: column widths sum to 12, exceeding 10 chars per line"
        );
    }

    #[test]
    fn test_validation_wraps_into_crate_error() {
        let err: PosPrintError = ValidationError::Malformed("eof".into()).into();
        assert!(matches!(err, PosPrintError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: malformed description: eof");
    }
}
