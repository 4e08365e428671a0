//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' contains duplicate label '{label}'")]
    DuplicateLabel { field: String, label: String },

    #[error("Field '{field}' must be {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}")]
    ShapeMismatch {
        field: String,
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    #[error("Field '{field}' must be non-negative, got {value} at ({row}, {col})")]
    NegativeValue {
        field: String,
        row: usize,
        col: usize,
        value: f64,
    },

    #[error("Field '{field}' contains a non-finite value at ({row}, {col})")]
    NonFinite { field: String, row: usize, col: usize },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a duplicate label validation error.
    pub fn duplicate_label(field: impl Into<String>, label: impl Into<String>) -> Self {
        ValidationError::DuplicateLabel {
            field: field.into(),
            label: label.into(),
        }
    }

    /// Creates a shape mismatch validation error.
    pub fn shape_mismatch(
        field: impl Into<String>,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        ValidationError::ShapeMismatch {
            field: field.into(),
            expected_rows: expected.0,
            expected_cols: expected.1,
            actual_rows: actual.0,
            actual_cols: actual.1,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Numeric errors
    MatrixSingular,
    DimensionMismatch,

    // Lookup errors
    SelectorMismatch,
    UnknownIndicator,

    // Classification errors
    UndefinedCategory,
    InvalidArity,
    IncompletePivot,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::MatrixSingular => "MATRIX_SINGULAR",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::SelectorMismatch => "SELECTOR_MISMATCH",
            ErrorCode::UnknownIndicator => "UNKNOWN_INDICATOR",
            ErrorCode::UndefinedCategory => "UNDEFINED_CATEGORY",
            ErrorCode::InvalidArity => "INVALID_ARITY",
            ErrorCode::IncompletePivot => "INCOMPLETE_PIVOT",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised by an analysis stage. Every variant aborts the stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Matrix (I - A) is singular for {matrix}")]
    MatrixSingular { matrix: String },

    #[error("Selector on {matrix} {axis} references unknown labels: {}", .missing.join(", "))]
    SelectorMismatch {
        matrix: String,
        axis: String,
        missing: Vec<String>,
    },

    #[error("Selector on {matrix} {axis} matched no entries")]
    EmptySelection { matrix: String, axis: String },

    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("Unknown indicator '{indicator}'")]
    UnknownIndicator { indicator: String },

    #[error("No category defined for {entity} with values {values:?}")]
    UndefinedCategory { entity: String, values: Vec<f64> },

    #[error("{analysis} analysis needs exactly {expected} labels, got {actual}")]
    InvalidArity {
        analysis: String,
        expected: usize,
        actual: usize,
    },

    #[error("Pivot has no value for row '{row}' in column '{column}'")]
    IncompletePivot { row: String, column: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    /// Creates a singular matrix error.
    pub fn singular(matrix: impl Into<String>) -> Self {
        AnalysisError::MatrixSingular { matrix: matrix.into() }
    }

    /// Creates a dimension mismatch error.
    pub fn dimension_mismatch(
        context: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        AnalysisError::DimensionMismatch {
            context: context.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates an unknown indicator error.
    pub fn unknown_indicator(indicator: impl Into<String>) -> Self {
        AnalysisError::UnknownIndicator {
            indicator: indicator.into(),
        }
    }

    /// Returns the stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::MatrixSingular { .. } => ErrorCode::MatrixSingular,
            AnalysisError::SelectorMismatch { .. } | AnalysisError::EmptySelection { .. } => {
                ErrorCode::SelectorMismatch
            }
            AnalysisError::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            AnalysisError::UnknownIndicator { .. } => ErrorCode::UnknownIndicator,
            AnalysisError::UndefinedCategory { .. } => ErrorCode::UndefinedCategory,
            AnalysisError::InvalidArity { .. } => ErrorCode::InvalidArity,
            AnalysisError::IncompletePivot { .. } => ErrorCode::IncompletePivot,
            AnalysisError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}
