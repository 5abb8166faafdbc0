//! Error types for tensor search/selection kernels
//!
//! This module provides structured error types for kernel operations,
//! making error handling more robust and informative. All errors are
//! detected eagerly (before output allocation where feasible) and no
//! partial results are ever returned.

use std::fmt;

/// Error type for search/selection kernel operations
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Axis outside the valid range after negative-axis normalization
    InvalidAxis {
        axis: isize,
        rank: usize,
        context: String,
    },

    /// A computed index value cannot be represented in the requested
    /// index element type (e.g. a fiber longer than `i32::MAX`)
    UnsupportedIndexValue {
        operation: String,
        value: usize,
        index_dtype: &'static str,
    },

    /// Shape incompatibility (including non-broadcastable operands)
    IncompatibleShapes {
        operation: String,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: String,
    },

    /// Dimension mismatch between operands
    DimensionMismatch {
        operation: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: String,
    },

    /// Gather index outside the valid column range `[0, bound)`
    IndexOutOfRange {
        operation: String,
        index: i64,
        bound: usize,
        row: usize,
        column: usize,
    },

    /// Empty input not allowed (e.g. reducing an axis of length zero)
    EmptyInput {
        operation: String,
        parameter: String,
    },

    /// Generic operation error with context
    OperationError { operation: String, message: String },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidAxis {
                axis,
                rank,
                context,
            } => write!(
                f,
                "Invalid axis {} for tensor with rank {}. {}",
                axis, rank, context
            ),

            KernelError::UnsupportedIndexValue {
                operation,
                value,
                index_dtype,
            } => write!(
                f,
                "{}: index value {} is not representable as {}",
                operation, value, index_dtype
            ),

            KernelError::IncompatibleShapes {
                operation,
                shape_a,
                shape_b,
                reason,
            } => write!(
                f,
                "{}: incompatible shapes {:?} and {:?}: {}",
                operation, shape_a, shape_b, reason
            ),

            KernelError::DimensionMismatch {
                operation,
                expected,
                actual,
                context,
            } => write!(
                f,
                "{}: dimension mismatch - expected {:?}, got {:?}. {}",
                operation, expected, actual, context
            ),

            KernelError::IndexOutOfRange {
                operation,
                index,
                bound,
                row,
                column,
            } => write!(
                f,
                "{}: index {} at position ({}, {}) is outside the valid range [0, {})",
                operation, index, row, column, bound
            ),

            KernelError::EmptyInput {
                operation,
                parameter,
            } => write!(
                f,
                "{}: empty input not allowed for parameter '{}'",
                operation, parameter
            ),

            KernelError::OperationError { operation, message } => {
                write!(f, "{}: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create an invalid axis error
    pub fn invalid_axis(axis: isize, rank: usize, context: impl Into<String>) -> Self {
        KernelError::InvalidAxis {
            axis,
            rank,
            context: context.into(),
        }
    }

    /// Create an unsupported index value error
    pub fn unsupported_index_value(
        operation: impl Into<String>,
        value: usize,
        index_dtype: &'static str,
    ) -> Self {
        KernelError::UnsupportedIndexValue {
            operation: operation.into(),
            value,
            index_dtype,
        }
    }

    /// Create an incompatible shapes error
    pub fn incompatible_shapes(
        operation: impl Into<String>,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: impl Into<String>,
    ) -> Self {
        KernelError::IncompatibleShapes {
            operation: operation.into(),
            shape_a,
            shape_b,
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: impl Into<String>,
    ) -> Self {
        KernelError::DimensionMismatch {
            operation: operation.into(),
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(
        operation: impl Into<String>,
        index: i64,
        bound: usize,
        row: usize,
        column: usize,
    ) -> Self {
        KernelError::IndexOutOfRange {
            operation: operation.into(),
            index,
            bound,
            row,
            column,
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        KernelError::EmptyInput {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a generic operation error
    pub fn operation_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        KernelError::OperationError {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
