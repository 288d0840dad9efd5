//! Error Types - Lamina Core Error Handling
//!
//! Provides the unified error type for all operations within the Lamina
//! workspace, covering shape and rank validation, index bounds, slice
//! ranges, and the structural preconditions of the linear-algebra layer.
//!
//! # Key Features
//! - Unified error type for all Lamina operations
//! - Typed variants carrying the offending values for debugging
//! - Integration with `std::error::Error`
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// The main error type for Lamina operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A shape with no axes was supplied; every array has rank >= 1.
    #[error("Shape must have at least one axis")]
    EmptyShape,

    /// Operand shape differs from the receiver's shape where exact
    /// equality is required (elementwise operations).
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The expected shape.
        expected: Vec<usize>,
        /// The actual shape.
        actual: Vec<usize>,
    },

    /// Operand rank differs from the receiver's rank where equal rank is
    /// required (reshape, copy, slice ranges).
    #[error("Rank mismatch: expected {expected}, got {actual}")]
    RankMismatch {
        /// The expected rank.
        expected: usize,
        /// The actual rank.
        actual: usize,
    },

    /// Flat index outside the buffer, after negative-index wrapping.
    #[error("Index {index} out of bounds for length {size}")]
    IndexOutOfBounds {
        /// The offending index (post-wrap).
        index: isize,
        /// The buffer length.
        size: usize,
    },

    /// Per-axis index outside that axis's extent, after wrapping.
    #[error("Index {index} out of bounds for axis {axis} with size {size}")]
    AxisIndexOutOfBounds {
        /// The axis on which the bound was violated.
        axis: usize,
        /// The offending index (post-wrap).
        index: isize,
        /// The axis extent.
        size: usize,
    },

    /// Both indices of a 2D access were out of bounds.
    #[error("Row index {row} and column index {col} out of bounds for {rows}x{cols} matrix")]
    AxesOutOfBounds {
        /// The offending row index (post-wrap).
        row: isize,
        /// The row count.
        rows: usize,
        /// The offending column index (post-wrap).
        col: isize,
        /// The column count.
        cols: usize,
    },

    /// Matrix multiplication inner dimensions disagree.
    #[error("Dimension mismatch: left operand has {lhs} columns, right operand has {rhs} rows")]
    DimensionMismatch {
        /// Column count of the left operand.
        lhs: usize,
        /// Row count of the right operand.
        rhs: usize,
    },

    /// Operation requires a square matrix.
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// The row count.
        rows: usize,
        /// The column count.
        cols: usize,
    },

    /// A slice range has an inverted bound on some axis.
    #[error("Invalid range [{lo}, {hi}] on axis {axis}")]
    InvalidRange {
        /// The axis with the inverted bound.
        axis: usize,
        /// The low bound.
        lo: usize,
        /// The high bound.
        hi: usize,
    },

    /// A slice range reaches past the end of an axis.
    #[error("Range of length {len} exceeds axis {axis} with size {size}")]
    RangeExceedsAxis {
        /// The offending axis.
        axis: usize,
        /// The range length on that axis.
        len: usize,
        /// The axis extent.
        size: usize,
    },

    /// The total element count of a slice range exceeds the buffer length.
    #[error("Total range volume {volume} exceeds buffer length {len}")]
    RangeVolumeExceedsLength {
        /// The product of the per-axis range lengths.
        volume: usize,
        /// The buffer length.
        len: usize,
    },

    /// Supplied flat data does not match the element count it must fill.
    #[error("Data length mismatch: expected {expected} elements, got {actual}")]
    DataLengthMismatch {
        /// The required element count.
        expected: usize,
        /// The supplied element count.
        actual: usize,
    },

    /// Invalid operation for the given operands.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of why the operation is invalid.
        message: String,
    },
}

// =============================================================================
// Result Type
// =============================================================================

/// A specialized Result type for Lamina operations.
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Helper Functions
// =============================================================================

impl Error {
    /// Creates a new shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Creates a new rank mismatch error.
    #[must_use]
    pub fn rank_mismatch(expected: usize, actual: usize) -> Self {
        Self::RankMismatch { expected, actual }
    }

    /// Creates a new invalid operation error.
    #[must_use]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::shape_mismatch(&[2, 3], &[2, 4]);
        assert!(err.to_string().contains("Shape mismatch"));

        let err = Error::DimensionMismatch { lhs: 3, rhs: 4 };
        assert!(err.to_string().contains("3 columns"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::EmptyShape;
        let err2 = Error::EmptyShape;
        assert_eq!(err1, err2);
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            Error::rank_mismatch(2, 3),
            Error::RankMismatch {
                expected: 2,
                actual: 3
            }
        );
    }
}
