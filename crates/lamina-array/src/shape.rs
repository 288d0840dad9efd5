//! Shape and Index Arithmetic - Array Dimension Management
//!
//! Provides the shape representation shared by every array type, the
//! row-major index translation (with negative count-from-end indices),
//! slice-range validation, and the odometer cursor that walks the
//! Cartesian product of per-axis inclusive ranges.
//!
//! # Key Features
//! - Efficient shape representation with small-vector optimization
//! - Row-major flat-index translation with per-axis wrapping
//! - Inclusive slice-range validation
//! - Odometer-style traversal, last axis fastest
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use smallvec::SmallVec;

use lamina_core::error::{Error, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Shape type - per-axis extents of an array.
/// Uses `SmallVec` for stack allocation of small shapes (up to 6 axes).
pub type Shape = SmallVec<[usize; 6]>;

// =============================================================================
// Shape Utilities
// =============================================================================

/// Computes the total number of elements from a shape.
///
/// The empty product is 1; any zero axis makes the total 0.
#[must_use]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Validates that a shape has at least one axis.
///
/// Axis extents are `usize`, so negative entries are unrepresentable;
/// the only dynamic condition left is rank >= 1.
pub fn validate_shape(shape: &[usize]) -> Result<()> {
    if shape.is_empty() {
        return Err(Error::EmptyShape);
    }
    Ok(())
}

/// Wraps a possibly-negative index against a buffer length.
///
/// A negative index counts from the end (`index + size`); the result
/// must land in `[0, size)`.
pub fn wrap_index(index: isize, size: usize) -> Result<usize> {
    let wrapped = if index < 0 {
        index + size as isize
    } else {
        index
    };

    if wrapped < 0 || wrapped as usize >= size {
        return Err(Error::IndexOutOfBounds {
            index: wrapped,
            size,
        });
    }

    Ok(wrapped as usize)
}

/// Wraps a possibly-negative index against a single axis extent.
pub fn wrap_axis_index(axis: usize, index: isize, size: usize) -> Result<usize> {
    let wrapped = if index < 0 {
        index + size as isize
    } else {
        index
    };

    if wrapped < 0 || wrapped as usize >= size {
        return Err(Error::AxisIndexOutOfBounds {
            axis,
            index: wrapped,
            size,
        });
    }

    Ok(wrapped as usize)
}

/// Computes the row-major flat index for a multi-dimensional index.
///
/// Each component may be negative, in which case it wraps against its
/// own axis extent. For indices `[i0, .., i(r-1)]` and shape
/// `[s0, .., s(r-1)]` the flat index is
/// `i(r-1) + sum(i_k * product(s_(k+1)..s(r-1)))`.
pub fn flat_index(indices: &[isize], shape: &[usize]) -> Result<usize> {
    if indices.len() != shape.len() {
        return Err(Error::rank_mismatch(shape.len(), indices.len()));
    }

    let mut index = 0;
    let mut stride = 1;
    for axis in (0..shape.len()).rev() {
        let i = wrap_axis_index(axis, indices[axis], shape[axis])?;
        index += i * stride;
        stride *= shape[axis];
    }

    Ok(index)
}

/// Computes the row-major flat offset for in-bounds coordinates.
///
/// Callers must have validated the coordinates against the shape.
#[must_use]
pub(crate) fn flat_offset(coords: &[usize], shape: &[usize]) -> usize {
    let mut index = 0;
    let mut stride = 1;
    for axis in (0..shape.len()).rev() {
        index += coords[axis] * stride;
        stride *= shape[axis];
    }
    index
}

// =============================================================================
// Slice Ranges
// =============================================================================

/// Validates one inclusive `(lo, hi)` pair per axis against a shape.
///
/// The range rank must equal the shape rank; each axis requires
/// `lo <= hi`, `hi` within the axis, a length no larger than the axis
/// extent, and the total volume no larger than the buffer length.
pub fn validate_range(range: &[(usize, usize)], shape: &[usize], len: usize) -> Result<()> {
    if range.len() != shape.len() {
        return Err(Error::rank_mismatch(shape.len(), range.len()));
    }

    let mut volume = 1;
    for (axis, &(lo, hi)) in range.iter().enumerate() {
        if hi < lo {
            return Err(Error::InvalidRange { axis, lo, hi });
        }

        let axis_len = (hi - lo) + 1;
        if axis_len > shape[axis] {
            return Err(Error::RangeExceedsAxis {
                axis,
                len: axis_len,
                size: shape[axis],
            });
        }

        if hi >= shape[axis] {
            return Err(Error::AxisIndexOutOfBounds {
                axis,
                index: hi as isize,
                size: shape[axis],
            });
        }

        volume *= axis_len;
    }

    if volume > len {
        return Err(Error::RangeVolumeExceedsLength { volume, len });
    }

    Ok(())
}

/// Computes the element count of an already-validated range.
#[must_use]
pub fn range_volume(range: &[(usize, usize)]) -> usize {
    range.iter().map(|&(lo, hi)| (hi - lo) + 1).product()
}

// =============================================================================
// Odometer Cursor
// =============================================================================

/// Walks the Cartesian product of per-axis inclusive ranges in row-major
/// order, last axis fastest.
///
/// Every axis counter starts at its low bound; `advance` increments the
/// last axis and carries into more-significant axes when a counter
/// passes its high bound.
pub(crate) struct RangeCursor {
    range: Vec<(usize, usize)>,
    coords: Vec<usize>,
}

impl RangeCursor {
    /// Creates a cursor positioned at the low corner of the range.
    pub(crate) fn new(range: &[(usize, usize)]) -> Self {
        Self {
            range: range.to_vec(),
            coords: range.iter().map(|&(lo, _)| lo).collect(),
        }
    }

    /// The current coordinates.
    pub(crate) fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// Steps to the next coordinate tuple, carrying as needed.
    pub(crate) fn advance(&mut self) {
        for axis in (0..self.coords.len()).rev() {
            self.coords[axis] += 1;
            if self.coords[axis] <= self.range[axis].1 {
                return;
            }
            self.coords[axis] = self.range[axis].0;
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
    fn test_numel() {
        assert_eq!(numel(&[2, 3, 4]), 24);
        assert_eq!(numel(&[5]), 5);
        assert_eq!(numel(&[3, 0, 2]), 0);
    }

    #[test]
    fn test_validate_shape() {
        assert!(validate_shape(&[1]).is_ok());
        assert!(validate_shape(&[0]).is_ok());
        assert_eq!(validate_shape(&[]), Err(Error::EmptyShape));
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, 4).unwrap(), 0);
        assert_eq!(wrap_index(3, 4).unwrap(), 3);
        assert_eq!(wrap_index(-1, 4).unwrap(), 3);
        assert_eq!(wrap_index(-4, 4).unwrap(), 0);

        assert!(wrap_index(4, 4).is_err());
        assert!(wrap_index(-5, 4).is_err());
    }

    #[test]
    fn test_flat_index() {
        // 2x3 matrix, row-major.
        assert_eq!(flat_index(&[0, 0], &[2, 3]).unwrap(), 0);
        assert_eq!(flat_index(&[0, 2], &[2, 3]).unwrap(), 2);
        assert_eq!(flat_index(&[1, 0], &[2, 3]).unwrap(), 3);
        assert_eq!(flat_index(&[1, 2], &[2, 3]).unwrap(), 5);

        // Negative components wrap per axis.
        assert_eq!(flat_index(&[-1, -1], &[2, 3]).unwrap(), 5);
        assert_eq!(flat_index(&[-2, 1], &[2, 3]).unwrap(), 1);

        // Rank 3.
        assert_eq!(flat_index(&[1, 2, 3], &[2, 3, 4]).unwrap(), 23);
    }

    #[test]
    fn test_flat_index_errors() {
        assert!(matches!(
            flat_index(&[0], &[2, 3]),
            Err(Error::RankMismatch { .. })
        ));
        assert!(matches!(
            flat_index(&[0, 3], &[2, 3]),
            Err(Error::AxisIndexOutOfBounds { axis: 1, .. })
        ));
        assert!(matches!(
            flat_index(&[-3, 0], &[2, 3]),
            Err(Error::AxisIndexOutOfBounds { axis: 0, .. })
        ));
    }

    #[test]
    fn test_validate_range() {
        let shape = [3, 4];
        assert!(validate_range(&[(0, 2), (0, 3)], &shape, 12).is_ok());
        assert!(validate_range(&[(1, 1), (2, 3)], &shape, 12).is_ok());

        assert!(matches!(
            validate_range(&[(0, 2)], &shape, 12),
            Err(Error::RankMismatch { .. })
        ));
        assert!(matches!(
            validate_range(&[(2, 1), (0, 3)], &shape, 12),
            Err(Error::InvalidRange { axis: 0, .. })
        ));
        assert!(matches!(
            validate_range(&[(0, 2), (0, 4)], &shape, 12),
            Err(Error::RangeExceedsAxis { axis: 1, .. })
        ));
        assert!(matches!(
            validate_range(&[(1, 3), (0, 1)], &shape, 12),
            Err(Error::AxisIndexOutOfBounds { axis: 0, .. })
        ));
    }

    #[test]
    fn test_range_cursor_order() {
        // 2x2 block out of the middle of a larger space.
        let mut cursor = RangeCursor::new(&[(1, 2), (0, 1)]);
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(cursor.coords().to_vec());
            cursor.advance();
        }
        assert_eq!(
            seen,
            vec![vec![1, 0], vec![1, 1], vec![2, 0], vec![2, 1]]
        );
        // The cursor wrapped back to the low corner.
        assert_eq!(cursor.coords(), &[1, 0]);
    }
}
