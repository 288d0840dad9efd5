//! NdArray - Dense N-Dimensional Array Base
//!
//! The `NdArray` struct is the storage layer every Lamina array type is
//! built on: a single owned, contiguous, row-major `f32` buffer plus a
//! shape descriptor. `Vector`, `Matrix`, and `Tensor` wrap it and add
//! rank-specific operations; everything here is rank-agnostic.
//!
//! The central invariant is `data.len() == numel(shape)` after every
//! public mutating operation returns. All validation happens before the
//! first element is written, so a failed operation leaves the array
//! untouched.
//!
//! # Key Features
//! - Flat row-major storage with per-axis and whole-buffer indexing
//! - Negative indices count from the end of their axis
//! - Pad-or-truncate reshape that preserves the overlapping region
//! - Inclusive-range slicing driven by an odometer cursor
//! - In-place elementwise arithmetic and randomization
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use core::fmt;

use lamina_core::error::{Error, Result};
use lamina_core::random;

use crate::shape::{
    flat_index, flat_offset, numel, range_volume, validate_range, validate_shape, wrap_index,
    RangeCursor, Shape,
};

/// Comparison tolerance shared by the unit/orthogonality predicates.
pub const EPSILON: f32 = 1e-5;

// =============================================================================
// NdArray Struct
// =============================================================================

/// A dense N-dimensional array of `f32` values.
///
/// The buffer is row-major: the last axis varies fastest. Rank is fixed
/// at construction; `reshape` replaces extents but never the axis count.
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    /// Flat element buffer, row-major.
    data: Vec<f32>,
    /// Per-axis extents; `data.len()` always equals their product.
    shape: Shape,
}

impl NdArray {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates an empty rank-1 array (shape `[0]`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            shape: Shape::from_slice(&[0]),
        }
    }

    /// Creates an array from a flat buffer and an explicit shape.
    ///
    /// # Arguments
    /// * `data` - Flattened values in row-major order
    /// * `shape` - Target shape; its element count must equal `data.len()`
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Result<Self> {
        validate_shape(shape)?;

        let total = numel(shape);
        if data.len() != total {
            return Err(Error::DataLengthMismatch {
                expected: total,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            shape: Shape::from_slice(shape),
        })
    }

    /// Creates an array filled with a single value.
    pub fn from_elem(shape: &[usize], value: f32) -> Result<Self> {
        validate_shape(shape)?;
        Ok(Self {
            data: vec![value; numel(shape)],
            shape: Shape::from_slice(shape),
        })
    }

    /// Creates an array of zeros.
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::from_elem(shape, 0.0)
    }

    /// Creates an array of ones.
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Self::from_elem(shape, 1.0)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the shape of the array.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns a defensive copy of the shape.
    #[must_use]
    pub fn shape_vec(&self) -> Vec<usize> {
        self.shape.to_vec()
    }

    /// Returns the number of axes.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // Data Access
    // =========================================================================

    /// Returns the flat buffer.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the flat buffer mutably.
    ///
    /// Writes through this slice cannot break the shape invariant since
    /// the length is untouchable through a slice.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns an owned copy of the flat buffer.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Returns the element at a flat index.
    ///
    /// A negative index counts from the end of the buffer.
    pub fn get_flat(&self, index: isize) -> Result<f32> {
        let idx = wrap_index(index, self.data.len())?;
        Ok(self.data[idx])
    }

    /// Sets the element at a flat index.
    pub fn set_flat(&mut self, index: isize, value: f32) -> Result<()> {
        let idx = wrap_index(index, self.data.len())?;
        self.data[idx] = value;
        Ok(())
    }

    /// Returns the element at a multi-dimensional index.
    ///
    /// Negative components wrap against their own axis extent.
    pub fn get(&self, indices: &[isize]) -> Result<f32> {
        let idx = flat_index(indices, &self.shape)?;
        Ok(self.data[idx])
    }

    /// Sets the element at a multi-dimensional index.
    pub fn set(&mut self, indices: &[isize], value: f32) -> Result<()> {
        let idx = flat_index(indices, &self.shape)?;
        self.data[idx] = value;
        Ok(())
    }

    // =========================================================================
    // Shape Operations
    // =========================================================================

    /// Reshapes the array in place, zero-padding grown regions and
    /// truncating shrunk ones.
    ///
    /// The new shape must have the same rank. Every position of the new
    /// buffer takes the value at the same multi-index of the old array
    /// when that index is in bounds for the old shape, and 0 otherwise.
    /// This is an out-of-place recompute of the buffer, not a stride
    /// reinterpretation: per-axis overlap decides what survives.
    pub fn reshape(&mut self, new_shape: &[usize]) -> Result<()> {
        validate_shape(new_shape)?;
        if new_shape.len() != self.shape.len() {
            return Err(Error::rank_mismatch(self.shape.len(), new_shape.len()));
        }

        let total = numel(new_shape);
        let mut data = vec![0.0; total];

        if total > 0 {
            let range: Vec<(usize, usize)> =
                new_shape.iter().map(|&s| (0, s - 1)).collect();
            let mut cursor = RangeCursor::new(&range);
            for slot in &mut data {
                let coords = cursor.coords();
                let in_bounds = coords
                    .iter()
                    .zip(self.shape.iter())
                    .all(|(&c, &s)| c < s);
                if in_bounds {
                    *slot = self.data[flat_offset(coords, &self.shape)];
                }
                cursor.advance();
            }
        }

        self.data = data;
        self.shape = Shape::from_slice(new_shape);
        Ok(())
    }

    /// Replaces this array's contents with a deep copy of another array
    /// of the same rank.
    pub fn copy_from(&mut self, other: &NdArray) -> Result<()> {
        if other.rank() != self.rank() {
            return Err(Error::rank_mismatch(self.rank(), other.rank()));
        }

        self.data = other.data.clone();
        self.shape = other.shape.clone();
        Ok(())
    }

    /// Overwrites every element with a value.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Applies a scalar transform to every element in place.
    ///
    /// This is the hook through which derivative/integral glue consumes
    /// the array without knowing its rank.
    pub fn apply(&mut self, f: impl Fn(f32) -> f32) {
        for x in &mut self.data {
            *x = f(*x);
        }
    }

    // =========================================================================
    // Slicing
    // =========================================================================

    /// Copies out the elements covered by one inclusive `(lo, hi)` pair
    /// per axis, row-major, last axis fastest.
    pub fn get_slice(&self, range: &[(usize, usize)]) -> Result<Vec<f32>> {
        validate_range(range, &self.shape, self.data.len())?;

        let volume = range_volume(range);
        let mut slice = Vec::with_capacity(volume);
        let mut cursor = RangeCursor::new(range);
        for _ in 0..volume {
            slice.push(self.data[flat_offset(cursor.coords(), &self.shape)]);
            cursor.advance();
        }

        Ok(slice)
    }

    /// Writes flat data into the region covered by one inclusive
    /// `(lo, hi)` pair per axis, in the same order `get_slice` reads.
    ///
    /// All validation happens before the first write.
    pub fn set_slice(&mut self, data: &[f32], range: &[(usize, usize)]) -> Result<()> {
        validate_range(range, &self.shape, self.data.len())?;

        let volume = range_volume(range);
        if data.len() != volume {
            return Err(Error::DataLengthMismatch {
                expected: volume,
                actual: data.len(),
            });
        }

        let mut cursor = RangeCursor::new(range);
        for &value in data {
            self.data[flat_offset(cursor.coords(), &self.shape)] = value;
            cursor.advance();
        }

        Ok(())
    }

    // =========================================================================
    // Elementwise Arithmetic
    // =========================================================================

    fn validate_same_shape(&self, other: &NdArray) -> Result<()> {
        if self.shape != other.shape {
            return Err(Error::shape_mismatch(&self.shape, &other.shape));
        }
        Ok(())
    }

    /// Adds another array elementwise, in place. Shapes must match.
    pub fn add_assign(&mut self, other: &NdArray) -> Result<()> {
        self.validate_same_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// Subtracts another array elementwise, in place. Shapes must match.
    pub fn sub_assign(&mut self, other: &NdArray) -> Result<()> {
        self.validate_same_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a -= b;
        }
        Ok(())
    }

    /// Multiplies by another array elementwise (Hadamard product), in
    /// place. Shapes must match.
    pub fn hadamard_assign(&mut self, other: &NdArray) -> Result<()> {
        self.validate_same_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a *= b;
        }
        Ok(())
    }

    /// Multiplies every element by a scalar.
    pub fn scale(&mut self, c: f32) {
        for x in &mut self.data {
            *x *= c;
        }
    }

    /// Negates every element.
    pub fn negate(&mut self) {
        self.scale(-1.0);
    }

    // =========================================================================
    // Randomization
    // =========================================================================

    /// Fills the array with uniform samples in `[min, max)`.
    pub fn randomize(&mut self, min: f32, max: f32) {
        for x in &mut self.data {
            *x = random::uniform(min, max);
        }
    }

    /// Fills the array with uniform samples using per-element bounds.
    ///
    /// Both bound arrays must match this array's shape.
    pub fn randomize_with(&mut self, min: &NdArray, max: &NdArray) -> Result<()> {
        self.validate_same_shape(min)?;
        self.validate_same_shape(max)?;

        for (i, x) in self.data.iter_mut().enumerate() {
            *x = random::uniform(min.data[i], max.data[i]);
        }
        Ok(())
    }

    /// Fills the array with normal samples of the given mean and
    /// standard deviation.
    pub fn randomize_normal(&mut self, mean: f32, std_dev: f32) {
        for x in &mut self.data {
            *x = random::normal(mean, std_dev);
        }
    }

    /// Fills the array with normal samples using per-element parameters.
    ///
    /// Both parameter arrays must match this array's shape.
    pub fn randomize_normal_with(&mut self, mean: &NdArray, std_dev: &NdArray) -> Result<()> {
        self.validate_same_shape(mean)?;
        self.validate_same_shape(std_dev)?;

        for (i, x) in self.data.iter_mut().enumerate() {
            *x = random::normal(mean.data[i], std_dev.data[i]);
        }
        Ok(())
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Returns true if the other array has the same rank, the same
    /// extent on every axis, and exactly equal elements.
    #[must_use]
    pub fn content_equals(&self, other: &NdArray) -> bool {
        if self.shape.len() != other.shape.len() {
            return false;
        }
        if self.shape != other.shape {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a == b)
    }
}

impl Default for NdArray {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

fn fmt_axis(f: &mut fmt::Formatter<'_>, data: &[f32], shape: &[usize]) -> fmt::Result {
    write!(f, "[")?;
    if shape.len() == 1 {
        for (i, value) in data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
    } else {
        let inner = numel(&shape[1..]);
        for i in 0..shape[0] {
            if i > 0 {
                write!(f, ", ")?;
            }
            fmt_axis(f, &data[i * inner..(i + 1) * inner], &shape[1..])?;
        }
    }
    write!(f, "]")
}

impl fmt::Display for NdArray {
    /// Renders nested bracket notation matching the rank, e.g. a 2x2
    /// array as `[[a, b], [c, d]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_axis(f, &self.data, &self.shape)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NdArray {
        NdArray::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap()
    }

    #[test]
    fn test_new_is_empty_rank1() {
        let a = NdArray::new();
        assert_eq!(a.shape(), &[0]);
        assert_eq!(a.rank(), 1);
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn test_from_vec() {
        let a = sample();
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.len(), 6);
        assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_vec_rejects_bad_length() {
        assert!(matches!(
            NdArray::from_vec(vec![1.0, 2.0], &[2, 3]),
            Err(Error::DataLengthMismatch {
                expected: 6,
                actual: 2
            })
        ));
        assert_eq!(NdArray::from_vec(vec![], &[]), Err(Error::EmptyShape));
    }

    #[test]
    fn test_length_matches_shape_product() {
        for shape in [&[4][..], &[2, 2][..], &[2, 3, 4][..], &[1, 0, 5][..]] {
            let a = NdArray::zeros(shape).unwrap();
            assert_eq!(a.len(), numel(shape));
            assert_eq!(a.data().len(), a.len());
        }
    }

    #[test]
    fn test_flat_access_wraps_negative() {
        let mut a = sample();
        assert_eq!(a.get_flat(0).unwrap(), 1.0);
        assert_eq!(a.get_flat(-1).unwrap(), 6.0);
        assert_eq!(a.get_flat(-6).unwrap(), 1.0);
        assert!(a.get_flat(6).is_err());
        assert!(a.get_flat(-7).is_err());

        a.set_flat(-2, 50.0).unwrap();
        assert_eq!(a.get_flat(4).unwrap(), 50.0);
    }

    #[test]
    fn test_multi_index_access() {
        let mut a = sample();
        assert_eq!(a.get(&[0, 0]).unwrap(), 1.0);
        assert_eq!(a.get(&[1, 2]).unwrap(), 6.0);
        assert_eq!(a.get(&[-1, -1]).unwrap(), 6.0);
        assert_eq!(a.get(&[-2, 1]).unwrap(), 2.0);

        a.set(&[1, 0], 40.0).unwrap();
        assert_eq!(a.get_flat(3).unwrap(), 40.0);

        assert!(a.get(&[2, 0]).is_err());
        assert!(a.get(&[0, 0, 0]).is_err());
    }

    #[test]
    fn test_reshape_grow_pads_with_zeros() {
        let mut a = sample();
        a.reshape(&[3, 3]).unwrap();
        assert_eq!(a.shape(), &[3, 3]);
        // Original 2x3 block survives, the new row is zero.
        assert_eq!(
            a.data(),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_reshape_shrink_truncates_per_axis() {
        let mut a = sample();
        a.reshape(&[2, 2]).unwrap();
        // Column 2 is dropped from each row, not the tail of the buffer.
        assert_eq!(a.data(), &[1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_reshape_roundtrip_lossless() {
        let mut a = sample();
        let original = a.clone();
        a.reshape(&[4, 4]).unwrap();
        a.reshape(&[2, 3]).unwrap();
        assert!(a.content_equals(&original));
    }

    #[test]
    fn test_reshape_roundtrip_lossy() {
        let mut a = sample();
        a.reshape(&[2, 2]).unwrap();
        a.reshape(&[2, 3]).unwrap();
        // The truncated column is gone for good.
        assert_eq!(a.data(), &[1.0, 2.0, 0.0, 4.0, 5.0, 0.0]);
    }

    #[test]
    fn test_reshape_rejects_rank_change() {
        let mut a = sample();
        assert!(matches!(
            a.reshape(&[6]),
            Err(Error::RankMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_copy_from_is_deep() {
        let a = sample();
        let mut b = NdArray::zeros(&[1, 1]).unwrap();
        b.copy_from(&a).unwrap();
        assert!(b.content_equals(&a));

        let mut c = a.clone();
        c.set_flat(0, 99.0).unwrap();
        // The copy does not chase the source.
        assert_eq!(b.get_flat(0).unwrap(), 1.0);

        let mut wrong_rank = NdArray::zeros(&[6]).unwrap();
        assert!(wrong_rank.copy_from(&a).is_err());
    }

    #[test]
    fn test_fill_and_apply() {
        let mut a = sample();
        a.fill(2.0);
        assert!(a.data().iter().all(|&x| x == 2.0));

        a.apply(|x| x * x + 1.0);
        assert!(a.data().iter().all(|&x| x == 5.0));
    }

    #[test]
    fn test_get_slice_row_major() {
        let a = NdArray::from_vec((0..24).map(|i| i as f32).collect(), &[2, 3, 4]).unwrap();
        // Middle 1x2x2 block.
        let s = a.get_slice(&[(1, 1), (0, 1), (1, 2)]).unwrap();
        assert_eq!(s, vec![13.0, 14.0, 17.0, 18.0]);
    }

    #[test]
    fn test_set_slice_writes_in_read_order() {
        let mut a = NdArray::zeros(&[3, 3]).unwrap();
        a.set_slice(&[1.0, 2.0, 3.0, 4.0], &[(1, 2), (1, 2)]).unwrap();
        assert_eq!(
            a.data(),
            &[0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 3.0, 4.0]
        );

        // Round trip.
        assert_eq!(
            a.get_slice(&[(1, 2), (1, 2)]).unwrap(),
            vec![1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_set_slice_validates_before_writing() {
        let mut a = NdArray::ones(&[2, 2]).unwrap();
        let before = a.clone();
        assert!(a.set_slice(&[9.0], &[(0, 1), (0, 1)]).is_err());
        assert!(a.set_slice(&[9.0, 9.0], &[(0, 1)]).is_err());
        assert!(a.content_equals(&before));
    }

    #[test]
    fn test_add_sub_roundtrip() {
        let mut a = sample();
        let original = a.clone();
        let b = NdArray::from_vec(vec![0.5; 6], &[2, 3]).unwrap();

        a.add_assign(&b).unwrap();
        assert_eq!(a.get_flat(0).unwrap(), 1.5);
        a.sub_assign(&b).unwrap();
        for i in 0..6 {
            let i = i as isize;
            assert!((a.get_flat(i).unwrap() - original.get_flat(i).unwrap()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_elementwise_rejects_shape_mismatch() {
        let mut a = sample();
        let b = NdArray::zeros(&[3, 2]).unwrap();
        assert!(matches!(
            a.add_assign(&b),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(a.sub_assign(&b).is_err());
        assert!(a.hadamard_assign(&b).is_err());
    }

    #[test]
    fn test_hadamard() {
        let mut a = sample();
        let b = sample();
        a.hadamard_assign(&b).unwrap();
        assert_eq!(a.data(), &[1.0, 4.0, 9.0, 16.0, 25.0, 36.0]);
    }

    #[test]
    fn test_double_negation_is_identity() {
        let mut a = sample();
        let original = a.clone();
        a.negate();
        a.negate();
        assert!(a.content_equals(&original));
    }

    #[test]
    fn test_content_equals() {
        let a = sample();
        let mut b = a.clone();
        assert!(a.content_equals(&b));

        b.set_flat(2, 9.0).unwrap();
        assert!(!a.content_equals(&b));

        // Same data, different shape.
        let c = NdArray::from_vec(a.to_vec(), &[3, 2]).unwrap();
        assert!(!a.content_equals(&c));

        // Same data, different rank.
        let d = NdArray::from_vec(a.to_vec(), &[6]).unwrap();
        assert!(!a.content_equals(&d));
    }

    #[test]
    fn test_randomize_bounds() {
        let mut a = NdArray::zeros(&[10, 10]).unwrap();
        a.randomize(-2.0, 2.0);
        assert!(a.data().iter().all(|&x| (-2.0..2.0).contains(&x)));
    }

    #[test]
    fn test_randomize_with_per_element_bounds() {
        let mut a = NdArray::zeros(&[50]).unwrap();
        let min = NdArray::from_elem(&[50], 10.0).unwrap();
        let max = NdArray::from_elem(&[50], 11.0).unwrap();
        a.randomize_with(&min, &max).unwrap();
        assert!(a.data().iter().all(|&x| (10.0..11.0).contains(&x)));

        let wrong = NdArray::zeros(&[49]).unwrap();
        assert!(a.randomize_with(&wrong, &max).is_err());
    }

    #[test]
    fn test_display_nested_brackets() {
        let a = NdArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        assert_eq!(a.to_string(), "[[1, 2], [3, 4]]");

        let v = NdArray::from_vec(vec![1.5, 2.5], &[2]).unwrap();
        assert_eq!(v.to_string(), "[1.5, 2.5]");

        let t = NdArray::zeros(&[2, 1, 2]).unwrap();
        assert_eq!(t.to_string(), "[[[0, 0]], [[0, 0]]]");
    }
}
