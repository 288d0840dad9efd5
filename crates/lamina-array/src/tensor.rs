//! Tensor - Arbitrary-Rank Specialization
//!
//! A `Tensor` is the generic instantiation of the `NdArray` base: no
//! extra state, no rank restriction. It exists so the shared storage,
//! indexing, and arithmetic machinery is exercised at rank 3 and above
//! through the same factory surface `Vector` and `Matrix` offer.
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use core::ops::{Add, Deref, DerefMut, Mul, Neg, Sub};

use lamina_core::error::Result;

use crate::array::NdArray;

// =============================================================================
// Tensor Struct
// =============================================================================

/// A dense array of `f32` values with arbitrary fixed rank.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    array: NdArray,
}

impl Tensor {
    /// Creates an empty rank-1 tensor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            array: NdArray::new(),
        }
    }

    /// Creates a tensor from a flat buffer and an explicit shape.
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Result<Self> {
        Ok(Self {
            array: NdArray::from_vec(data, shape)?,
        })
    }

    /// Creates a tensor of zeros.
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Ok(Self {
            array: NdArray::zeros(shape)?,
        })
    }

    /// Creates a tensor of ones.
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Ok(Self {
            array: NdArray::ones(shape)?,
        })
    }

    /// Creates a tensor of uniform samples in `[min, max)`.
    pub fn random(min: f32, max: f32, shape: &[usize]) -> Result<Self> {
        let mut t = Self::zeros(shape)?;
        t.array.randomize(min, max);
        Ok(t)
    }

    /// Creates a tensor of uniform samples with per-element bounds.
    pub fn random_between(min: &Tensor, max: &Tensor) -> Result<Self> {
        let mut t = Self::zeros(min.shape())?;
        t.array.randomize_with(&min.array, &max.array)?;
        Ok(t)
    }

    /// Creates a tensor of normal samples.
    pub fn random_normal(mean: f32, std_dev: f32, shape: &[usize]) -> Result<Self> {
        let mut t = Self::zeros(shape)?;
        t.array.randomize_normal(mean, std_dev);
        Ok(t)
    }

    /// Creates a tensor of normal samples with per-element parameters.
    pub fn random_normal_between(mean: &Tensor, std_dev: &Tensor) -> Result<Self> {
        let mut t = Self::zeros(mean.shape())?;
        t.array.randomize_normal_with(&mean.array, &std_dev.array)?;
        Ok(t)
    }

    /// Returns the underlying array.
    #[must_use]
    pub fn as_array(&self) -> &NdArray {
        &self.array
    }

    /// Returns the underlying array mutably.
    pub fn as_array_mut(&mut self) -> &mut NdArray {
        &mut self.array
    }

    /// Resizes within the current rank, zero-padding or truncating.
    pub fn resize(&mut self, shape: &[usize]) -> Result<()> {
        self.array.reshape(shape)
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Returns the elementwise sum with another tensor.
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        let mut out = self.clone();
        out.array.add_assign(&other.array)?;
        Ok(out)
    }

    /// Returns the elementwise difference with another tensor.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor> {
        let mut out = self.clone();
        out.array.sub_assign(&other.array)?;
        Ok(out)
    }

    /// Returns the elementwise (Hadamard) product with another tensor.
    pub fn hadamard(&self, other: &Tensor) -> Result<Tensor> {
        let mut out = self.clone();
        out.array.hadamard_assign(&other.array)?;
        Ok(out)
    }

    /// Returns this tensor scaled by a constant.
    #[must_use]
    pub fn mul_scalar(&self, c: f32) -> Tensor {
        let mut out = self.clone();
        out.array.scale(c);
        out
    }

    /// Returns this tensor negated.
    #[must_use]
    pub fn neg(&self) -> Tensor {
        self.mul_scalar(-1.0)
    }
}

impl Default for Tensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Tensor {
    type Target = NdArray;

    fn deref(&self) -> &NdArray {
        &self.array
    }
}

impl DerefMut for Tensor {
    fn deref_mut(&mut self) -> &mut NdArray {
        &mut self.array
    }
}

// =============================================================================
// Operator Trait Implementations
// =============================================================================

impl Add for &Tensor {
    type Output = Tensor;

    fn add(self, other: Self) -> Self::Output {
        Tensor::add(self, other).expect("Addition failed")
    }
}

impl Sub for &Tensor {
    type Output = Tensor;

    fn sub(self, other: Self) -> Self::Output {
        Tensor::sub(self, other).expect("Subtraction failed")
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Self::Output {
        Tensor::neg(self)
    }
}

impl Mul<f32> for &Tensor {
    type Output = Tensor;

    fn mul(self, c: f32) -> Self::Output {
        self.mul_scalar(c)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_at_rank_3() {
        let z = Tensor::zeros(&[2, 3, 4]).unwrap();
        assert_eq!(z.rank(), 3);
        assert_eq!(z.len(), 24);
        assert!(z.data().iter().all(|&x| x == 0.0));

        let o = Tensor::ones(&[2, 2, 2]).unwrap();
        assert!(o.data().iter().all(|&x| x == 1.0));

        assert!(Tensor::zeros(&[]).is_err());
    }

    #[test]
    fn test_rank4_indexing() {
        let t = Tensor::from_vec((0..16).map(|i| i as f32).collect(), &[2, 2, 2, 2]).unwrap();
        assert_eq!(t.get(&[0, 0, 0, 0]).unwrap(), 0.0);
        assert_eq!(t.get(&[1, 1, 1, 1]).unwrap(), 15.0);
        assert_eq!(t.get(&[1, 0, 1, 0]).unwrap(), 10.0);
        assert_eq!(t.get(&[-1, -1, -1, -1]).unwrap(), 15.0);
    }

    #[test]
    fn test_arithmetic_at_rank_3() {
        let a = Tensor::ones(&[2, 2, 2]).unwrap();
        let b = a.mul_scalar(3.0);

        let sum = &a + &b;
        assert!(sum.data().iter().all(|&x| x == 4.0));

        let diff = &sum - &b;
        assert!(diff.content_equals(&a));

        let had = a.hadamard(&b).unwrap();
        assert!(had.content_equals(&b));

        let neg = -&a;
        assert!((-&neg).content_equals(&a));
    }

    #[test]
    fn test_shape_mismatch_at_rank_3() {
        let a = Tensor::ones(&[2, 2, 2]).unwrap();
        let b = Tensor::ones(&[2, 2, 3]).unwrap();
        assert!(a.add(&b).is_err());
        assert!(a.hadamard(&b).is_err());
    }

    #[test]
    fn test_resize_rank_3() {
        let mut t = Tensor::from_vec((0..8).map(|i| i as f32).collect(), &[2, 2, 2]).unwrap();
        t.resize(&[2, 2, 3]).unwrap();
        assert_eq!(
            t.data(),
            &[0.0, 1.0, 0.0, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 6.0, 7.0, 0.0]
        );

        // Rank changes stay rejected at every rank.
        assert!(t.resize(&[4, 3]).is_err());
    }

    #[test]
    fn test_random_tensor() {
        let t = Tensor::random(-1.0, 1.0, &[3, 3, 3]).unwrap();
        assert!(t.data().iter().all(|&x| (-1.0..1.0).contains(&x)));

        let n = Tensor::random_normal(0.0, 1.0, &[4, 4, 4]).unwrap();
        assert_eq!(n.len(), 64);
    }
}
