//! Vector - Rank-1 Specialization
//!
//! A `Vector` wraps the `NdArray` base with its rank pinned to 1 and
//! adds the inner-product family: dot and cross products, p-norms, and
//! the unit/orthogonality predicates.
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use core::ops::{Add, Deref, DerefMut, Mul, Neg, Sub};

use lamina_core::error::{Error, Result};

use crate::array::{NdArray, EPSILON};

// =============================================================================
// Vector Struct
// =============================================================================

/// A rank-1 dense array of `f32` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    array: NdArray,
}

impl Vector {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            array: NdArray::new(),
        }
    }

    /// Creates a vector from a slice of values.
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            array: NdArray::from_vec(data.to_vec(), &[data.len()])
                .expect("rank-1 shape always matches its own data length"),
        }
    }

    /// Creates a vector of `n` zeros.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            array: NdArray::zeros(&[n]).expect("rank-1 shape is never empty"),
        }
    }

    /// Creates a vector of `n` ones.
    #[must_use]
    pub fn ones(n: usize) -> Self {
        Self {
            array: NdArray::ones(&[n]).expect("rank-1 shape is never empty"),
        }
    }

    /// Creates a vector of `n` uniform samples in `[min, max)`.
    #[must_use]
    pub fn random(min: f32, max: f32, n: usize) -> Self {
        let mut v = Self::zeros(n);
        v.array.randomize(min, max);
        v
    }

    /// Creates a vector of uniform samples with per-element bounds.
    pub fn random_between(min: &Vector, max: &Vector) -> Result<Self> {
        let mut v = Self::zeros(min.len());
        v.array.randomize_with(&min.array, &max.array)?;
        Ok(v)
    }

    /// Creates a vector of `n` normal samples.
    #[must_use]
    pub fn random_normal(mean: f32, std_dev: f32, n: usize) -> Self {
        let mut v = Self::zeros(n);
        v.array.randomize_normal(mean, std_dev);
        v
    }

    /// Creates a vector of normal samples with per-element parameters.
    pub fn random_normal_between(mean: &Vector, std_dev: &Vector) -> Result<Self> {
        let mut v = Self::zeros(mean.len());
        v.array.randomize_normal_with(&mean.array, &std_dev.array)?;
        Ok(v)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Returns true if the vector has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
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

    /// Resizes to `n` components, zero-padding or truncating the tail.
    pub fn resize(&mut self, n: usize) {
        self.array
            .reshape(&[n])
            .expect("rank-1 reshape cannot change rank");
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Returns the dot product with another vector of the same length.
    pub fn dot(&self, other: &Vector) -> Result<f32> {
        if self.len() != other.len() {
            return Err(Error::shape_mismatch(self.shape(), other.shape()));
        }

        Ok(self
            .data()
            .iter()
            .zip(other.data().iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Returns the 3-D cross product; both vectors must have length 3.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        if self.len() != 3 || other.len() != 3 {
            return Err(Error::invalid_operation(format!(
                "cross product requires two length-3 vectors, got {} and {}",
                self.len(),
                other.len()
            )));
        }

        let a = self.data();
        let b = other.data();
        Ok(Vector::from_slice(&[
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    // =========================================================================
    // Norms
    // =========================================================================

    /// Returns the p-norm `(sum |x_i|^p)^(1/p)`.
    ///
    /// Accumulates in f64, as the intermediate powers overflow f32
    /// noticeably sooner than the result does.
    #[must_use]
    pub fn norm(&self, p: i32) -> f32 {
        let sum: f64 = self
            .data()
            .iter()
            .map(|&x| f64::from(x.abs()).powi(p))
            .sum();

        sum.powf(1.0 / f64::from(p)) as f32
    }

    /// Returns the Euclidean norm, `norm(2)`.
    #[must_use]
    pub fn euclid_norm(&self) -> f32 {
        self.norm(2)
    }

    /// Returns the maximum absolute component.
    #[must_use]
    pub fn max_norm(&self) -> f32 {
        self.data().iter().fold(0.0, |acc, &x| acc.max(x.abs()))
    }

    /// Returns this vector scaled to unit Euclidean length.
    ///
    /// The zero vector is not guarded; its unit is all-NaN, exactly as
    /// dividing by a zero norm implies.
    #[must_use]
    pub fn unit(&self) -> Vector {
        let norm = self.euclid_norm();
        let mut unit = self.clone();
        unit.array.scale(1.0 / norm);
        unit
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Returns true if the Euclidean norm is within `EPSILON` of 1.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        (1.0 - self.euclid_norm()).abs() < EPSILON
    }

    /// Returns true if the dot product with the other vector is within
    /// `EPSILON` of 0.
    pub fn is_orthogonal(&self, other: &Vector) -> Result<bool> {
        Ok(self.dot(other)?.abs() < EPSILON)
    }

    /// Returns true if the vectors are orthogonal and both unit length.
    pub fn is_orthonormal(&self, other: &Vector) -> Result<bool> {
        Ok(self.is_orthogonal(other)? && self.is_unit() && other.is_unit())
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Returns the elementwise sum with another vector.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        let mut out = self.clone();
        out.array.add_assign(&other.array)?;
        Ok(out)
    }

    /// Returns the elementwise difference with another vector.
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        let mut out = self.clone();
        out.array.sub_assign(&other.array)?;
        Ok(out)
    }

    /// Returns the elementwise (Hadamard) product with another vector.
    pub fn hadamard(&self, other: &Vector) -> Result<Vector> {
        let mut out = self.clone();
        out.array.hadamard_assign(&other.array)?;
        Ok(out)
    }

    /// Returns this vector scaled by a constant.
    #[must_use]
    pub fn mul_scalar(&self, c: f32) -> Vector {
        let mut out = self.clone();
        out.array.scale(c);
        out
    }

    /// Returns this vector negated.
    #[must_use]
    pub fn neg(&self) -> Vector {
        self.mul_scalar(-1.0)
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Vector {
    type Target = NdArray;

    fn deref(&self) -> &NdArray {
        &self.array
    }
}

impl DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut NdArray {
        &mut self.array
    }
}

// =============================================================================
// Operator Trait Implementations
// =============================================================================

impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: Self) -> Self::Output {
        Vector::add(self, other).expect("Addition failed")
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: Self) -> Self::Output {
        Vector::sub(self, other).expect("Subtraction failed")
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector::neg(self)
    }
}

impl Mul<f32> for &Vector {
    type Output = Vector;

    fn mul(self, c: f32) -> Self::Output {
        self.mul_scalar(c)
    }
}

/// Dot product, matching the mathematical `v1 * v2` convention.
impl Mul for &Vector {
    type Output = f32;

    fn mul(self, other: Self) -> Self::Output {
        self.dot(other).expect("Dot product failed")
    }
}

// =============================================================================
// Tests
// =============================================================================
