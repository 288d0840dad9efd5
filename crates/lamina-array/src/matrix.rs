//! Matrix - Rank-2 Specialization
//!
//! A `Matrix` wraps the `NdArray` base with its rank pinned to 2: `m`
//! rows by `n` columns, row-major, element `(i, j)` at flat index
//! `i * n + j`. On top of the shared storage it adds 2-D indexing with
//! per-axis negative wrapping, row/column extraction, transposition,
//! trace, determinant, the Frobenius norm, and the symmetry predicate.
//!
//! The multiplication kernels (naive, blocked, parallel, Strassen) live
//! in the `matmul` module and operate on these matrices' flat buffers.
//!
//! # Key Features
//! - Constructors from flat buffers and nested rows
//! - Zeros/ones/identity/diagonal factories
//! - 2-D access reporting exactly which axis went out of bounds
//! - Trace and cofactor-expansion determinant for square matrices
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use core::ops::{Add, Deref, DerefMut, Mul, Neg, Sub};

use lamina_core::error::{Error, Result};

use crate::array::NdArray;
use crate::vector::Vector;

// =============================================================================
// Matrix Struct
// =============================================================================

/// A rank-2 dense array of `f32` values, `rows x cols`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    array: NdArray,
}

impl Matrix {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates an empty 0x0 matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::zeros(0, 0)
    }

    /// Creates a matrix from a flat buffer in row-major order.
    ///
    /// # Arguments
    /// * `data` - Flattened values, `m * n` of them
    /// * `m` - Row count
    /// * `n` - Column count
    pub fn from_vec(data: Vec<f32>, m: usize, n: usize) -> Result<Self> {
        Ok(Self {
            array: NdArray::from_vec(data, &[m, n])?,
        })
    }

    /// Creates a matrix from nested rows; all rows must have equal length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let m = rows.len();
        let n = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(m * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::invalid_operation(format!(
                    "row {i} has length {}, expected {n}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Self::from_vec(data, m, n)
    }

    /// Creates an `m x n` matrix of zeros.
    #[must_use]
    pub fn zeros(m: usize, n: usize) -> Self {
        Self {
            array: NdArray::zeros(&[m, n]).expect("rank-2 shape is never empty"),
        }
    }

    /// Creates an `m x n` matrix of ones.
    #[must_use]
    pub fn ones(m: usize, n: usize) -> Self {
        Self {
            array: NdArray::ones(&[m, n]).expect("rank-2 shape is never empty"),
        }
    }

    /// Creates the `n x n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::zeros(n, n);
        for i in 0..n {
            matrix.array.data_mut()[i * n + i] = 1.0;
        }
        matrix
    }

    /// Creates an `m x n` matrix with a constant value on the leading
    /// diagonal (length `min(m, n)`) and zeros elsewhere.
    #[must_use]
    pub fn diag_elem(value: f32, m: usize, n: usize) -> Self {
        let mut matrix = Self::zeros(m, n);
        for i in 0..m.min(n) {
            matrix.array.data_mut()[i * n + i] = value;
        }
        matrix
    }

    /// Creates a matrix with the given values on the leading diagonal.
    ///
    /// `m` and `n` default to the value count; either may be larger to
    /// embed the diagonal in a bigger matrix, but not smaller.
    pub fn diag(values: &[f32], m: Option<usize>, n: Option<usize>) -> Result<Self> {
        let m = m.unwrap_or(values.len());
        let n = n.unwrap_or(values.len());

        if m < values.len() || n < values.len() {
            return Err(Error::invalid_operation(format!(
                "diagonal of length {} does not fit a {m}x{n} matrix",
                values.len()
            )));
        }

        let mut matrix = Self::zeros(m, n);
        for (i, &value) in values.iter().enumerate() {
            matrix.array.data_mut()[i * n + i] = value;
        }
        Ok(matrix)
    }

    /// Creates a diagonal matrix from a vector's components.
    pub fn diag_vector(v: &Vector, m: Option<usize>, n: Option<usize>) -> Result<Self> {
        Self::diag(v.data(), m, n)
    }

    /// Creates an `m x n` matrix of uniform samples in `[min, max)`.
    #[must_use]
    pub fn random(min: f32, max: f32, m: usize, n: usize) -> Self {
        let mut matrix = Self::zeros(m, n);
        matrix.array.randomize(min, max);
        matrix
    }

    /// Creates a matrix of uniform samples with per-element bounds.
    pub fn random_between(min: &Matrix, max: &Matrix) -> Result<Self> {
        let mut matrix = Self::zeros(min.rows(), min.cols());
        matrix.array.randomize_with(&min.array, &max.array)?;
        Ok(matrix)
    }

    /// Creates an `m x n` matrix of normal samples.
    #[must_use]
    pub fn random_normal(mean: f32, std_dev: f32, m: usize, n: usize) -> Self {
        let mut matrix = Self::zeros(m, n);
        matrix.array.randomize_normal(mean, std_dev);
        matrix
    }

    /// Creates a matrix of normal samples with per-element parameters.
    pub fn random_normal_between(mean: &Matrix, std_dev: &Matrix) -> Result<Self> {
        let mut matrix = Self::zeros(mean.rows(), mean.cols());
        matrix
            .array
            .randomize_normal_with(&mean.array, &std_dev.array)?;
        Ok(matrix)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.array.shape()[0]
    }

    /// Returns the column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.array.shape()[1]
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

    // =========================================================================
    // 2-D Access
    // =========================================================================

    fn wrap_2d(&self, i: isize, j: isize) -> Result<(usize, usize)> {
        let (rows, cols) = (self.rows(), self.cols());
        let wi = if i < 0 { i + rows as isize } else { i };
        let wj = if j < 0 { j + cols as isize } else { j };

        let i_bad = wi < 0 || wi as usize >= rows;
        let j_bad = wj < 0 || wj as usize >= cols;
        match (i_bad, j_bad) {
            (true, true) => Err(Error::AxesOutOfBounds {
                row: wi,
                rows,
                col: wj,
                cols,
            }),
            (true, false) => Err(Error::AxisIndexOutOfBounds {
                axis: 0,
                index: wi,
                size: rows,
            }),
            (false, true) => Err(Error::AxisIndexOutOfBounds {
                axis: 1,
                index: wj,
                size: cols,
            }),
            (false, false) => Ok((wi as usize, wj as usize)),
        }
    }

    /// Returns element `(i, j)`; negative indices wrap per axis.
    pub fn get(&self, i: isize, j: isize) -> Result<f32> {
        let (i, j) = self.wrap_2d(i, j)?;
        Ok(self.array.data()[i * self.cols() + j])
    }

    /// Sets element `(i, j)`; negative indices wrap per axis.
    pub fn set(&mut self, i: isize, j: isize, value: f32) -> Result<()> {
        let (i, j) = self.wrap_2d(i, j)?;
        let cols = self.cols();
        self.array.data_mut()[i * cols + j] = value;
        Ok(())
    }

    /// Returns row `i` as a new `1 x n` matrix.
    pub fn row(&self, i: isize) -> Result<Matrix> {
        let i = crate::shape::wrap_axis_index(0, i, self.rows())?;

        let n = self.cols();
        let data = self.array.data()[i * n..(i + 1) * n].to_vec();
        Matrix::from_vec(data, 1, n)
    }

    /// Returns column `j` as a new `m x 1` matrix.
    pub fn col(&self, j: isize) -> Result<Matrix> {
        let j = crate::shape::wrap_axis_index(1, j, self.cols())?;

        let (m, n) = (self.rows(), self.cols());
        let data: Vec<f32> = (0..m).map(|i| self.array.data()[i * n + j]).collect();
        Matrix::from_vec(data, m, 1)
    }

    /// Resizes to `m x n`, zero-padding or truncating per axis.
    pub fn resize(&mut self, m: usize, n: usize) {
        self.array
            .reshape(&[m, n])
            .expect("rank-2 reshape cannot change rank");
    }

    // =========================================================================
    // Linear Algebra
    // =========================================================================

    /// Returns the transpose as a new matrix.
    #[must_use]
    pub fn transpose(&self) -> Matrix {
        let (m, n) = (self.rows(), self.cols());
        let src = self.array.data();
        let mut dst = vec![0.0; src.len()];
        for i in 0..m {
            for j in 0..n {
                dst[j * m + i] = src[i * n + j];
            }
        }
        Matrix::from_vec(dst, n, m).expect("transpose preserves element count")
    }

    /// Returns the Frobenius norm, `sqrt(sum x^2)`.
    #[must_use]
    pub fn norm(&self) -> f32 {
        let sum: f32 = self.array.data().iter().map(|x| x * x).sum();
        sum.sqrt()
    }

    /// Returns the sum of the diagonal. The matrix must be square.
    pub fn trace(&self) -> Result<f32> {
        self.validate_square()?;

        let n = self.cols();
        Ok((0..self.rows())
            .map(|i| self.array.data()[i * n + i])
            .sum())
    }

    /// Returns the determinant via cofactor expansion along the first
    /// row. The matrix must be square.
    ///
    /// Exponential in the dimension; intended for the small matrices
    /// the closed forms do not cover.
    pub fn determinant(&self) -> Result<f32> {
        self.validate_square()?;

        let n = self.rows();
        let data = self.array.data();
        if n == 1 {
            return Ok(data[0]);
        }
        if n == 2 {
            return Ok(data[0] * data[3] - data[1] * data[2]);
        }

        let mut result = 0.0;
        for k in 0..n {
            // Minor of (0, k): drop the first row and column k.
            let mut sub = Matrix::zeros(n - 1, n - 1);
            let sub_data = sub.array.data_mut();
            for i in 1..n {
                for j in 0..n {
                    if j < k {
                        sub_data[(i - 1) * (n - 1) + j] = data[i * n + j];
                    } else if j > k {
                        sub_data[(i - 1) * (n - 1) + (j - 1)] = data[i * n + j];
                    }
                }
            }

            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            result += sign * data[k] * sub.determinant()?;
        }

        Ok(result)
    }

    /// Returns true if the matrix equals its own transpose. Non-square
    /// matrices are simply not symmetric, not an error.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        if self.rows() != self.cols() {
            return false;
        }

        let n = self.rows();
        let data = self.array.data();
        for i in 0..n {
            for j in (i + 1)..n {
                if data[i * n + j] != data[j * n + i] {
                    return false;
                }
            }
        }
        true
    }

    fn validate_square(&self) -> Result<()> {
        if self.rows() != self.cols() {
            return Err(Error::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Returns the elementwise sum with another matrix.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        let mut out = self.clone();
        out.array.add_assign(&other.array)?;
        Ok(out)
    }

    /// Returns the elementwise difference with another matrix.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        let mut out = self.clone();
        out.array.sub_assign(&other.array)?;
        Ok(out)
    }

    /// Returns the elementwise (Hadamard) product with another matrix.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        let mut out = self.clone();
        out.array.hadamard_assign(&other.array)?;
        Ok(out)
    }

    /// Returns this matrix scaled by a constant.
    #[must_use]
    pub fn mul_scalar(&self, c: f32) -> Matrix {
        let mut out = self.clone();
        out.array.scale(c);
        out
    }

    /// Returns this matrix negated.
    #[must_use]
    pub fn neg(&self) -> Matrix {
        self.mul_scalar(-1.0)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Matrix {
    type Target = NdArray;

    fn deref(&self) -> &NdArray {
        &self.array
    }
}

impl DerefMut for Matrix {
    fn deref_mut(&mut self) -> &mut NdArray {
        &mut self.array
    }
}

// =============================================================================
// Operator Trait Implementations
// =============================================================================

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, other: Self) -> Self::Output {
        Matrix::add(self, other).expect("Addition failed")
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, other: Self) -> Self::Output {
        Matrix::sub(self, other).expect("Subtraction failed")
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        Matrix::neg(self)
    }
}

impl Mul<f32> for &Matrix {
    type Output = Matrix;

    fn mul(self, c: f32) -> Self::Output {
        self.mul_scalar(c)
    }
}

// =============================================================================
// Tests
// =============================================================================
