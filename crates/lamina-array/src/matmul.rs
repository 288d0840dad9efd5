//! Matrix Multiplication Kernels
//!
//! Four routes to the same product `C = A B` (A is `m x n`, B is
//! `n x p`, C is `m x p`), trading implementation effort for speed:
//!
//! - [`naive_mul`] - the textbook triple loop, O(m*n*p), no tricks.
//! - [`matmul`] - cache-blocked kernel. B is transposed once into a
//!   scratch buffer so both operands stream row-major, then the i/k/j
//!   space is walked in 32x32 tiles. With `parallel` set, each 32-row
//!   band of the output is handed to a rayon worker; bands never
//!   overlap, so the workers share nothing but read-only inputs.
//! - [`strassen_mul`] - recursive divide-and-conquer computing 7
//!   half-size products instead of 8. Operands below the cutoff fall
//!   through to the blocked kernel; above it they are padded to an even
//!   square, quartered, recombined, and cropped.
//! - [`mat_vec_mul`] - the degenerate `p = 1` case, kept separate so
//!   the inner loop stays a plain dot product.
//!
//! All four share one contract: `DimensionMismatch` when the left
//! operand's column count differs from the right operand's row count.
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use rayon::prelude::*;

use lamina_core::error::{Error, Result};

use crate::matrix::Matrix;
use crate::vector::Vector;

/// Operands whose element counts are both below this fall through from
/// Strassen recursion to the blocked kernel.
pub const STRASSEN_CUTOFF: usize = 512 * 512;

/// Tile edge for the blocked kernel, sized for L1 residency of one
/// output tile plus a row stripe of each operand.
pub const BLOCK_SIZE: usize = 32;

// =============================================================================
// Validation
// =============================================================================

fn validate_mul_dims(a: &Matrix, b: &Matrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(Error::DimensionMismatch {
            lhs: a.cols(),
            rhs: b.rows(),
        });
    }
    Ok(())
}

// =============================================================================
// Naive Kernel
// =============================================================================

/// Multiplies two matrices with the straightforward triple loop.
pub fn naive_mul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    validate_mul_dims(a, b)?;

    let (m, n, p) = (a.rows(), a.cols(), b.cols());
    let mut c = Matrix::zeros(m, p);

    let a_data = a.data();
    let b_data = b.data();
    let c_data = c.data_mut();

    for i in 0..m {
        for j in 0..p {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a_data[i * n + k] * b_data[k * p + j];
            }
            c_data[i * p + j] = sum;
        }
    }

    Ok(c)
}

// =============================================================================
// Blocked Kernel
// =============================================================================

/// Transposes a `rows x cols` flat buffer into a new `cols x rows` one.
fn transpose_flat(src: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut dst = vec![0.0; src.len()];
    for i in 0..rows {
        for j in 0..cols {
            dst[j * rows + i] = src[i * cols + j];
        }
    }
    dst
}

/// Accumulates one horizontal band of C.
///
/// `c_band` holds the rows starting at `i0`; `bt` is B pre-transposed
/// (`p x n`), so both operands are read along contiguous rows. The k/j
/// space is walked in `BLOCK_SIZE` tiles.
fn block_band(c_band: &mut [f32], a: &[f32], bt: &[f32], i0: usize, n: usize, p: usize) {
    let band_rows = c_band.len() / p;

    for kb in (0..n).step_by(BLOCK_SIZE) {
        let k_max = (kb + BLOCK_SIZE).min(n);
        for jb in (0..p).step_by(BLOCK_SIZE) {
            let j_max = (jb + BLOCK_SIZE).min(p);
            for i in 0..band_rows {
                for k in kb..k_max {
                    let a_ik = a[(i0 + i) * n + k];
                    for j in jb..j_max {
                        c_band[i * p + j] += a_ik * bt[j * n + k];
                    }
                }
            }
        }
    }
}

/// Multiplies two matrices with the cache-blocked kernel, optionally
/// spreading output bands across rayon workers.
///
/// B is never modified: the transposed copy the kernel reads is a local
/// scratch buffer that dies with the call.
pub fn matmul(a: &Matrix, b: &Matrix, parallel: bool) -> Result<Matrix> {
    validate_mul_dims(a, b)?;

    let (m, n, p) = (a.rows(), a.cols(), b.cols());
    let mut c = Matrix::zeros(m, p);
    if m == 0 || n == 0 || p == 0 {
        return Ok(c);
    }

    let bt = transpose_flat(b.data(), n, p);
    let a_data = a.data();

    if parallel {
        c.data_mut()
            .par_chunks_mut(BLOCK_SIZE * p)
            .enumerate()
            .for_each(|(band, c_band)| {
                block_band(c_band, a_data, &bt, band * BLOCK_SIZE, n, p);
            });
    } else {
        for (band, c_band) in c.data_mut().chunks_mut(BLOCK_SIZE * p).enumerate() {
            block_band(c_band, a_data, &bt, band * BLOCK_SIZE, n, p);
        }
    }

    Ok(c)
}

// =============================================================================
// Strassen Kernel
// =============================================================================

/// Copies the `h x h` quadrant of `src` whose top-left corner is
/// `(r0, c0)` into its own matrix.
fn quadrant(src: &Matrix, r0: usize, c0: usize, h: usize) -> Result<Matrix> {
    let data = src.get_slice(&[(r0, r0 + h - 1), (c0, c0 + h - 1)])?;
    Matrix::from_vec(data, h, h)
}

/// Multiplies two matrices with Strassen's algorithm.
///
/// Operands below [`STRASSEN_CUTOFF`] (by element count, both of them)
/// delegate to the blocked kernel, which also bounds the recursion
/// depth. Larger operands are zero-padded to a common even square
/// `s = next_even(max(m, n, p))`, split into four `s/2` quadrants each,
/// and recombined from the seven sub-products
///
/// ```text
/// M1 = (A11 + A22)(B11 + B22)    C11 = M1 + M4 - M5 + M7
/// M2 = (A21 + A22) B11           C12 = M3 + M5
/// M3 = A11 (B12 - B22)           C21 = M2 + M4
/// M4 = A22 (B21 - B11)           C22 = M1 - M2 + M3 + M6
/// M5 = (A11 + A12) B22
/// M6 = (A21 - A11)(B11 + B12)
/// M7 = (A12 - A22)(B21 + B22)
/// ```
///
/// With `parallel` set, M1-M4 run as one structured `rayon::join`
/// fan-out and M5-M7 as a second; the two batches have no internal data
/// dependencies, and each branch owns its result until the join.
pub fn strassen_mul(a: &Matrix, b: &Matrix, parallel: bool) -> Result<Matrix> {
    validate_mul_dims(a, b)?;

    if a.len() < STRASSEN_CUTOFF && b.len() < STRASSEN_CUTOFF {
        return matmul(a, b, parallel);
    }

    let (m, n, p) = (a.rows(), a.cols(), b.cols());
    if m == 0 || n == 0 || p == 0 {
        return Ok(Matrix::zeros(m, p));
    }

    let s = {
        let widest = m.max(n).max(p);
        if widest % 2 == 1 {
            widest + 1
        } else {
            widest
        }
    };
    let h = s / 2;

    // Embed both operands in s x s zero padding.
    let mut ap = Matrix::zeros(s, s);
    ap.set_slice(a.data(), &[(0, m - 1), (0, n - 1)])?;
    let mut bp = Matrix::zeros(s, s);
    bp.set_slice(b.data(), &[(0, n - 1), (0, p - 1)])?;

    let a11 = quadrant(&ap, 0, 0, h)?;
    let a12 = quadrant(&ap, 0, h, h)?;
    let a21 = quadrant(&ap, h, 0, h)?;
    let a22 = quadrant(&ap, h, h, h)?;
    let b11 = quadrant(&bp, 0, 0, h)?;
    let b12 = quadrant(&bp, 0, h, h)?;
    let b21 = quadrant(&bp, h, 0, h)?;
    let b22 = quadrant(&bp, h, h, h)?;

    let (m1, m2, m3, m4, m5, m6, m7) = if parallel {
        let ((m1, m2), (m3, m4)) = rayon::join(
            || {
                rayon::join(
                    || strassen_mul(&(&a11 + &a22), &(&b11 + &b22), parallel),
                    || strassen_mul(&(&a21 + &a22), &b11, parallel),
                )
            },
            || {
                rayon::join(
                    || strassen_mul(&a11, &(&b12 - &b22), parallel),
                    || strassen_mul(&a22, &(&b21 - &b11), parallel),
                )
            },
        );
        let ((m5, m6), m7) = rayon::join(
            || {
                rayon::join(
                    || strassen_mul(&(&a11 + &a12), &b22, parallel),
                    || strassen_mul(&(&a21 - &a11), &(&b11 + &b12), parallel),
                )
            },
            || strassen_mul(&(&a12 - &a22), &(&b21 + &b22), parallel),
        );
        (m1?, m2?, m3?, m4?, m5?, m6?, m7?)
    } else {
        (
            strassen_mul(&(&a11 + &a22), &(&b11 + &b22), parallel)?,
            strassen_mul(&(&a21 + &a22), &b11, parallel)?,
            strassen_mul(&a11, &(&b12 - &b22), parallel)?,
            strassen_mul(&a22, &(&b21 - &b11), parallel)?,
            strassen_mul(&(&a11 + &a12), &b22, parallel)?,
            strassen_mul(&(&a21 - &a11), &(&b11 + &b12), parallel)?,
            strassen_mul(&(&a12 - &a22), &(&b21 + &b22), parallel)?,
        )
    };

    let c11 = m1.add(&m4)?.sub(&m5)?.add(&m7)?;
    let c12 = m3.add(&m5)?;
    let c21 = m2.add(&m4)?;
    let c22 = m1.sub(&m2)?.add(&m3)?.add(&m6)?;

    let mut cp = Matrix::zeros(s, s);
    cp.set_slice(c11.data(), &[(0, h - 1), (0, h - 1)])?;
    cp.set_slice(c12.data(), &[(0, h - 1), (h, s - 1)])?;
    cp.set_slice(c21.data(), &[(h, s - 1), (0, h - 1)])?;
    cp.set_slice(c22.data(), &[(h, s - 1), (h, s - 1)])?;

    if m == s && p == s {
        return Ok(cp);
    }

    // Crop the padding back off.
    let data = cp.get_slice(&[(0, m - 1), (0, p - 1)])?;
    Matrix::from_vec(data, m, p)
}

// =============================================================================
// Matrix-Vector Kernel
// =============================================================================

/// Multiplies a matrix by a column vector: `y = A x`, O(m*n).
pub fn mat_vec_mul(a: &Matrix, x: &Vector) -> Result<Vector> {
    if a.cols() != x.len() {
        return Err(Error::DimensionMismatch {
            lhs: a.cols(),
            rhs: x.len(),
        });
    }

    let (m, n) = (a.rows(), a.cols());
    let mut y = Vector::zeros(m);

    let a_data = a.data();
    let x_data = x.data();
    let y_data = y.data_mut();

    for i in 0..m {
        let mut sum = 0.0;
        for j in 0..n {
            sum += a_data[i * n + j] * x_data[j];
        }
        y_data[i] = sum;
    }

    Ok(y)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix, b: &Matrix, rel_tol: f32) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.data().iter().zip(b.data().iter()) {
            let scale = x.abs().max(y.abs()).max(1.0);
            assert!(
                (x - y).abs() <= rel_tol * scale,
                "{x} vs {y} beyond tolerance {rel_tol}"
            );
        }
    }

    #[test]
    fn test_known_product() {
        let a = Matrix::from_vec(
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            3,
            3,
        )
        .unwrap();
        let b = Matrix::from_rows(&[
            vec![1.0, 2.0, 1.0],
            vec![2.0, 4.0, 6.0],
            vec![7.0, 2.0, 5.0],
        ])
        .unwrap();
        let expected = Matrix::from_rows(&[
            vec![26.0, 16.0, 28.0],
            vec![56.0, 40.0, 64.0],
            vec![86.0, 64.0, 100.0],
        ])
        .unwrap();

        assert!(naive_mul(&a, &b).unwrap().content_equals(&expected));
        assert!(matmul(&a, &b, false).unwrap().content_equals(&expected));
        assert!(matmul(&a, &b, true).unwrap().content_equals(&expected));
        assert!(strassen_mul(&a, &b, false)
            .unwrap()
            .content_equals(&expected));
    }

    #[test]
    fn test_identity_is_neutral() {
        let a = Matrix::random(-1.0, 1.0, 7, 7);
        let i = Matrix::identity(7);
        assert_close(&matmul(&a, &i, false).unwrap(), &a, 1e-6);
        assert_close(&matmul(&i, &a, false).unwrap(), &a, 1e-6);
    }

    #[test]
    fn test_kernels_agree_below_one_block() {
        // 5x7 by 7x3: smaller than one 32x32 tile on every axis.
        let a = Matrix::random(-1.0, 1.0, 5, 7);
        let b = Matrix::random(-1.0, 1.0, 7, 3);

        let reference = naive_mul(&a, &b).unwrap();
        assert_close(&matmul(&a, &b, false).unwrap(), &reference, 1e-4);
        assert_close(&matmul(&a, &b, true).unwrap(), &reference, 1e-4);
        assert_close(&strassen_mul(&a, &b, false).unwrap(), &reference, 1e-4);
    }

    #[test]
    fn test_kernels_agree_above_one_block() {
        // Spans several 32x32 tiles with ragged edges on every axis.
        let a = Matrix::random(-1.0, 1.0, 70, 45);
        let b = Matrix::random(-1.0, 1.0, 45, 33);

        let reference = naive_mul(&a, &b).unwrap();
        assert_close(&matmul(&a, &b, false).unwrap(), &reference, 1e-4);
        assert_close(&matmul(&a, &b, true).unwrap(), &reference, 1e-4);
    }

    #[test]
    fn test_blocked_leaves_b_unmodified() {
        let a = Matrix::random(-1.0, 1.0, 40, 40);
        let b = Matrix::random(-1.0, 1.0, 40, 40);
        let b_before = b.clone();
        let _ = matmul(&a, &b, false).unwrap();
        let _ = matmul(&a, &b, true).unwrap();
        assert!(b.content_equals(&b_before));
    }

    #[test]
    fn test_strassen_recursion_above_cutoff() {
        // 600x600 exceeds the 512*512 element cutoff, forcing one level
        // of real recursion (600 is even, so no padding); a non-square
        // companion exercises the pad-and-crop path.
        let a = Matrix::random(-1.0, 1.0, 600, 600);
        let b = Matrix::random(-1.0, 1.0, 600, 600);
        let reference = matmul(&a, &b, false).unwrap();
        assert_close(&strassen_mul(&a, &b, false).unwrap(), &reference, 1e-3);
        assert_close(&strassen_mul(&a, &b, true).unwrap(), &reference, 1e-3);

        let c = Matrix::random(-1.0, 1.0, 600, 601);
        let d = Matrix::random(-1.0, 1.0, 601, 599);
        let reference = matmul(&c, &d, false).unwrap();
        let product = strassen_mul(&c, &d, false).unwrap();
        assert_eq!(product.shape(), &[600, 599]);
        assert_close(&product, &reference, 1e-3);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(4, 2);
        assert!(matches!(
            naive_mul(&a, &b),
            Err(Error::DimensionMismatch { lhs: 3, rhs: 4 })
        ));
        assert!(matmul(&a, &b, false).is_err());
        assert!(strassen_mul(&a, &b, false).is_err());
    }

    #[test]
    fn test_non_square_shapes() {
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let b = Matrix::from_vec(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], 3, 2).unwrap();
        let c = matmul(&a, &b, false).unwrap();
        assert_eq!(c.shape(), &[2, 2]);
        assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_mat_vec_mul() {
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let x = Vector::from_slice(&[1.0, 0.0, -1.0]);
        let y = mat_vec_mul(&a, &x).unwrap();
        assert_eq!(y.data(), &[-2.0, -2.0]);

        let short = Vector::from_slice(&[1.0, 2.0]);
        assert!(matches!(
            mat_vec_mul(&a, &short),
            Err(Error::DimensionMismatch { lhs: 3, rhs: 2 })
        ));
    }

    #[test]
    fn test_zero_dimension_operands() {
        let a = Matrix::zeros(0, 3);
        let b = Matrix::zeros(3, 4);
        let c = matmul(&a, &b, false).unwrap();
        assert_eq!(c.shape(), &[0, 4]);

        let a = Matrix::zeros(2, 0);
        let b = Matrix::zeros(0, 4);
        let c = matmul(&a, &b, true).unwrap();
        assert_eq!(c.shape(), &[2, 4]);
        assert!(c.data().iter().all(|&x| x == 0.0));
    }
}
