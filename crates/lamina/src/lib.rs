//! Lamina - Dense N-Dimensional Array Math
//!
//! The umbrella crate for the Lamina workspace. It re-exports the full
//! public surface of the member crates so applications depend on one
//! name:
//!
//! - [`NdArray`] - the shared flat-buffer storage layer
//! - [`Vector`] / [`Matrix`] / [`Tensor`] - rank specializations
//! - [`matmul`] / [`naive_mul`] / [`strassen_mul`] / [`mat_vec_mul`] -
//!   the multiplication kernels
//! - `random` / `stats` - sampling and validation helpers
//!
//! # Example
//! ```rust
//! use lamina::prelude::*;
//!
//! let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = Matrix::identity(2);
//! assert!(matmul(&a, &b, false).unwrap().content_equals(&a));
//! ```
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// =============================================================================
// Re-exports
// =============================================================================

pub use lamina_array::{
    mat_vec_mul, matmul, naive_mul, strassen_mul, Matrix, NdArray, Shape, Tensor, Vector,
    BLOCK_SIZE, EPSILON, STRASSEN_CUTOFF,
};
pub use lamina_core::{random, stats, Error, Result};

// =============================================================================
// Prelude
// =============================================================================

/// Convenient imports for common usage.
pub mod prelude {
    pub use lamina_array::{
        mat_vec_mul, matmul, naive_mul, strassen_mul, Matrix, NdArray, Tensor, Vector,
    };
    pub use lamina_core::{Error, Result};
}
