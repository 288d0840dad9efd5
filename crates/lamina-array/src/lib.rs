//! Lamina Array - Dense N-Dimensional Arrays
//!
//! This crate provides the numeric core of Lamina: the [`NdArray`] base
//! container (flat row-major `f32` storage plus a shape descriptor) and
//! its rank specializations - [`Vector`] (rank 1), [`Matrix`] (rank 2),
//! and [`Tensor`] (any rank) - together with the matrix-multiplication
//! kernels (naive, cache-blocked, parallel, and Strassen).
//!
//! # Key Features
//! - Shared storage/indexing/reshape/slice machinery across all ranks
//! - Negative indices count from the end of their axis
//! - Elementwise arithmetic with exact-shape validation
//! - Four interchangeable matrix-multiplication kernels
//!
//! # Example
//! ```rust
//! use lamina_array::{matmul, Matrix, Vector};
//!
//! let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
//! let b = Matrix::identity(2);
//! let c = matmul(&a, &b, false).unwrap();
//! assert!(c.content_equals(&a));
//!
//! let v = Vector::from_slice(&[1.0, 3.0, -5.0]);
//! let w = Vector::from_slice(&[4.0, -2.0, -1.0]);
//! assert_eq!(v.dot(&w).unwrap(), 3.0);
//! ```
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Numeric-library allowances
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]

// =============================================================================
// Modules
// =============================================================================

pub mod array;
pub mod matmul;
pub mod matrix;
pub mod shape;
pub mod tensor;
pub mod vector;

// =============================================================================
// Re-exports
// =============================================================================

pub use array::{NdArray, EPSILON};
pub use lamina_core::{Error, Result};
pub use matmul::{mat_vec_mul, matmul, naive_mul, strassen_mul, BLOCK_SIZE, STRASSEN_CUTOFF};
pub use matrix::Matrix;
pub use shape::Shape;
pub use tensor::Tensor;
pub use vector::Vector;
