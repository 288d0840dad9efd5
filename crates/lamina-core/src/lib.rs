//! Lamina Core - Foundation Types for the Lamina Workspace
//!
//! This crate provides the shared foundation for the Lamina numeric
//! library: the unified error type, random sampling (uniform and
//! Gaussian), and small statistics helpers used by validation code.
//!
//! # Key Features
//! - Unified `Error` / `Result` types for all Lamina operations
//! - Uniform and Marsaglia-polar Gaussian sampling with thread-local state
//! - Sample moments and a normal-CDF approximation for tests
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Numeric-library allowances
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::doc_markdown)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod random;
pub mod stats;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{Error, Result};
