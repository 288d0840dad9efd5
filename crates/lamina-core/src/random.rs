//! Random Sampling - Uniform and Gaussian Sources
//!
//! Thin sampling layer over rand's thread-local generator. The uniform
//! sampler feeds `randomize`-style array fills; the Gaussian sampler
//! implements the Marsaglia polar method, which produces two independent
//! normals per accepted pair - one is returned immediately, the other is
//! parked in a thread-local spare slot and consumed by the next call on
//! the same thread.
//!
//! # Key Features
//! - Uniform samples in `[min, max)`
//! - Normally distributed samples via the Marsaglia polar method
//! - Thread-local spare cache, safe under concurrent sampling
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

use std::cell::Cell;

use rand::Rng;

thread_local! {
    // Unscaled spare normal from the previous accepted pair, if any.
    static GAUSSIAN_SPARE: Cell<Option<f32>> = Cell::new(None);
}

// =============================================================================
// Uniform Sampling
// =============================================================================

/// Returns a uniform sample in `[0, 1)`.
#[must_use]
pub fn uniform_unit() -> f32 {
    rand::thread_rng().gen()
}

/// Returns a uniform sample in `[min, max)`.
///
/// # Arguments
/// * `min` - Lower bound (inclusive)
/// * `max` - Upper bound (exclusive)
#[must_use]
pub fn uniform(min: f32, max: f32) -> f32 {
    uniform_unit() * (max - min) + min
}

// =============================================================================
// Gaussian Sampling
// =============================================================================

/// Returns a sample from the normal distribution with the given mean and
/// standard deviation.
///
/// Uses the Marsaglia polar method: pairs `(u, v)` uniform in `(-1, 1)`
/// are rejected until `0 < u^2 + v^2 < 1`; the accepted pair yields two
/// independent standard normals. The second is cached per thread and
/// scaled by the mean and standard deviation of the *next* call.
#[must_use]
pub fn normal(mean: f32, std_dev: f32) -> f32 {
    if let Some(spare) = GAUSSIAN_SPARE.with(Cell::take) {
        return spare * std_dev + mean;
    }

    let mut rng = rand::thread_rng();
    let (u, v, s) = loop {
        let u = rng.gen::<f32>() * 2.0 - 1.0;
        let v = rng.gen::<f32>() * 2.0 - 1.0;
        let s = u * u + v * v;
        if s < 1.0 && s > 1e-10 {
            break (u, v, s);
        }
    };

    let r = (-2.0 * s.ln() / s).sqrt();
    GAUSSIAN_SPARE.with(|cell| cell.set(Some(v * r)));

    mean + std_dev * u * r
}

// =============================================================================
// Tests
// =============================================================================
