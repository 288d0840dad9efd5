//! Statistics Helpers - Moments and the Normal CDF
//!
//! Small value-in/value-out helpers used by validation code and tests.
//! The numeric core never calls these; they exist to check that sampled
//! data actually follows the requested distribution.
//!
//! @version 0.1.0
//! @author `Lamina` Development Team

// =============================================================================
// Sample Moments
// =============================================================================

/// Returns the arithmetic mean of the samples, or 0 for an empty slice.
#[must_use]
pub fn mean(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

/// Returns the population variance of the samples, or 0 for an empty slice.
#[must_use]
pub fn variance(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    samples.iter().map(|x| (x - m) * (x - m)).sum::<f32>() / samples.len() as f32
}

// =============================================================================
// Normal CDF
// =============================================================================

/// Error function approximation (Abramowitz & Stegun 7.1.26).
///
/// Maximum absolute error is about 1.5e-7, far below f32 round-off for
/// the ranges this library cares about.
#[must_use]
pub fn erf(x: f32) -> f32 {
    const A1: f32 = 0.254_829_592;
    const A2: f32 = -0.284_496_736;
    const A3: f32 = 1.421_413_741;
    const A4: f32 = -1.453_152_027;
    const A5: f32 = 1.061_405_429;
    const P: f32 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Cumulative distribution function of the normal distribution with the
/// given mean and standard deviation.
#[must_use]
pub fn normal_cdf(x: f32, mean: f32, std_dev: f32) -> f32 {
    0.5 * (1.0 + erf((x - mean) / (std_dev * std::f32::consts::SQRT_2)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[2.0, 2.0, 2.0]), 0.0);
        assert!((variance(&[1.0, 2.0, 3.0, 4.0]) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_erf_symmetry() {
        assert_eq!(erf(0.0), 0.0);
        assert!((erf(1.0) + erf(-1.0)).abs() < 1e-6);
        assert!((erf(1.0) - 0.842_700_8).abs() < 1e-4);
    }

    #[test]
    fn test_normal_cdf() {
        assert!((normal_cdf(0.0, 0.0, 1.0) - 0.5).abs() < 1e-6);
        // One standard deviation above the mean.
        assert!((normal_cdf(1.0, 0.0, 1.0) - 0.841_344_7).abs() < 1e-4);
        assert!((normal_cdf(5.0, 5.0, 2.0) - 0.5).abs() < 1e-6);
    }
}
