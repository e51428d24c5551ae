//! Level and time conversions shared by the repair transforms.
//!
//! All functions are allocation-free and `no_std` friendly.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`peak`] / [`mean_abs`] - Buffer level measurements
//! - [`secs_to_samples`] - Seconds to whole samples

use libm::{expf, floorf, logf};

/// Smallest amplitude considered when converting a level to dB.
///
/// Maps to -100 dB, which keeps silent samples out of `log(0)`.
pub const AMPLITUDE_FLOOR: f32 = 1e-5;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use reparo_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear amplitude to decibels.
///
/// Inputs below [`AMPLITUDE_FLOOR`] are clamped to it, so the result never
/// drops under -100 dB.
///
/// # Example
/// ```rust
/// use reparo_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 0.001);
/// assert!((linear_to_db(0.0) + 100.0).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(AMPLITUDE_FLOOR)) * FACTOR
}

/// Largest absolute sample value, `0.0` for an empty slice.
#[inline]
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
}

/// Mean absolute value, `0.0` for an empty slice.
#[inline]
pub fn mean_abs(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.abs()).sum::<f32>() / samples.len() as f32
}

/// Convert a duration in seconds to a whole number of samples (floor).
///
/// Negative and NaN durations map to zero. Callers that divide by the result
/// clamp it to at least one.
#[inline]
pub fn secs_to_samples(secs: f32, sample_rate: f32) -> usize {
    let samples = floorf(secs * sample_rate);
    if samples.is_nan() || samples <= 0.0 {
        0
    } else {
        samples as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let db = linear_to_db(original);
        let back = db_to_linear(db);
        assert!(
            (original - back).abs() < 1e-5,
            "Roundtrip failed: {} -> {} -> {}",
            original,
            db,
            back
        );
    }

    #[test]
    fn test_db_known_values() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(-3.0) - 0.70795).abs() < 1e-4);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!((linear_to_db(0.0) - (-100.0)).abs() < 0.01);
        assert!((linear_to_db(1e-9) - (-100.0)).abs() < 0.01);
    }

    #[test]
    fn test_peak_and_mean_abs() {
        let samples = [0.25, -0.75, 0.5, 0.0];
        assert_eq!(peak(&samples), 0.75);
        assert!((mean_abs(&samples) - 0.375).abs() < 1e-6);
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(mean_abs(&[]), 0.0);
    }

    #[test]
    fn test_secs_to_samples() {
        assert_eq!(secs_to_samples(0.1, 44100.0), 4410);
        assert_eq!(secs_to_samples(0.005, 44100.0), 220);
        assert_eq!(secs_to_samples(0.0, 44100.0), 0);
        assert_eq!(secs_to_samples(-1.0, 44100.0), 0);
        assert_eq!(secs_to_samples(f32::NAN, 44100.0), 0);
    }
}
