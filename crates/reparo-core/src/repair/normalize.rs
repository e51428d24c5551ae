//! Peak normalization.

use crate::{Repair, SampleBuffer, db_to_linear};

/// Scales the buffer so its absolute peak lands on `target_db`.
///
/// Silent buffers are returned unchanged.
///
/// # Example
///
/// ```rust
/// use reparo_core::{Normalizer, Repair, SampleBuffer};
///
/// let quiet = SampleBuffer::new(vec![0.1, -0.2, 0.05], 44100.0);
/// let loud = Normalizer { target_db: 0.0 }.apply(&quiet);
/// assert!((loud.peak() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    /// Target peak in dBFS.
    pub target_db: f32,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { target_db: -3.0 }
    }
}

impl Repair for Normalizer {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        let peak = input.peak();
        if peak == 0.0 {
            return input.clone();
        }

        let scale = db_to_linear(self.target_db) / peak;
        input.map(|_, sample| sample * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_peak_hits_target() {
        let input = SampleBuffer::from_fn(1000, 44100.0, |i| (i as f32 * 0.1).sin() * 0.2);
        let output = Normalizer::default().apply(&input);
        assert!((output.peak() - db_to_linear(-3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_attenuates_hot_signal() {
        let input = SampleBuffer::new(vec![2.0, -4.0, 1.0], 44100.0);
        let output = Normalizer { target_db: 0.0 }.apply(&input);
        assert!((output.samples()[1] + 1.0).abs() < 1e-6);
        assert!((output.samples()[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_silence_unchanged() {
        let input = SampleBuffer::silence(256, 44100.0);
        assert_eq!(Normalizer::default().apply(&input), input);
    }
}
