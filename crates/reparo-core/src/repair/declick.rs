//! Click and pop removal.

use crate::{Repair, SampleBuffer};

/// Replaces sudden sample-to-sample jumps with the mean of the surrounding
/// samples.
///
/// The scan runs left to right over the output copy, so a repaired sample is
/// what its right-hand neighbour gets compared against. Near the buffer edges
/// the neighbourhood is clipped to what exists.
///
/// | Field | Default |
/// |-------|---------|
/// | `threshold` | 0.3 (absolute difference) |
/// | `window_samples` | 5 (each side) |
///
/// # Example
///
/// ```rust
/// use reparo_core::{ClickRemover, Repair, SampleBuffer};
///
/// let clicked = SampleBuffer::new(vec![0.0, 1.0, 0.0], 44100.0);
/// let repaired = ClickRemover::default().apply(&clicked);
/// assert_eq!(repaired.samples(), &[0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickRemover {
    /// Absolute jump between adjacent samples that counts as a click.
    pub threshold: f32,
    /// Neighbours averaged on each side of a click.
    pub window_samples: usize,
}

impl Default for ClickRemover {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            window_samples: 5,
        }
    }
}

impl Repair for ClickRemover {
    fn name(&self) -> &'static str {
        "declick"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        let mut output = input.clone();
        if self.window_samples == 0 {
            return output;
        }

        let data = output.samples_mut();
        let len = data.len();

        for i in 1..len {
            if (data[i] - data[i - 1]).abs() <= self.threshold {
                continue;
            }

            let lo = i.saturating_sub(self.window_samples);
            let hi = (i + self.window_samples).min(len - 1);

            let (sum, count) = (lo..=hi)
                .filter(|&j| j != i)
                .fold((0.0_f32, 0_usize), |(sum, count), j| (sum + data[j], count + 1));

            if count > 0 {
                data[i] = sum / count as f32;
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_isolated_spike_removed() {
        let mut samples = vec![0.0; 64];
        samples[32] = 1.0;
        let input = SampleBuffer::new(samples, 44100.0);
        let output = ClickRemover::default().apply(&input);

        assert!(output.samples()[32].abs() < 1e-6);
        assert!(output.samples().iter().all(|s| s.abs() < 1e-6));
    }

    #[test]
    fn test_spike_at_edge() {
        let input = SampleBuffer::new(vec![0.0, 0.0, 1.0], 44100.0);
        let output = ClickRemover::default().apply(&input);
        assert!(output.samples()[2].abs() < 1e-6);
    }

    #[test]
    fn test_smooth_signal_unchanged() {
        let input = SampleBuffer::from_fn(4410, 44100.0, |i| {
            (2.0 * core::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin()
        });
        let output = ClickRemover::default().apply(&input);
        assert_eq!(output.samples(), input.samples());
    }

    #[test]
    fn test_neighbour_mean() {
        let input = SampleBuffer::new(vec![0.1, 0.2, 0.9, 0.3, 0.4], 44100.0);
        let remover = ClickRemover {
            threshold: 0.3,
            window_samples: 2,
        };
        let output = remover.apply(&input);
        // (0.1 + 0.2 + 0.3 + 0.4) / 4
        assert!((output.samples()[2] - 0.25).abs() < 1e-6);
        assert_eq!(output.samples()[3], 0.3);
    }

    #[test]
    fn test_zero_window_is_noop() {
        let input = SampleBuffer::new(vec![0.0, 1.0, 0.0], 44100.0);
        let remover = ClickRemover {
            threshold: 0.3,
            window_samples: 0,
        };
        assert_eq!(remover.apply(&input), input);
    }
}
