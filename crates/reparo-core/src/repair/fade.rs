//! Linear fade in and fade out.

use crate::{Repair, SampleBuffer, secs_to_samples};

/// Linear ramps at the head and tail of the buffer.
///
/// Fade-in multiplies sample `i` by `i / n` for the first `n` samples, so the
/// very first sample always goes to zero. Fade-out multiplies sample `i` by
/// `(len - i) / m` over the last `m` samples. A zero-length fade is skipped.
/// When a fade is longer than the buffer it covers the whole buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fade {
    /// Fade-in length in seconds.
    pub fade_in_secs: f32,
    /// Fade-out length in seconds.
    pub fade_out_secs: f32,
}

impl Repair for Fade {
    fn name(&self) -> &'static str {
        "fade"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        let mut output = input.clone();
        let sample_rate = input.sample_rate();
        let len = output.len();
        let data = output.samples_mut();

        let fade_in = secs_to_samples(self.fade_in_secs, sample_rate);
        if fade_in > 0 {
            for (i, sample) in data.iter_mut().take(fade_in).enumerate() {
                *sample *= i as f32 / fade_in as f32;
            }
        }

        let fade_out = secs_to_samples(self.fade_out_secs, sample_rate);
        if fade_out > 0 {
            let start = len.saturating_sub(fade_out);
            for (i, sample) in data.iter_mut().enumerate().skip(start) {
                *sample *= (len - i) as f32 / fade_out as f32;
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
    fn test_fade_in_ramp() {
        let input = SampleBuffer::new(vec![1.0; 8], 4.0);
        // 1 s at 4 Hz -> 4 samples
        let output = Fade {
            fade_in_secs: 1.0,
            fade_out_secs: 0.0,
        }
        .apply(&input);
        assert_eq!(output.samples(), &[0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_fade_out_ramp() {
        let input = SampleBuffer::new(vec![1.0; 8], 4.0);
        let output = Fade {
            fade_in_secs: 0.0,
            fade_out_secs: 1.0,
        }
        .apply(&input);
        assert_eq!(output.samples(), &[1.0, 1.0, 1.0, 1.0, 1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn test_fade_longer_than_buffer() {
        let input = SampleBuffer::new(vec![1.0; 4], 4.0);
        let output = Fade {
            fade_in_secs: 2.0,
            fade_out_secs: 0.0,
        }
        .apply(&input);
        assert_eq!(output.samples(), &[0.0, 0.125, 0.25, 0.375]);
    }

    #[test]
    fn test_zero_fade_is_noop() {
        let input = SampleBuffer::new(vec![0.3; 16], 44100.0);
        assert_eq!(Fade::default().apply(&input), input);
    }
}
