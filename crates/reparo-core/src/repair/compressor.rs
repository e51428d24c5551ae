//! Soft-knee compressor.
//!
//! Feed-forward design working on the instantaneous sample level:
//!
//! ```text
//! |x| -> dB (floored) -> Gain Computer -> smoothing -> x * gain * makeup
//! ```
//!
//! # Parameters
//!
//! | Parameter | Default | Description |
//! |-----------|---------|-------------|
//! | `threshold_db` | -20 dB | Level where compression begins |
//! | `ratio` | 4:1 | Compression strength |
//! | `attack_secs` | 5 ms | How fast gain reduction engages |
//! | `release_secs` | 100 ms | How fast gain reduction releases |
//! | `makeup_db` | 0 dB | Output level compensation |
//! | `knee_db` | 6 dB | Width of the quadratic transition around threshold |

use crate::{Repair, SampleBuffer, db_to_linear, linear_to_db, secs_to_samples};

/// Static gain curve in dB (always non-positive).
#[inline]
fn compute_gain_db(level_db: f32, threshold_db: f32, ratio: f32, knee_db: f32) -> f32 {
    let overshoot = level_db - threshold_db;
    let slope = 1.0 - 1.0 / ratio;

    if overshoot <= -knee_db / 2.0 {
        0.0
    } else if overshoot > knee_db / 2.0 {
        -(overshoot * slope)
    } else {
        let knee_factor = (overshoot + knee_db / 2.0) / knee_db;
        -(knee_factor * knee_factor * overshoot * slope)
    }
}

/// Compressor parameters.
///
/// # Example
///
/// ```rust
/// use reparo_core::{Compressor, Repair, SampleBuffer};
///
/// let comp = Compressor { threshold_db: -12.0, ratio: 3.0, ..Compressor::default() };
/// let loud = SampleBuffer::new(vec![0.9; 4410], 44100.0);
/// let squashed = comp.apply(&loud);
/// assert!(squashed.peak() < 0.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressor {
    /// Threshold in dBFS.
    pub threshold_db: f32,
    /// Compression ratio. Values at or below zero disable compression.
    pub ratio: f32,
    /// Attack time in seconds.
    pub attack_secs: f32,
    /// Release time in seconds.
    pub release_secs: f32,
    /// Makeup gain in dB.
    pub makeup_db: f32,
    /// Soft knee width in dB.
    pub knee_db: f32,
}

impl Default for Compressor {
    fn default() -> Self {
        Self {
            threshold_db: -20.0,
            ratio: 4.0,
            attack_secs: 0.005,
            release_secs: 0.1,
            makeup_db: 0.0,
            knee_db: 6.0,
        }
    }
}

/// Smoothed linear gain carried between samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorState {
    /// Current gain multiplier, within (0, 1].
    pub gain_reduction: f32,
}

impl Default for CompressorState {
    fn default() -> Self {
        Self {
            gain_reduction: 1.0,
        }
    }
}

impl Compressor {
    /// Static gain for a level in dBFS, without smoothing or makeup.
    pub fn gain_db(&self, level_db: f32) -> f32 {
        compute_gain_db(level_db, self.threshold_db, self.effective_ratio(), self.knee_db)
    }

    fn effective_ratio(&self) -> f32 {
        if self.ratio > 0.0 { self.ratio } else { 1.0 }
    }

    /// Compress `input`, continuing from (and updating) `state`.
    pub fn apply_with_state(
        &self,
        input: &SampleBuffer,
        state: &mut CompressorState,
    ) -> SampleBuffer {
        if input.is_empty() {
            return input.clone();
        }

        let sample_rate = input.sample_rate();
        let attack = secs_to_samples(self.attack_secs, sample_rate).max(1) as f32;
        let release = secs_to_samples(self.release_secs, sample_rate).max(1) as f32;
        let makeup = db_to_linear(self.makeup_db);

        let output = input.map(|_, sample| {
            let target = db_to_linear(self.gain_db(linear_to_db(sample.abs())));
            let gr = &mut state.gain_reduction;

            if target < *gr {
                *gr -= (*gr - target) / attack;
            } else {
                *gr += (target - *gr) / release;
            }
            *gr = gr.min(1.0);

            sample * *gr * makeup
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            gain_reduction = state.gain_reduction,
            samples = input.len(),
            "compressor pass complete"
        );

        output
    }
}

impl Repair for Compressor {
    fn name(&self) -> &'static str {
        "compress"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        self.apply_with_state(input, &mut CompressorState::default())
    }
}
