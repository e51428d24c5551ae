//! Resampling pitch shift.
//!
//! Plain variable-rate playback with linear interpolation: no formant
//! preservation and no time-stretch compensation, and the output keeps the
//! input length. Reading slower than real time (positive semitones) stretches
//! the waveform and lowers its pitch; negative values raise it.

use reparo_core::SampleBuffer;

/// Playback ratio for a shift of `semitones`: `2^(semitones/12)`.
pub fn shift_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

/// Resample `samples` by `2^(semitones/12)`.
///
/// Output sample `i` reads source position `i / ratio`, blending the two
/// neighbouring samples linearly. Positions at or past the last sample hold
/// the last sample. A shift of zero returns the input exactly.
///
/// # Example
///
/// ```rust
/// use reparo_pitch::apply_pitch_shift;
///
/// let ramp = [0.0, 1.0, 2.0, 3.0];
/// assert_eq!(apply_pitch_shift(&ramp, 0.0), ramp);
///
/// // One octave: half speed
/// assert_eq!(apply_pitch_shift(&ramp, 12.0), [0.0, 0.5, 1.0, 1.5]);
/// ```
pub fn apply_pitch_shift(samples: &[f32], semitones: f32) -> Vec<f32> {
    let Some(last) = samples.len().checked_sub(1) else {
        return Vec::new();
    };
    let ratio = f64::from(shift_ratio(semitones));

    // Positions are f64 so indices past 2^24 stay exact.
    (0..samples.len())
        .map(|i| {
            let position = i as f64 / ratio;
            let base = position.floor() as usize;
            if base >= last {
                samples[last]
            } else {
                let frac = (position - base as f64) as f32;
                samples[base] * (1.0 - frac) + samples[base + 1] * frac
            }
        })
        .collect()
}

/// [`apply_pitch_shift`] over a whole buffer, keeping its sample rate.
pub fn shift_buffer(buffer: &SampleBuffer, semitones: f32) -> SampleBuffer {
    SampleBuffer::new(
        apply_pitch_shift(buffer.samples(), semitones),
        buffer.sample_rate(),
    )
}
