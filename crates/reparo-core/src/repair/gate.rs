//! Two-state noise gate.
//!
//! The gate opens the moment a sample rises above the threshold and closes
//! once the signal has stayed at or below it for longer than the release
//! time. While closed, samples are soft-muted by a fixed factor instead of
//! being zeroed, which keeps room tone from dropping out completely.

use crate::{Repair, SampleBuffer, db_to_linear, secs_to_samples};

/// Gain applied to every sample while the gate is closed.
const CLOSED_GAIN: f32 = 0.9;

/// Noise gate parameters.
///
/// | Field | Default | Unit |
/// |-------|---------|------|
/// | `threshold_db` | -40.0 | dBFS |
/// | `attack_secs` | 0.1 | s |
/// | `release_secs` | 0.2 | s |
///
/// Opening is instantaneous: `attack_secs` is carried for preset
/// compatibility but does not ramp the gain.
///
/// # Example
///
/// ```rust
/// use reparo_core::{NoiseGate, Repair, SampleBuffer};
///
/// let hiss = SampleBuffer::from_fn(1000, 44100.0, |i| if i % 2 == 0 { 0.001 } else { -0.001 });
/// let gated = NoiseGate::default().apply(&hiss);
/// assert!((gated.samples()[0] - 0.0009).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseGate {
    /// Open/close threshold in dBFS.
    pub threshold_db: f32,
    /// Attack time in seconds.
    pub attack_secs: f32,
    /// Time below threshold before the gate closes, in seconds.
    pub release_secs: f32,
}

impl Default for NoiseGate {
    fn default() -> Self {
        Self {
            threshold_db: -40.0,
            attack_secs: 0.1,
            release_secs: 0.2,
        }
    }
}

/// Running gate position.
///
/// Starts closed with a zero release counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateState {
    /// Whether the gate is currently passing signal untouched.
    pub open: bool,
    /// Consecutive at-or-below-threshold samples seen while open.
    pub release_counter: usize,
}

impl NoiseGate {
    /// Gate `input`, continuing from (and updating) `state`.
    pub fn apply_with_state(&self, input: &SampleBuffer, state: &mut GateState) -> SampleBuffer {
        if input.is_empty() {
            return input.clone();
        }

        let threshold = db_to_linear(self.threshold_db);
        let release_samples = secs_to_samples(self.release_secs, input.sample_rate()).max(1);

        input.map(|_, sample| {
            let level = sample.abs();

            if level > threshold {
                if !state.open {
                    state.open = true;
                    state.release_counter = 0;
                }
            } else if state.open {
                state.release_counter += 1;
                if state.release_counter > release_samples {
                    state.open = false;
                    state.release_counter = 0;
                }
            }

            if state.open { sample } else { sample * CLOSED_GAIN }
        })
    }
}

impl Repair for NoiseGate {
    fn name(&self) -> &'static str {
        "gate"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        self.apply_with_state(input, &mut GateState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_gate_starts_closed() {
        let input = SampleBuffer::new(vec![0.001; 10], 1000.0);
        let output = NoiseGate::default().apply(&input);
        for &s in output.samples() {
            assert!((s - 0.0009).abs() < 1e-7);
        }
    }

    #[test]
    fn test_gate_opens_on_loud_sample() {
        let input = SampleBuffer::new(vec![0.5, 0.5, 0.5], 1000.0);
        let output = NoiseGate::default().apply(&input);
        assert_eq!(output.samples(), input.samples());
    }

    #[test]
    fn test_gate_closes_after_release() {
        // 1 kHz, 5.1 ms release -> 5 samples
        let gate = NoiseGate {
            release_secs: 0.0051,
            ..NoiseGate::default()
        };
        let mut samples = vec![0.5];
        samples.extend(vec![0.001; 10]);
        let input = SampleBuffer::new(samples, 1000.0);
        let output = gate.apply(&input);

        // Open for the loud sample and the five quiet samples of release,
        // closed from the sixth quiet sample on.
        for i in 0..=5 {
            assert_eq!(output.samples()[i], input.samples()[i], "sample {i} should pass");
        }
        for i in 6..11 {
            assert!(
                (output.samples()[i] - 0.0009).abs() < 1e-7,
                "sample {i} should be attenuated"
            );
        }
    }

    #[test]
    fn test_loud_sample_does_not_reset_release() {
        let gate = NoiseGate {
            release_secs: 0.0031,
            ..NoiseGate::default()
        };
        let input = SampleBuffer::new(vec![0.5, 0.001, 0.001, 0.5, 0.001, 0.001, 0.001], 1000.0);
        let mut state = GateState::default();
        let output = gate.apply_with_state(&input, &mut state);

        // The loud sample at index 3 leaves the counter alone, so it reaches
        // 4 > 3 at index 5.
        assert_eq!(output.samples()[4], 0.001);
        assert!((output.samples()[5] - 0.0009).abs() < 1e-7);
        assert!(!state.open);
        assert_eq!(state.release_counter, 0);
    }

    #[test]
    fn test_state_carries_across_calls() {
        let gate = NoiseGate::default();
        let mut state = GateState::default();

        let loud = SampleBuffer::new(vec![0.5; 4], 1000.0);
        gate.apply_with_state(&loud, &mut state);
        assert!(state.open);

        let quiet = SampleBuffer::new(vec![0.001; 4], 1000.0);
        let output = gate.apply_with_state(&quiet, &mut state);
        assert_eq!(output.samples(), quiet.samples());
        assert_eq!(state.release_counter, 4);
    }

    #[test]
    fn test_empty_buffer() {
        let input = SampleBuffer::silence(0, 44100.0);
        assert!(NoiseGate::default().apply(&input).is_empty());
    }
}
