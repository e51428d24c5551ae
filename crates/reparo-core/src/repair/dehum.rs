//! Mains hum removal.

use crate::{Biquad, BiquadCoefficients, Repair, SampleBuffer};

/// Single forward notch at the mains frequency.
///
/// Q is `frequency / bandwidth_hz`. The filter runs once, forward only, so
/// it carries the phase shift of one biquad section.
///
/// A frequency outside (0, Nyquist) or a non-positive bandwidth leaves the
/// buffer untouched.
///
/// # Example
///
/// ```rust
/// use reparo_core::{DeHum, Repair, SampleBuffer};
///
/// let europe = DeHum { frequency: 50.0, bandwidth_hz: 10.0 };
/// let input = SampleBuffer::silence(1024, 48000.0);
/// assert_eq!(europe.apply(&input).len(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeHum {
    /// Notch center frequency in Hz.
    pub frequency: f32,
    /// Notch width in Hz.
    pub bandwidth_hz: f32,
}

impl Default for DeHum {
    fn default() -> Self {
        Self {
            frequency: 60.0,
            bandwidth_hz: 10.0,
        }
    }
}

impl DeHum {
    /// Notch coefficients for `sample_rate`, or `None` when the parameters
    /// cannot produce a finite filter.
    pub fn coefficients(&self, sample_rate: f32) -> Option<BiquadCoefficients> {
        if self.bandwidth_hz <= 0.0 {
            return None;
        }
        BiquadCoefficients::notch(
            self.frequency,
            self.frequency / self.bandwidth_hz,
            sample_rate,
        )
    }

    /// A filter section ready to be passed to [`apply_with_state`](Self::apply_with_state).
    pub fn filter(&self, sample_rate: f32) -> Option<Biquad> {
        self.coefficients(sample_rate).map(Biquad::new)
    }

    /// Run `input` through `filter`, keeping its delay line for the next call.
    pub fn apply_with_state(&self, input: &SampleBuffer, filter: &mut Biquad) -> SampleBuffer {
        let mut output = input.clone();
        filter.process_slice(output.samples_mut());
        output
    }
}

impl Repair for DeHum {
    fn name(&self) -> &'static str {
        "dehum"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        if input.is_empty() {
            return input.clone();
        }

        match self.filter(input.sample_rate()) {
            Some(mut filter) => self.apply_with_state(input, &mut filter),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    frequency = self.frequency,
                    bandwidth = self.bandwidth_hz,
                    sample_rate = input.sample_rate(),
                    "dehum: notch out of range, buffer left unchanged"
                );
                input.clone()
            }
        }
    }
}
