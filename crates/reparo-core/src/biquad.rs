//! Biquad (bi-quadratic) filter section.
//!
//! The de-hum transform runs a single notch section over the whole buffer.
//! Coefficients come from the RBJ Audio EQ Cookbook and are stored already
//! normalized by `a0`.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Normalized second-order coefficients.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficient for x\[n\].
    pub b0: f32,
    /// Feedforward coefficient for x\[n-1\].
    pub b1: f32,
    /// Feedforward coefficient for x\[n-2\].
    pub b2: f32,
    /// Feedback coefficient for y\[n-1\].
    pub a1: f32,
    /// Feedback coefficient for y\[n-2\].
    pub a2: f32,
}

impl BiquadCoefficients {
    /// `y[n] = x[n]`.
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build from raw cookbook coefficients, normalizing by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Notch (band-reject) coefficients.
    ///
    /// Returns `None` when the request cannot produce a usable filter: a
    /// frequency outside (0, Nyquist), a non-positive Q, or any coefficient
    /// that comes out non-finite.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Notch frequency in Hz
    /// * `q` - Q factor (notch width = frequency / Q)
    /// * `sample_rate` - Sample rate in Hz
    pub fn notch(frequency: f32, q: f32, sample_rate: f32) -> Option<Self> {
        if !(frequency > 0.0 && frequency < sample_rate * 0.5 && q > 0.0) {
            return None;
        }

        let omega = 2.0 * PI * frequency / sample_rate;
        let cos_omega = cosf(omega);
        let alpha = sinf(omega) / (2.0 * q);

        let coeffs = Self::from_raw(
            1.0,
            -2.0 * cos_omega,
            1.0,
            1.0 + alpha,
            -2.0 * cos_omega,
            1.0 - alpha,
        );
        coeffs.is_finite().then_some(coeffs)
    }

    /// `true` when every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
            .iter()
            .all(|c| c.is_finite())
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::PASSTHROUGH
    }
}

/// Direct Form I biquad: coefficients plus a two-sample delay line.
///
/// The delay line survives between calls, so a caller that processes a long
/// recording in pieces can keep one `Biquad` and feed it every piece in order.
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    coeffs: BiquadCoefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Create a section with cleared state.
    pub fn new(coeffs: BiquadCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coeffs
    }

    /// Replace the coefficients, keeping the delay line.
    pub fn set_coefficients(&mut self, coeffs: BiquadCoefficients) {
        self.coeffs = coeffs;
    }

    /// Process a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output =
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Filter a slice in place.
    pub fn process_slice(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the delay line without touching the coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
