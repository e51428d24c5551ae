//! Single-pass repair transforms.
//!
//! Every transform is a small parameter struct with usable default values
//! and an implementation of [`Repair`]. Applying a transform never mutates its
//! input: it returns a fresh [`SampleBuffer`] of the same length and sample
//! rate, so transforms can be chained back-to-back without aliasing.
//!
//! Empty buffers are returned unchanged by every transform, since hosts may
//! call repairs before any audio is loaded.
//!
//! The gate, de-hum and compressor keep running state (gate position, filter
//! delay line, smoothed gain). [`Repair::apply`] starts that state fresh on
//! each call; the `apply_with_state` methods on those types let a caller keep
//! it between calls when feeding a recording piece by piece.

mod compressor;
mod declick;
mod dehum;
mod eq;
mod fade;
mod gate;
mod normalize;

pub use compressor::{Compressor, CompressorState};
pub use declick::ClickRemover;
pub use dehum::DeHum;
pub use eq::BroadbandEq;
pub use fade::Fade;
pub use gate::{GateState, NoiseGate};
pub use normalize::Normalizer;

use crate::SampleBuffer;

/// Object-safe interface shared by all repair transforms.
///
/// ```rust
/// use reparo_core::{Fade, Normalizer, Repair, SampleBuffer};
///
/// let chain: Vec<Box<dyn Repair>> = vec![
///     Box::new(Normalizer { target_db: -1.0 }),
///     Box::new(Fade { fade_in_secs: 0.01, fade_out_secs: 0.01 }),
/// ];
///
/// let input = SampleBuffer::from_fn(4800, 48000.0, |i| (i as f32 * 0.05).sin() * 0.2);
/// let output = chain.iter().fold(input, |b, step| step.apply(&b));
/// assert_eq!(output.samples()[0], 0.0);
/// ```
pub trait Repair {
    /// Short identifier used in logs and preset files.
    fn name(&self) -> &'static str;

    /// Run the transform over `input` and return the repaired copy.
    fn apply(&self, input: &SampleBuffer) -> SampleBuffer;
}
