//! Owned sample container.
//!
//! A [`SampleBuffer`] is one channel of audio: a fixed-length run of `f32`
//! samples (nominally in \[-1, 1\]) together with the rate they were recorded
//! at. The length is set at construction; mutable access only ever hands out
//! a slice, so no transform can grow or shrink a buffer behind its owner's back.

use alloc::vec;
use alloc::vec::Vec;

use crate::math;

/// One channel of audio with its sample rate.
///
/// # Example
///
/// ```rust
/// use reparo_core::SampleBuffer;
///
/// let buffer = SampleBuffer::from_fn(4410, 44100.0, |i| if i == 0 { 1.0 } else { 0.0 });
/// assert_eq!(buffer.len(), 4410);
/// assert!((buffer.duration_secs() - 0.1).abs() < 1e-6);
/// assert_eq!(buffer.peak(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: f32,
}

impl SampleBuffer {
    /// Wrap existing samples.
    pub fn new(samples: Vec<f32>, sample_rate: f32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// A buffer of `len` zero samples.
    pub fn silence(len: usize, sample_rate: f32) -> Self {
        Self::new(vec![0.0; len], sample_rate)
    }

    /// Build a buffer by evaluating `f` at every sample index.
    pub fn from_fn(len: usize, sample_rate: f32, f: impl FnMut(usize) -> f32) -> Self {
        Self::new((0..len).map(f).collect(), sample_rate)
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Read-only view of the samples.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mutable view of the samples. The length cannot change through it.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Give up the buffer and return the raw samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.samples.len() as f32 / self.sample_rate
        } else {
            0.0
        }
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        math::peak(&self.samples)
    }

    /// New buffer at the same rate whose samples are `f(index, sample)`.
    ///
    /// This is the copy-not-mutate primitive most gain-style transforms are
    /// built on.
    pub fn map(&self, mut f: impl FnMut(usize, f32) -> f32) -> Self {
        Self::new(
            self.samples
                .iter()
                .enumerate()
                .map(|(i, &s)| f(i, s))
                .collect(),
            self.sample_rate,
        )
    }
}

impl AsRef<[f32]> for SampleBuffer {
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}
