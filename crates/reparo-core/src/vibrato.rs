//! Amplitude-domain vibrato.
//!
//! Despite the name this does not bend pitch: each sample is scaled by
//! `2^(sin(2*pi*rate*t) * depth / 1200)`, a gain that swings around unity
//! at the LFO rate. Settings are a plain value owned by the caller and handed
//! to every call, so nothing is shared between hosts.

use core::f32::consts::PI;
use libm::{exp2f, floor, sinf};

use crate::{Repair, SampleBuffer};

/// Vibrato switch and LFO shape.
///
/// | Field | Default |
/// |-------|---------|
/// | `enabled` | false |
/// | `rate_hz` | 5.0 |
/// | `depth_percent` | 50.0 |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibratoSettings {
    /// When false, [`apply_vibrato`] returns an unchanged copy.
    pub enabled: bool,
    /// LFO rate in Hz.
    pub rate_hz: f32,
    /// Depth in percent of a semitone.
    pub depth_percent: f32,
}

impl Default for VibratoSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            rate_hz: 5.0,
            depth_percent: 50.0,
        }
    }
}

/// Apply vibrato to `input`.
///
/// `rate_override` and `depth_override` replace the values in `settings` for
/// this call only; `None` or `0.0` falls back to the settings.
///
/// # Example
///
/// ```rust
/// use reparo_core::{SampleBuffer, VibratoSettings, apply_vibrato};
///
/// let input = SampleBuffer::new(vec![0.5; 100], 44100.0);
///
/// let off = VibratoSettings::default();
/// assert_eq!(apply_vibrato(&input, &off, None, None), input);
///
/// let on = VibratoSettings { enabled: true, ..off };
/// assert_ne!(apply_vibrato(&input, &on, Some(6.0), None), input);
/// ```
pub fn apply_vibrato(
    input: &SampleBuffer,
    settings: &VibratoSettings,
    rate_override: Option<f32>,
    depth_override: Option<f32>,
) -> SampleBuffer {
    if !settings.enabled {
        return input.clone();
    }

    let pick = |over: Option<f32>, fallback: f32| match over {
        Some(value) if value != 0.0 => value,
        _ => fallback,
    };
    let rate = pick(rate_override, settings.rate_hz);
    let depth = pick(depth_override, settings.depth_percent);

    let semitones = depth / 100.0 / 12.0;

    // LFO phase in cycles, wrapped to [0, 1)
    let phase_inc = f64::from(rate) / f64::from(input.sample_rate());
    let mut phase = 0.0_f64;

    input.map(|_, sample| {
        let gain = exp2f(sinf(2.0 * PI * phase as f32) * semitones);
        phase += phase_inc;
        phase -= floor(phase);
        sample * gain
    })
}

impl Repair for VibratoSettings {
    fn name(&self) -> &'static str {
        "vibrato"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        apply_vibrato(input, self, None, None)
    }
}
