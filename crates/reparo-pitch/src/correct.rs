//! Scale-constrained pitch correction.
//!
//! The buffer is re-analyzed, every detected note is compared against the
//! pitch classes of the requested scale, and notes that sit more than the
//! deadband away from their nearest degree are resampled toward it.
//!
//! Detection windows overlap, so a corrected window cannot be written back
//! whole. Each flagged note owns the span from its own start up to the start
//! of the next detected note (or its full window when it is last). The
//! original input is resampled from the note start and only the owned span is
//! copied into the output. The resampler may read past the window, so a
//! flattened note keeps real signal up to the end of its span. Samples outside
//! every owned span of a flagged note are never touched.

use core::ops::ControlFlow;

use reparo_core::SampleBuffer;

use crate::{
    Cancelled, Note, PitchClass, PitchDetector, Scale, WindowProgress, apply_pitch_shift,
    semitones_from_c0,
};

/// Notes closer than this to a scale degree are left alone.
pub const DEFAULT_DEADBAND_CENTS: f32 = 10.0;

/// Nearest scale degree for a frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleDegree {
    /// Closest pitch class in the scale.
    pub pitch_class: PitchClass,
    /// Signed distance from that class in cents; positive means sharp.
    pub deviation_cents: f32,
}

/// Find the scale class closest to `frequency` on the pitch-class circle.
///
/// Distance is measured with wraparound, so B is one semitone from C. Ties
/// go to the earlier entry in `scale`. Returns `None` for an empty scale or
/// a frequency with no pitch.
///
/// ```rust
/// use reparo_pitch::{PitchClass, Scale, nearest_scale_degree};
///
/// let c_major = Scale::Major.pitch_classes(PitchClass::C);
/// // Halfway-ish between A# and B, pulled to B
/// let degree = nearest_scale_degree(480.0, &c_major).unwrap();
/// assert_eq!(degree.pitch_class, PitchClass::B);
/// assert!(degree.deviation_cents < 0.0);
/// ```
pub fn nearest_scale_degree(frequency: f32, scale: &[PitchClass]) -> Option<ScaleDegree> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return None;
    }

    let position = semitones_from_c0(frequency).rem_euclid(12.0);

    let mut best: Option<(PitchClass, f32)> = None;
    for &degree in scale {
        let distance = (position - degree.index() as f32 + 6.0).rem_euclid(12.0) - 6.0;
        if best.is_none_or(|(_, closest)| distance.abs() < closest.abs()) {
            best = Some((degree, distance));
        }
    }

    best.map(|(pitch_class, distance)| ScaleDegree {
        pitch_class,
        deviation_cents: distance * 100.0,
    })
}

/// Pitch corrector: a detector plus the deadband.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchCorrector {
    /// Detector used to find the notes to correct.
    pub detector: PitchDetector,
    /// Minimum absolute deviation, in cents, that triggers a correction.
    pub deadband_cents: f32,
}

impl Default for PitchCorrector {
    fn default() -> Self {
        Self {
            detector: PitchDetector::default(),
            deadband_cents: DEFAULT_DEADBAND_CENTS,
        }
    }
}

impl PitchCorrector {
    /// Detect notes in `buffer` and pull them onto `scale` in `key`.
    pub fn correct(&self, buffer: &SampleBuffer, scale: Scale, key: PitchClass) -> SampleBuffer {
        match self.correct_with(buffer, scale, key, |_| ControlFlow::Continue(())) {
            Ok(corrected) => corrected,
            Err(Cancelled) => buffer.clone(),
        }
    }

    /// [`correct`](Self::correct) with a per-window progress callback.
    pub fn correct_with(
        &self,
        buffer: &SampleBuffer,
        scale: Scale,
        key: PitchClass,
        on_window: impl FnMut(WindowProgress) -> ControlFlow<()>,
    ) -> Result<SampleBuffer, Cancelled> {
        let notes = self.detector.detect_with(buffer, on_window)?;
        Ok(self.correct_notes(buffer, &notes, &scale.pitch_classes(key)))
    }

    /// Splice corrections for already-detected `notes` into a copy of
    /// `buffer`. `notes` must be ordered by start sample.
    pub fn correct_notes(
        &self,
        buffer: &SampleBuffer,
        notes: &[Note],
        scale: &[PitchClass],
    ) -> SampleBuffer {
        let source = buffer.samples();
        let mut output = buffer.clone();

        for (idx, note) in notes.iter().enumerate() {
            let Some(degree) = nearest_scale_degree(note.frequency, scale) else {
                continue;
            };
            if degree.deviation_cents.abs() <= self.deadband_cents {
                continue;
            }

            let start = note.start_sample;
            let end = note.end_sample.min(source.len());
            if start >= end {
                continue;
            }
            let owned_end = notes
                .get(idx + 1)
                .map_or(end, |next| next.start_sample.clamp(start, end));

            let semitones = degree.deviation_cents / 100.0;
            let owned = owned_end - start;

            // Corrections stay within half an octave, so reads stay under twice the span.
            let read_end = (start + 2 * owned + 1).min(source.len());
            let shifted = apply_pitch_shift(&source[start..read_end], semitones);
            output.samples_mut()[start..owned_end].copy_from_slice(&shifted[..owned]);
        }

        output
    }
}

/// Correct `buffer` to `scale` in `key` with the default detector and
/// deadband.
pub fn correct_to_scale(buffer: &SampleBuffer, scale: Scale, key: PitchClass) -> SampleBuffer {
    PitchCorrector::default().correct(buffer, scale, key)
}
