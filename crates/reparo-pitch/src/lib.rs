//! Reparo Pitch - note detection, scale analysis and pitch correction
//!
//! Everything here works on a mono [`SampleBuffer`](reparo_core::SampleBuffer)
//! from `reparo-core`.
//!
//! # Pipeline
//!
//! ```text
//! SampleBuffer -> PitchDetector -> Vec<Note> -> detect_scale / detect_key
//!                                            -> PitchCorrector -> SampleBuffer
//! ```
//!
//! - [`PitchDetector`] / [`detect_notes`] - AMDF estimate per overlapping window
//! - [`frequency_to_note`] - frequency to pitch class, octave and cents
//! - [`detect_scale`] / [`detect_key`] - best scale and most common class
//! - [`correct_to_scale`] - resample off-scale notes onto the nearest degree
//! - [`apply_pitch_shift`] - linear-interpolation resampling shift
//!
//! # Example
//!
//! ```rust
//! use reparo_core::SampleBuffer;
//! use reparo_pitch::{PitchClass, Scale, correct_to_scale, detect_key, detect_notes, detect_scale};
//!
//! // A 100-sample sawtooth at 44 kHz is exactly 440 Hz.
//! let buffer = SampleBuffer::from_fn(22000, 44000.0, |i| (i % 100) as f32 / 100.0 - 0.5);
//!
//! let notes = detect_notes(&buffer);
//! assert_eq!(notes[0].name(), "A4");
//! assert_eq!(detect_key(&notes), PitchClass::A);
//! assert_eq!(detect_scale(&notes), Some(Scale::Major));
//!
//! let corrected = correct_to_scale(&buffer, Scale::Minor, PitchClass::A);
//! assert_eq!(corrected, buffer);
//! ```
//!
//! # Features
//!
//! - `serde` - `Serialize`/`Deserialize` for [`Note`], [`PitchClass`],
//!   [`Scale`] and [`ScaleKey`]

mod correct;
mod detector;
mod error;
mod note;
mod scale;
mod shift;

pub use correct::{
    DEFAULT_DEADBAND_CENTS, PitchCorrector, ScaleDegree, correct_to_scale, nearest_scale_degree,
};
pub use detector::{
    DEFAULT_HOP, DEFAULT_MAX_HZ, DEFAULT_MIN_HZ, DEFAULT_WINDOW, PitchDetector, WindowProgress,
    detect_notes, estimate_frequency,
};
pub use error::{Cancelled, PitchError};
pub use note::{A4_HZ, Note, NoteInfo, PitchClass, c0_hz, frequency_to_note, semitones_from_c0};
pub use scale::{Scale, ScaleKey, detect_key, detect_scale, detect_scale_key};
pub use shift::{apply_pitch_shift, shift_buffer, shift_ratio};
