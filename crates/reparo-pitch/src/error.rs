//! Error types for pitch analysis.

use thiserror::Error;

/// Errors raised while configuring or parsing pitch analysis inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PitchError {
    /// Window and hop sizes that cannot tile a buffer.
    #[error("invalid window geometry: window {window}, hop {hop} (need window > 0 and 0 < hop <= window)")]
    InvalidGeometry {
        /// Requested window length in samples.
        window: usize,
        /// Requested hop in samples.
        hop: usize,
    },

    /// Frequency band with a non-positive or inverted range.
    #[error("invalid frequency band: {min_hz} Hz to {max_hz} Hz")]
    InvalidBand {
        /// Lower bound in Hz.
        min_hz: f32,
        /// Upper bound in Hz.
        max_hz: f32,
    },

    /// Text that does not name one of the twelve pitch classes.
    #[error("unknown pitch class: {0}")]
    UnknownPitchClass(String),

    /// Text that does not name a supported scale.
    #[error("unknown scale: {0}")]
    UnknownScale(String),
}

/// Returned when the per-window callback asks detection to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pitch detection cancelled")]
pub struct Cancelled;
