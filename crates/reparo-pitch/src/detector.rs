//! Windowed fundamental-frequency detection.
//!
//! Each analysis window is reduced to one frequency estimate by average
//! magnitude difference (AMDF) minimization: for every candidate lag the
//! absolute differences between the window and its lagged copy are summed,
//! and the lag with the smallest sum is taken as the period. There is no
//! cumulative normalization and no dip threshold, so for a strictly periodic
//! window the first lag with a zero sum wins.
//!
//! Windows overlap (4096 samples, hop 2048 by default) and every window that
//! fits completely inside the buffer is analyzed. Adjacent windows that land
//! on the same pitch produce separate, overlapping notes.

use core::ops::ControlFlow;

use reparo_core::{SampleBuffer, mean_abs};

use crate::{Cancelled, Note, PitchError};

/// Default analysis window in samples.
pub const DEFAULT_WINDOW: usize = 4096;
/// Default hop between window starts in samples.
pub const DEFAULT_HOP: usize = 2048;
/// Estimates at or below this frequency are discarded.
pub const DEFAULT_MIN_HZ: f32 = 50.0;
/// Estimates at or above this frequency are discarded.
pub const DEFAULT_MAX_HZ: f32 = 2000.0;

/// Highest frequency the lag search considers; sets the shortest lag.
const SEARCH_MAX_HZ: f32 = 1500.0;
/// Lowest frequency the lag search considers; sets the longest lag.
const SEARCH_MIN_HZ: f32 = 50.0;

/// Estimate the fundamental of one window.
///
/// Lags run from `floor(sr / 1500)` to `floor(sr / 50)` inclusive; lags below
/// one and lags that leave no sample pairs are skipped. Returns
/// `sample_rate / best_lag`, or `0.0` when no lag could be evaluated.
///
/// # Example
///
/// ```rust
/// use reparo_pitch::estimate_frequency;
///
/// // 100-sample period at 44.1 kHz
/// let window: Vec<f32> = (0..4096).map(|i| ((i % 100) as f32 / 50.0) - 1.0).collect();
/// assert_eq!(estimate_frequency(&window, 44100.0), 441.0);
/// ```
pub fn estimate_frequency(window: &[f32], sample_rate: f32) -> f32 {
    let min_lag = ((sample_rate / SEARCH_MAX_HZ).floor() as usize).max(1);
    let max_lag = (sample_rate / SEARCH_MIN_HZ).floor() as usize;

    let mut best: Option<(usize, f32)> = None;

    for lag in min_lag..=max_lag {
        if lag >= window.len() {
            break;
        }

        let difference: f32 = window
            .iter()
            .zip(&window[lag..])
            .map(|(a, b)| (a - b).abs())
            .sum();

        if best.is_none_or(|(_, smallest)| difference < smallest) {
            best = Some((lag, difference));
        }
    }

    best.map_or(0.0, |(lag, _)| sample_rate / lag as f32)
}

/// Position of the window about to be analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowProgress {
    /// Zero-based window number.
    pub index: usize,
    /// Number of windows in this pass.
    pub total: usize,
}

/// Window geometry and accepted frequency band.
///
/// ```rust
/// use reparo_pitch::PitchDetector;
///
/// assert!(PitchDetector::new(4096, 2048).is_ok());
/// assert!(PitchDetector::new(1024, 2048).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchDetector {
    window: usize,
    hop: usize,
    min_hz: f32,
    max_hz: f32,
}

impl Default for PitchDetector {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            hop: DEFAULT_HOP,
            min_hz: DEFAULT_MIN_HZ,
            max_hz: DEFAULT_MAX_HZ,
        }
    }
}

impl PitchDetector {
    /// Detector with a custom window and hop and the default band.
    pub fn new(window: usize, hop: usize) -> Result<Self, PitchError> {
        if window == 0 || hop == 0 || hop > window {
            return Err(PitchError::InvalidGeometry { window, hop });
        }
        Ok(Self {
            window,
            hop,
            ..Self::default()
        })
    }

    /// Replace the accepted band. Estimates must fall strictly inside it.
    pub fn with_band(self, min_hz: f32, max_hz: f32) -> Result<Self, PitchError> {
        if !(min_hz >= 0.0 && max_hz > min_hz && max_hz.is_finite()) {
            return Err(PitchError::InvalidBand { min_hz, max_hz });
        }
        Ok(Self {
            min_hz,
            max_hz,
            ..self
        })
    }

    /// Window length in samples.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Hop in samples.
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Number of complete windows in a buffer of `len` samples.
    pub fn window_count(&self, len: usize) -> usize {
        if len < self.window {
            0
        } else {
            (len - self.window) / self.hop + 1
        }
    }

    /// Detect notes across the whole buffer.
    pub fn detect(&self, buffer: &SampleBuffer) -> Vec<Note> {
        match self.detect_with(buffer, |_| ControlFlow::Continue(())) {
            Ok(notes) => notes,
            Err(Cancelled) => Vec::new(),
        }
    }

    /// Detect notes, calling `on_window` before each window is analyzed.
    ///
    /// Returning [`ControlFlow::Break`] from the callback abandons the pass
    /// and yields [`Cancelled`].
    pub fn detect_with(
        &self,
        buffer: &SampleBuffer,
        mut on_window: impl FnMut(WindowProgress) -> ControlFlow<()>,
    ) -> Result<Vec<Note>, Cancelled> {
        let samples = buffer.samples();
        let sample_rate = buffer.sample_rate();
        let total = self.window_count(samples.len());
        let mut notes = Vec::new();

        for index in 0..total {
            if on_window(WindowProgress { index, total }).is_break() {
                return Err(Cancelled);
            }

            let start = index * self.hop;
            let end = start + self.window;
            let window = &samples[start..end];

            let frequency = estimate_frequency(window, sample_rate);
            if frequency <= self.min_hz || frequency >= self.max_hz {
                continue;
            }

            if let Some(note) =
                Note::from_window(frequency, start, end, sample_rate, mean_abs(window))
            {
                notes.push(note);
            }
        }

        Ok(notes)
    }
}

/// Detect notes with the default detector (4096 / 2048, 50 to 2000 Hz).
pub fn detect_notes(buffer: &SampleBuffer) -> Vec<Note> {
    PitchDetector::default().detect(buffer)
}
