//! Note naming: frequency to pitch class, octave and cents.
//!
//! Equal temperament referenced to A4 = 440 Hz. Semitones are counted from
//! C0 (`440 * 2^-4.75`, about 16.35 Hz), so the integer part of the semitone
//! count maps directly onto octave and pitch class.

use core::fmt;
use core::str::FromStr;

use crate::PitchError;

/// Reference pitch for A4 in Hz.
pub const A4_HZ: f32 = 440.0;

/// Frequency of C0 in Hz, 4.75 octaves below A4.
pub fn c0_hz() -> f32 {
    A4_HZ * 2.0_f32.powf(-4.75)
}

/// Fractional semitones above C0. Only meaningful for `frequency > 0`.
pub fn semitones_from_c0(frequency: f32) -> f32 {
    12.0 * (frequency / c0_hz()).log2()
}

/// One of the twelve chromatic pitch classes, numbered from C = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All classes in chromatic order starting at C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitones above C, `0..12`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Class for any semitone number; wraps with Euclidean modulo.
    pub fn from_semitone(semitone: i32) -> Self {
        Self::ALL[semitone.rem_euclid(12) as usize]
    }

    /// This class moved up by `semitones` (wrapping).
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitone(self.index() as i32 + semitones)
    }

    /// Name spelled with sharps.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = PitchError;

    /// Accepts a letter `A`-`G` (either case) optionally followed by `#` or `b`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PitchError::UnknownPitchClass(s.to_string());
        let trimmed = s.trim();
        let mut chars = trimmed.chars();

        let natural = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(unknown()),
        };

        let accidental = match chars.as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(unknown()),
        };

        Ok(Self::from_semitone(natural + accidental))
    }
}

/// Result of naming a frequency.
///
/// `pitch_class` is `None` for frequencies that have no name (zero,
/// negative or non-finite); that sentinel displays as `N/A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteInfo {
    /// Nearest chromatic class.
    pub pitch_class: Option<PitchClass>,
    /// Scientific pitch octave (A4 = 440 Hz).
    pub octave: i32,
    /// Signed distance from the nearest class, rounded to whole cents.
    pub cents: i32,
}

impl NoteInfo {
    /// Sentinel for frequencies with no note name.
    pub const UNNAMED: NoteInfo = NoteInfo {
        pitch_class: None,
        octave: 0,
        cents: 0,
    };
}

impl fmt::Display for NoteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pitch_class {
            Some(pc) => write!(f, "{pc}{}", self.octave),
            None => f.write_str("N/A"),
        }
    }
}

/// Name a frequency.
///
/// # Example
///
/// ```rust
/// use reparo_pitch::{PitchClass, frequency_to_note};
///
/// let a4 = frequency_to_note(440.0);
/// assert_eq!(a4.pitch_class, Some(PitchClass::A));
/// assert_eq!(a4.octave, 4);
/// assert_eq!(a4.cents, 0);
/// assert_eq!(a4.to_string(), "A4");
///
/// assert_eq!(frequency_to_note(0.0).to_string(), "N/A");
/// ```
pub fn frequency_to_note(frequency: f32) -> NoteInfo {
    if !(frequency.is_finite() && frequency > 0.0) {
        return NoteInfo::UNNAMED;
    }

    let semitones = semitones_from_c0(frequency);
    let nearest = (semitones + 0.5).floor();
    let nearest_int = nearest as i32;

    NoteInfo {
        pitch_class: Some(PitchClass::from_semitone(nearest_int)),
        octave: (nearest_int + 12).div_euclid(12) - 1,
        cents: ((semitones - nearest) * 100.0).round() as i32,
    }
}

/// A pitched region found by the detector.
///
/// Times and sample bounds are those of the analysis window the estimate
/// came from, so consecutive notes overlap by the window/hop difference.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Estimated fundamental in Hz.
    pub frequency: f32,
    /// Nearest chromatic class.
    pub pitch_class: PitchClass,
    /// Scientific pitch octave.
    pub octave: i32,
    /// Signed distance from `pitch_class`, in whole cents.
    pub cents: i32,
    /// Window start in seconds.
    pub start_time: f32,
    /// Window end in seconds.
    pub end_time: f32,
    /// First sample of the window.
    pub start_sample: usize,
    /// One past the last sample of the window.
    pub end_sample: usize,
    /// Mean absolute level of the window.
    pub amplitude: f32,
}

impl Note {
    /// Build a note from a window estimate, or `None` when the frequency has
    /// no name.
    pub fn from_window(
        frequency: f32,
        start_sample: usize,
        end_sample: usize,
        sample_rate: f32,
        amplitude: f32,
    ) -> Option<Self> {
        let info = frequency_to_note(frequency);
        Some(Self {
            frequency,
            pitch_class: info.pitch_class?,
            octave: info.octave,
            cents: info.cents,
            start_time: start_sample as f32 / sample_rate,
            end_time: end_sample as f32 / sample_rate,
            start_sample,
            end_sample,
            amplitude,
        })
    }

    /// Scientific pitch name, e.g. `A4`.
    pub fn name(&self) -> String {
        format!("{}{}", self.pitch_class, self.octave)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:+} cents ({:.1} Hz)",
            self.pitch_class, self.octave, self.cents, self.frequency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4() {
        let info = frequency_to_note(440.0);
        assert_eq!(info.pitch_class, Some(PitchClass::A));
        assert_eq!(info.octave, 4);
        assert_eq!(info.cents, 0);
    }

    #[test]
    fn test_middle_c() {
        let info = frequency_to_note(261.63);
        assert_eq!(info.pitch_class, Some(PitchClass::C));
        assert_eq!(info.octave, 4);
        assert_eq!(info.cents, 0);
    }

    #[test]
    fn test_cents_sign() {
        // A quarter-tone region either side of A4
        let sharp = frequency_to_note(440.0 * 2.0_f32.powf(20.0 / 1200.0));
        assert_eq!(sharp.pitch_class, Some(PitchClass::A));
        assert_eq!(sharp.cents, 20);

        let flat = frequency_to_note(440.0 * 2.0_f32.powf(-30.0 / 1200.0));
        assert_eq!(flat.pitch_class, Some(PitchClass::A));
        assert_eq!(flat.cents, -30);
    }

    #[test]
    fn test_octave_boundary() {
        // B3 is just under C4
        let b3 = frequency_to_note(246.94);
        assert_eq!(b3.pitch_class, Some(PitchClass::B));
        assert_eq!(b3.octave, 3);

        let c4 = frequency_to_note(261.63);
        assert_eq!(c4.octave, 4);
    }

    #[test]
    fn test_below_c0() {
        // An octave below C0 wraps into octave -1
        let info = frequency_to_note(c0_hz() / 2.0);
        assert_eq!(info.pitch_class, Some(PitchClass::C));
        assert_eq!(info.octave, -1);
    }

    #[test]
    fn test_unnamed_frequencies() {
        for f in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let info = frequency_to_note(f);
            assert_eq!(info, NoteInfo::UNNAMED);
            assert_eq!(info.to_string(), "N/A");
        }
    }

    #[test]
    fn test_pitch_class_parse() {
        assert_eq!("C".parse::<PitchClass>(), Ok(PitchClass::C));
        assert_eq!("f#".parse::<PitchClass>(), Ok(PitchClass::FSharp));
        assert_eq!("Db".parse::<PitchClass>(), Ok(PitchClass::CSharp));
        assert_eq!("Cb".parse::<PitchClass>(), Ok(PitchClass::B));
        assert_eq!("B#".parse::<PitchClass>(), Ok(PitchClass::C));
        assert!("H".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_pitch_class_display_uses_sharps() {
        let names: Vec<String> = PitchClass::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"]
        );
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(PitchClass::A.transpose(3), PitchClass::C);
        assert_eq!(PitchClass::C.transpose(-1), PitchClass::B);
    }

    #[test]
    fn test_note_from_window() {
        let note = Note::from_window(440.0, 4096, 8192, 44100.0, 0.25).unwrap();
        assert_eq!(note.name(), "A4");
        assert!((note.start_time - 4096.0 / 44100.0).abs() < 1e-7);
        assert_eq!(note.end_sample, 8192);
        assert!(Note::from_window(0.0, 0, 4096, 44100.0, 0.0).is_none());
    }
}
