//! Scale and key analysis.
//!
//! Each scale carries two separate tables. [`Scale::note_names`] is a fixed
//! set of names used to score detected notes. [`Scale::intervals`] is
//! tonic-relative and drives correction in any key.

use core::fmt;
use core::str::FromStr;

use crate::{Note, PitchClass, PitchError};

use PitchClass::{A, ASharp, B, C, D, DSharp, E, F, FSharp, G};

/// Supported scales, in scoring priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[allow(missing_docs)]
pub enum Scale {
    Major,
    Minor,
    Pentatonic,
    Blues,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
}

impl Scale {
    /// Every scale, in the order ties are broken.
    pub const ALL: [Scale; 8] = [
        Scale::Major,
        Scale::Minor,
        Scale::Pentatonic,
        Scale::Blues,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
    ];

    /// Lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::Minor => "minor",
            Scale::Pentatonic => "pentatonic",
            Scale::Blues => "blues",
            Scale::Dorian => "dorian",
            Scale::Phrygian => "phrygian",
            Scale::Lydian => "lydian",
            Scale::Mixolydian => "mixolydian",
        }
    }

    /// Literal note-name set used by [`detect_scale`].
    pub fn note_names(self) -> &'static [PitchClass] {
        match self {
            Scale::Major => &[C, D, E, F, G, A, B],
            Scale::Minor => &[A, B, C, D, E, F, G],
            Scale::Pentatonic => &[C, D, E, G, A],
            Scale::Blues => &[C, DSharp, E, FSharp, G, ASharp],
            Scale::Dorian => &[D, E, F, G, A, B, C],
            Scale::Phrygian => &[E, F, G, A, B, C, D],
            Scale::Lydian => &[F, G, A, B, C, D, E],
            Scale::Mixolydian => &[G, A, B, C, D, E, F],
        }
    }

    /// Semitone offsets from the tonic.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Scale::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
        }
    }

    /// Pitch classes of this scale built on `key`.
    ///
    /// ```rust
    /// use reparo_pitch::{PitchClass, Scale};
    ///
    /// let g_major = Scale::Major.pitch_classes(PitchClass::G);
    /// assert!(g_major.contains(&PitchClass::FSharp));
    /// assert!(!g_major.contains(&PitchClass::F));
    /// ```
    pub fn pitch_classes(self, key: PitchClass) -> Vec<PitchClass> {
        self.intervals()
            .iter()
            .map(|&offset| key.transpose(i32::from(offset)))
            .collect()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scale {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Scale::ALL
            .into_iter()
            .find(|scale| scale.name() == wanted)
            .ok_or_else(|| PitchError::UnknownScale(s.to_string()))
    }
}

/// A scale anchored on a tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleKey {
    /// Scale type.
    pub scale: Scale,
    /// Tonic.
    pub key: PitchClass,
}

impl fmt::Display for ScaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.scale)
    }
}

/// Best-matching scale for a set of notes.
///
/// Each scale scores the number of distinct detected names found in its name
/// set; the highest score wins and ties go to the earlier scale in
/// [`Scale::ALL`]. Returns `None` (shown as `Unknown`) for an empty list.
///
/// ```rust
/// use reparo_pitch::{Scale, detect_scale};
///
/// assert_eq!(detect_scale(&[]), None);
/// ```
pub fn detect_scale(notes: &[Note]) -> Option<Scale> {
    if notes.is_empty() {
        return None;
    }

    let mut present = [false; 12];
    for note in notes {
        present[note.pitch_class.index()] = true;
    }

    let mut best: Option<(Scale, usize)> = None;
    for scale in Scale::ALL {
        let score = scale
            .note_names()
            .iter()
            .filter(|pc| present[pc.index()])
            .count();
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((scale, score));
        }
    }

    best.map(|(scale, _)| scale)
}

/// Most frequent pitch class among `notes`.
///
/// Ties go to the class encountered first; an empty list yields C.
pub fn detect_key(notes: &[Note]) -> PitchClass {
    let mut counts: Vec<(PitchClass, usize)> = Vec::new();
    for note in notes {
        match counts.iter_mut().find(|(pc, _)| *pc == note.pitch_class) {
            Some((_, count)) => *count += 1,
            None => counts.push((note.pitch_class, 1)),
        }
    }

    let mut best: Option<(PitchClass, usize)> = None;
    for (pc, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((pc, count));
        }
    }

    best.map_or(PitchClass::C, |(pc, _)| pc)
}

/// Scale and key together, or `None` for an empty note list.
pub fn detect_scale_key(notes: &[Note]) -> Option<ScaleKey> {
    detect_scale(notes).map(|scale| ScaleKey {
        scale,
        key: detect_key(notes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch_class: PitchClass) -> Note {
        Note {
            frequency: 440.0,
            pitch_class,
            octave: 4,
            cents: 0,
            start_time: 0.0,
            end_time: 0.1,
            start_sample: 0,
            end_sample: 4096,
            amplitude: 0.5,
        }
    }

    fn notes(classes: &[PitchClass]) -> Vec<Note> {
        classes.iter().copied().map(note).collect()
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(detect_scale(&[]), None);
        assert_eq!(detect_key(&[]), PitchClass::C);
        assert_eq!(detect_scale_key(&[]), None);
    }

    #[test]
    fn test_white_keys_pick_major() {
        // Major, minor and the modes all score 7; major is declared first.
        let found = notes(&[C, D, E, F, G, A, B]);
        assert_eq!(detect_scale(&found), Some(Scale::Major));
    }

    #[test]
    fn test_blues_notes() {
        let found = notes(&[C, DSharp, FSharp, ASharp]);
        assert_eq!(detect_scale(&found), Some(Scale::Blues));
    }

    #[test]
    fn test_all_zero_scores_pick_major() {
        let found = notes(&[PitchClass::CSharp, PitchClass::GSharp]);
        assert_eq!(detect_scale(&found), Some(Scale::Major));
    }

    #[test]
    fn test_duplicates_count_once_for_scale() {
        // Repeating D# must not outweigh distinct naturals.
        let found = notes(&[DSharp, DSharp, DSharp, DSharp, C, D, E, F]);
        assert_eq!(detect_scale(&found), Some(Scale::Major));
    }

    #[test]
    fn test_key_most_frequent() {
        let found = notes(&[C, G, G, E, G]);
        assert_eq!(detect_key(&found), G);
    }

    #[test]
    fn test_key_tie_goes_to_first_encountered() {
        let found = notes(&[E, C, C, E]);
        assert_eq!(detect_key(&found), E);
    }

    #[test]
    fn test_catalogs_agree_in_home_keys() {
        // Each name set is the interval set rooted on the name set's first note
        // for the diatonic scales.
        for scale in [Scale::Major, Scale::Minor, Scale::Dorian, Scale::Phrygian] {
            let tonic = scale.note_names()[0];
            let mut from_intervals = scale.pitch_classes(tonic);
            let mut names = scale.note_names().to_vec();
            from_intervals.sort();
            names.sort();
            assert_eq!(from_intervals, names, "{scale}");
        }
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!("Major".parse::<Scale>(), Ok(Scale::Major));
        assert_eq!(" mixolydian ".parse::<Scale>(), Ok(Scale::Mixolydian));
        assert!("chromatic".parse::<Scale>().is_err());
    }

    #[test]
    fn test_scale_key_display() {
        let sk = ScaleKey {
            scale: Scale::Minor,
            key: PitchClass::FSharp,
        };
        assert_eq!(sk.to_string(), "F# minor");
    }
}
