//! End-to-end tests for reparo-pitch: detection feeding scale analysis and
//! correction.

use proptest::prelude::*;
use reparo_core::{Repair, SampleBuffer};
use reparo_pitch::{
    PitchClass, PitchDetector, Scale, apply_pitch_shift, correct_to_scale, detect_key,
    detect_notes, detect_scale, detect_scale_key, frequency_to_note,
};

/// Concatenate strictly periodic segments, one per `(period, samples)` pair.
fn melody(sample_rate: f32, segments: &[(usize, usize)]) -> SampleBuffer {
    let mut samples = Vec::new();
    for &(period, len) in segments {
        samples.extend((0..len).map(|i| {
            let phase = (i % period) as f32 / period as f32;
            (2.0 * std::f32::consts::PI * phase).sin() * 0.4
        }));
    }
    SampleBuffer::new(samples, sample_rate)
}

#[test]
fn test_detects_melody_in_order() {
    // 44 kHz: period 100 -> 440 Hz (A4), period 200 -> 220 Hz (A3)
    let buffer = melody(44000.0, &[(100, 16384), (200, 16384)]);
    let notes = detect_notes(&buffer);

    assert!(!notes.is_empty());
    assert!(notes.windows(2).all(|w| w[0].start_sample < w[1].start_sample));

    assert_eq!(notes.first().map(|n| n.name()), Some("A4".to_string()));
    assert_eq!(notes.last().map(|n| n.name()), Some("A3".to_string()));
}

#[test]
fn test_scale_and_key_from_detected_notes() {
    // 44 kHz: period 100 -> A4, period 84 -> C5 (about 524 Hz)
    let buffer = melody(44000.0, &[(100, 12288), (100, 12288), (84, 12288)]);
    let notes = detect_notes(&buffer);

    assert_eq!(detect_key(&notes), PitchClass::A);
    let sk = detect_scale_key(&notes).unwrap();
    assert_eq!(sk.scale, detect_scale(&notes).unwrap());
    assert_eq!(sk.key, PitchClass::A);
}

#[test]
fn test_correction_preserves_length_and_rate() {
    let buffer = melody(44100.0, &[(95, 20000), (130, 20000)]);
    let corrected = correct_to_scale(&buffer, Scale::Pentatonic, PitchClass::G);
    assert_eq!(corrected.len(), buffer.len());
    assert_eq!(corrected.sample_rate(), buffer.sample_rate());
    assert!(corrected.samples().iter().all(|s| s.is_finite()));
}

#[test]
fn test_correction_moves_pitch_toward_scale() {
    // ~464 Hz is 93 cents above A4; in C major it should be pulled down to A.
    let buffer = melody(44100.0, &[(95, 44100)]);
    let before = frequency_to_note(detect_notes(&buffer)[0].frequency);
    assert!(before.cents.abs() > 10 || before.pitch_class != Some(PitchClass::A));

    let corrected = correct_to_scale(&buffer, Scale::Major, PitchClass::C);
    // First owned span only: [0, hop)
    let head = SampleBuffer::new(corrected.samples()[..2048].to_vec(), 44100.0);
    let detector = PitchDetector::new(2048, 1024).unwrap();
    let after = detector.detect(&head);
    assert_eq!(after.len(), 1);
    assert!(after[0].frequency < 464.0, "got {}", after[0].frequency);
}

#[test]
fn test_cleanup_chain_keeps_pitch() {
    let buffer = melody(44000.0, &[(100, 22000)]);
    let cleaned = [
        Box::new(reparo_core::NoiseGate::default()) as Box<dyn Repair>,
        Box::new(reparo_core::ClickRemover::default()),
        Box::new(reparo_core::Normalizer::default()),
    ]
    .iter()
    .fold(buffer, |b, step| step.apply(&b));

    let notes = detect_notes(&cleaned);
    assert!(!notes.is_empty());
    assert!(notes.iter().all(|n| n.pitch_class == PitchClass::A));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn pitch_shift_preserves_length(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 0..2048),
        semitones in -24.0f32..=24.0f32,
    ) {
        let shifted = apply_pitch_shift(&samples, semitones);
        prop_assert_eq!(shifted.len(), samples.len());
        prop_assert!(shifted.iter().all(|s| s.is_finite() && s.abs() <= 1.0 + 1e-6));
    }

    #[test]
    fn notes_stay_in_band(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 4096..12000),
    ) {
        let buffer = SampleBuffer::new(samples, 44100.0);
        for note in detect_notes(&buffer) {
            prop_assert!(note.frequency > 50.0 && note.frequency < 2000.0);
            prop_assert!(note.end_sample - note.start_sample == 4096);
        }
    }

    #[test]
    fn correction_preserves_length(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 0..10000),
        key in 0i32..12,
        scale_idx in 0usize..8,
    ) {
        let buffer = SampleBuffer::new(samples, 44100.0);
        let scale = Scale::ALL[scale_idx];
        let corrected = correct_to_scale(&buffer, scale, PitchClass::from_semitone(key));
        prop_assert_eq!(corrected.len(), buffer.len());
    }
}
