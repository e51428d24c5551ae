//! Scale-constrained pitch correction.

use std::path::PathBuf;

use clap::Args;
use reparo_pitch::{
    Cancelled, DEFAULT_DEADBAND_CENTS, PitchClass, PitchCorrector, Scale, ScaleKey, detect_key,
    detect_scale,
};

use super::common::{interrupt_flag, read_input, window_bar, window_callback, write_output};

#[derive(Args)]
pub struct CorrectArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (16-bit PCM)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Target scale (major, minor, pentatonic, blues, dorian, phrygian,
    /// lydian, mixolydian). Detected when omitted.
    #[arg(short, long)]
    scale: Option<Scale>,

    /// Tonic (e.g. C, F#, Bb). Detected when omitted.
    #[arg(short, long)]
    key: Option<PitchClass>,

    /// Deviation in cents below which notes are left alone
    #[arg(long, default_value_t = DEFAULT_DEADBAND_CENTS)]
    deadband: f32,

    /// Channel used to detect the scale and key
    #[arg(long, default_value = "0")]
    channel: usize,
}

pub fn run(args: CorrectArgs) -> anyhow::Result<()> {
    let (channels, _spec) = read_input(&args.input)?;
    if args.channel >= channels.len() {
        anyhow::bail!(
            "channel {} out of range (file has {})",
            args.channel,
            channels.len()
        );
    }

    let corrector = PitchCorrector {
        deadband_cents: args.deadband,
        ..PitchCorrector::default()
    };

    let interrupted = interrupt_flag()?;
    let total = channels
        .iter()
        .map(|c| corrector.detector.window_count(c.len()))
        .sum();
    let bar = window_bar(total)?;

    let mut detected = Vec::with_capacity(channels.len());
    for channel in &channels {
        match corrector
            .detector
            .detect_with(channel, window_callback(&bar, &interrupted))
        {
            Ok(notes) => detected.push(notes),
            Err(Cancelled) => {
                bar.abandon();
                anyhow::bail!("interrupted, no output written");
            }
        }
    }
    bar.finish_and_clear();

    let analysis = &detected[args.channel];
    let Some(target) = resolve_target(args.scale, args.key, analysis) else {
        tracing::warn!("no notes detected, writing input unchanged");
        println!("No notes detected; nothing to correct.");
        write_output(&args.output, &channels)?;
        return Ok(());
    };
    println!("Correcting to {target}...");

    let classes = target.scale.pitch_classes(target.key);
    let corrected: Vec<_> = channels
        .iter()
        .zip(&detected)
        .map(|(channel, notes)| corrector.correct_notes(channel, notes, &classes))
        .collect();

    write_output(&args.output, &corrected)?;
    println!("Done!");
    Ok(())
}

/// Explicit scale and key win; missing parts come from the detected notes.
fn resolve_target(
    scale: Option<Scale>,
    key: Option<PitchClass>,
    notes: &[reparo_pitch::Note],
) -> Option<ScaleKey> {
    let scale = scale.or_else(|| detect_scale(notes))?;
    let key = key.unwrap_or_else(|| detect_key(notes));
    Some(ScaleKey { scale, key })
}
