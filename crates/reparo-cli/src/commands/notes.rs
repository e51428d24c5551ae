//! Note, key and scale detection.

use std::path::PathBuf;

use clap::Args;
use reparo_io::read_wav_channel;
use reparo_pitch::{
    Cancelled, DEFAULT_HOP, DEFAULT_WINDOW, Note, PitchDetector, detect_key, detect_scale,
};
use serde::Serialize;

use super::common::{interrupt_flag, window_bar, window_callback};

#[derive(Args)]
pub struct NotesArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Channel to analyze (zero-based)
    #[arg(long, default_value = "0")]
    channel: usize,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Analysis window in samples
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    window: usize,

    /// Hop between windows in samples
    #[arg(long, default_value_t = DEFAULT_HOP)]
    hop: usize,
}

#[derive(Serialize)]
struct NoteRecord<'a> {
    name: String,
    #[serde(flatten)]
    note: &'a Note,
}

#[derive(Serialize)]
struct NotesReport<'a> {
    file: String,
    channel: usize,
    sample_rate: u32,
    key: String,
    scale: Option<String>,
    notes: Vec<NoteRecord<'a>>,
}

pub fn run(args: NotesArgs) -> anyhow::Result<()> {
    let detector = PitchDetector::new(args.window, args.hop)?;
    let (buffer, spec) = read_wav_channel(&args.input, args.channel)?;

    let interrupted = interrupt_flag()?;
    let bar = window_bar(detector.window_count(buffer.len()))?;
    let result = detector.detect_with(&buffer, window_callback(&bar, &interrupted));
    let notes = match result {
        Ok(notes) => {
            bar.finish_and_clear();
            notes
        }
        Err(Cancelled) => {
            bar.abandon();
            anyhow::bail!("interrupted");
        }
    };

    let key = detect_key(&notes);
    let scale = detect_scale(&notes);
    tracing::info!(notes = notes.len(), %key, "detection finished");

    if args.json {
        let report = NotesReport {
            file: args.input.display().to_string(),
            channel: args.channel,
            sample_rate: spec.sample_rate,
            key: key.to_string(),
            scale: scale.map(|s| s.to_string()),
            notes: notes
                .iter()
                .map(|note| NoteRecord {
                    name: note.name(),
                    note,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File:    {} (channel {})", args.input.display(), args.channel);
    println!("Notes:   {}", notes.len());
    for note in &notes {
        println!(
            "  {:>8.3}s - {:>8.3}s  {:<4} {:+4} cents  {:>7.1} Hz  level {:.3}",
            note.start_time,
            note.end_time,
            note.name(),
            note.cents,
            note.frequency,
            note.amplitude
        );
    }
    println!("Key:     {key}");
    println!(
        "Scale:   {}",
        scale.map_or_else(|| "Unknown".to_string(), |s| s.to_string())
    );

    Ok(())
}
