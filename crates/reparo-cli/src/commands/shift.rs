//! Whole-file pitch shift.

use std::path::PathBuf;

use clap::Args;
use reparo_pitch::{shift_buffer, shift_ratio};

use super::common::{read_input, write_output};

#[derive(Args)]
pub struct ShiftArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (16-bit PCM)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Shift amount in semitones. Positive values lower the pitch.
    #[arg(short, long, allow_hyphen_values = true)]
    semitones: f32,
}

pub fn run(args: ShiftArgs) -> anyhow::Result<()> {
    if !args.semitones.is_finite() {
        anyhow::bail!("semitones must be a finite number");
    }

    let (channels, _spec) = read_input(&args.input)?;

    println!(
        "Shifting by {:+} semitones (ratio {:.4})...",
        args.semitones,
        shift_ratio(args.semitones)
    );
    let shifted: Vec<_> = channels
        .iter()
        .map(|channel| shift_buffer(channel, args.semitones))
        .collect();

    write_output(&args.output, &shifted)?;
    println!("Done!");
    Ok(())
}
