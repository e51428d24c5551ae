//! Vibrato.

use std::path::PathBuf;

use clap::Args;
use reparo_core::{VibratoSettings, apply_vibrato};

use super::common::{read_input, write_output};

#[derive(Args)]
pub struct VibratoArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (16-bit PCM)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// LFO rate in Hz (default 5)
    #[arg(short, long)]
    rate: Option<f32>,

    /// Depth in percent of a semitone (default 50)
    #[arg(short, long)]
    depth: Option<f32>,
}

pub fn run(args: VibratoArgs) -> anyhow::Result<()> {
    let settings = VibratoSettings {
        enabled: true,
        ..VibratoSettings::default()
    };

    let (channels, _spec) = read_input(&args.input)?;

    tracing::info!(rate = ?args.rate, depth = ?args.depth, "applying vibrato");
    let output: Vec<_> = channels
        .iter()
        .map(|channel| apply_vibrato(channel, &settings, args.rate, args.depth))
        .collect();

    write_output(&args.output, &output)?;
    println!("Done!");
    Ok(())
}
