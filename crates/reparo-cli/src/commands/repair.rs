//! Run a repair chain over a file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use reparo_config::{RepairChain, StepConfig, load_preset};

use super::common::{parse_key_val, peak_db, read_input, write_output};

#[derive(Args)]
pub struct RepairArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (16-bit PCM)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or path to a preset file
    #[arg(short, long, conflicts_with_all = ["chain", "step"])]
    preset: Option<String>,

    /// Chain string (e.g. "gate:threshold=-45dB|declick|dehum:frequency=50Hz")
    #[arg(short, long, conflicts_with = "step")]
    chain: Option<String>,

    /// Single repair step
    #[arg(short, long)]
    step: Option<String>,

    /// Parameters for --step (e.g. "threshold=-45dB")
    #[arg(long, value_parser = parse_key_val, num_args = 1, requires = "step")]
    param: Vec<(String, String)>,
}

pub fn run(args: RepairArgs) -> anyhow::Result<()> {
    let chain = build_chain(&args)?;
    if chain.is_empty() {
        anyhow::bail!("no repair steps to run");
    }

    let (channels, _spec) = read_input(&args.input)?;

    println!("Repairing with {:?}...", chain);
    let repaired: Vec<_> = channels.iter().map(|channel| chain.apply(channel)).collect();

    println!("\nPeak:");
    println!("  Input:  {:.1} dBFS", peak_db(&channels));
    println!("  Output: {:.1} dBFS", peak_db(&repaired));

    write_output(&args.output, &repaired)?;
    println!("Done!");
    Ok(())
}

fn build_chain(args: &RepairArgs) -> anyhow::Result<RepairChain> {
    if let Some(name) = &args.preset {
        let preset = load_preset(name).with_context(|| {
            format!("loading preset '{name}' (see 'reparo presets' for available names)")
        })?;
        println!("Preset: {}", preset.name);
        return Ok(RepairChain::from_preset(&preset)?);
    }

    if let Some(spec) = &args.chain {
        return Ok(RepairChain::from_spec(spec)?);
    }

    if let Some(step) = &args.step {
        let config = args
            .param
            .iter()
            .fold(StepConfig::new(step.as_str()), |config, (k, v)| {
                config.with_param(k.as_str(), v.as_str())
            });
        return Ok(RepairChain::from_steps(&[config])?);
    }

    anyhow::bail!("no repair specified. Use --preset, --chain or --step")
}
