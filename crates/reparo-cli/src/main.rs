//! Reparo CLI - restore recordings and correct their pitch from the command line.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reparo")]
#[command(author, version, about = "Audio restoration and pitch correction", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show WAV file metadata
    Info(commands::info::InfoArgs),

    /// Run a repair preset or chain over a file
    Repair(commands::repair::RepairArgs),

    /// Detect notes, key and scale
    Notes(commands::notes::NotesArgs),

    /// Pull off-scale notes onto a scale
    Correct(commands::correct::CorrectArgs),

    /// Shift pitch by a number of semitones
    Shift(commands::shift::ShiftArgs),

    /// Apply vibrato
    Vibrato(commands::vibrato::VibratoArgs),

    /// List or show repair presets
    Presets(commands::presets::PresetsArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Repair(args) => commands::repair::run(args),
        Commands::Notes(args) => commands::notes::run(args),
        Commands::Correct(args) => commands::correct::run(args),
        Commands::Shift(args) => commands::shift::run(args),
        Commands::Vibrato(args) => commands::vibrato::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
