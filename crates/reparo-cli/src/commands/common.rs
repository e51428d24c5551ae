//! Shared CLI helpers used across multiple commands.

use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use reparo_core::{SampleBuffer, linear_to_db};
use reparo_io::{WavSpec, read_wav, write_wav};
use reparo_pitch::WindowProgress;

/// Read every channel of `path`, printing a one-line summary.
pub fn read_input(path: &Path) -> anyhow::Result<(Vec<SampleBuffer>, WavSpec)> {
    println!("Reading {}...", path.display());
    let (channels, spec) = read_wav(path)?;
    let frames = channels.first().map_or(0, SampleBuffer::len);
    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        spec.channels,
        frames,
        spec.sample_rate,
        frames as f32 / spec.sample_rate as f32
    );
    Ok((channels, spec))
}

/// Write `channels` as 16-bit PCM.
pub fn write_output(path: &Path, channels: &[SampleBuffer]) -> anyhow::Result<()> {
    println!("Writing {}...", path.display());
    write_wav(path, channels)?;
    tracing::info!(path = %path.display(), channels = channels.len(), "wrote output");
    Ok(())
}

/// Peak level across all channels in dBFS.
pub fn peak_db(channels: &[SampleBuffer]) -> f32 {
    let peak = channels.iter().map(SampleBuffer::peak).fold(0.0_f32, f32::max);
    linear_to_db(peak)
}

/// Install a Ctrl+C handler and return the flag it raises.
pub fn interrupt_flag() -> anyhow::Result<Arc<AtomicBool>> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(interrupted)
}

/// Progress bar counting analysis windows.
pub fn window_bar(total: usize) -> anyhow::Result<ProgressBar> {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} windows ({eta})")?
            .progress_chars("##-"),
    );
    Ok(bar)
}

/// Per-window callback that advances `bar` and stops once `interrupted` is set.
pub fn window_callback<'a>(
    bar: &'a ProgressBar,
    interrupted: &'a AtomicBool,
) -> impl FnMut(WindowProgress) -> ControlFlow<()> + 'a {
    move |_| {
        if interrupted.load(Ordering::SeqCst) {
            return ControlFlow::Break(());
        }
        bar.inc(1);
        ControlFlow::Continue(())
    }
}

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid parameter format: '{s}' (expected key=value)"))
}
