//! WAV I/O for reparo.
//!
//! This crate provides:
//!
//! - **Decoding**: [`read_wav`] / [`decode_wav`] split a file into one
//!   [`SampleBuffer`](reparo_core::SampleBuffer) per channel. 8/16/24/32-bit
//!   integer and 32-bit float files are accepted.
//! - **Export**: [`write_wav`] / [`encode_wav`] interleave channels into
//!   16-bit signed PCM.
//! - **Metadata**: [`read_wav_info`] reads the header only.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reparo_core::{ClickRemover, Repair};
//! use reparo_io::{read_wav, write_wav};
//!
//! let (channels, _spec) = read_wav("take3.wav")?;
//! let repaired: Vec<_> = channels.iter().map(|c| ClickRemover::default().apply(c)).collect();
//! write_wav("take3_fixed.wav", &repaired)?;
//! ```

mod wav;

pub use wav::{
    WavFormat, WavInfo, WavSpec, decode_wav, encode_wav, read_wav, read_wav_channel,
    read_wav_info, write_wav,
};

/// Error types for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV encode/decode error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Nothing to write.
    #[error("no channels to write")]
    NoChannels,

    /// Channels passed for export differ in length.
    #[error("channel {channel} has {found} samples, expected {expected}")]
    ChannelLength {
        /// Offending channel index.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        found: usize,
    },

    /// Channels passed for export differ in sample rate.
    #[error("channel {channel} is at {found} Hz, expected {expected} Hz")]
    SampleRateMismatch {
        /// Offending channel index.
        channel: usize,
        /// Sample rate of channel 0.
        expected: f32,
        /// Sample rate of the offending channel.
        found: f32,
    },

    /// Sample rate that cannot be stored in a WAV header.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// Requested channel does not exist in the file.
    #[error("channel {requested} out of range (file has {available})")]
    ChannelOutOfRange {
        /// Zero-based channel asked for.
        requested: usize,
        /// Channels in the file.
        available: usize,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for WAV I/O.
pub type Result<T> = std::result::Result<T, Error>;
