//! WAV file reading and writing.

use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use reparo_core::SampleBuffer;

use crate::{Error, Result};

/// Bit depth of every exported file.
const EXPORT_BITS: u16 = 16;
/// Scale for negative 16-bit values.
const I16_NEG_SCALE: f32 = 32768.0;
/// Scale for non-negative 16-bit values.
const I16_POS_SCALE: f32 = 32767.0;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Header fields of a decoded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Sample encoding.
    pub format: WavFormat,
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            format: spec.sample_format.into(),
        }
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format: spec.sample_format.into(),
    })
}

/// Read a WAV file, one buffer per channel.
///
/// 16-bit samples use the asymmetric scale that [`write_wav`] writes with
/// (negatives over 32768, non-negatives over 32767), so a 16-bit round trip
/// is exact to within one quantization step. Other integer depths are scaled
/// by `2^(bits-1)`; float samples are taken as they are.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<SampleBuffer>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let (channels, spec) = decode(reader)?;

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = channels.first().map_or(0, SampleBuffer::len),
        "decoded wav"
    );

    Ok((channels, spec))
}

/// Read a single channel of a WAV file.
pub fn read_wav_channel<P: AsRef<Path>>(
    path: P,
    channel: usize,
) -> Result<(SampleBuffer, WavSpec)> {
    let (mut channels, spec) = read_wav(path)?;
    if channel >= channels.len() {
        return Err(Error::ChannelOutOfRange {
            requested: channel,
            available: channels.len(),
        });
    }
    Ok((channels.swap_remove(channel), spec))
}

/// Decode WAV bytes already in memory.
pub fn decode_wav(bytes: &[u8]) -> Result<(Vec<SampleBuffer>, WavSpec)> {
    decode(WavReader::new(Cursor::new(bytes))?)
}

fn decode<R: Read>(reader: WavReader<R>) -> Result<(Vec<SampleBuffer>, WavSpec)> {
    let spec = WavSpec::from(reader.spec());
    let channel_count = usize::from(spec.channels.max(1));
    let sample_rate = spec.sample_rate as f32;

    let interleaved: Vec<f32> = match spec.format {
        WavFormat::IeeeFloat => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        WavFormat::Pcm if spec.bits_per_sample == EXPORT_BITS => reader
            .into_samples::<i32>()
            .map(|s| s.map(i16_to_f32))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        WavFormat::Pcm => {
            let max_val = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channel_count;
    let channels = (0..channel_count)
        .map(|ch| {
            let samples = interleaved
                .iter()
                .skip(ch)
                .step_by(channel_count)
                .take(frames)
                .copied()
                .collect();
            SampleBuffer::new(samples, sample_rate)
        })
        .collect();

    Ok((channels, spec))
}

/// Write channels to a 16-bit PCM WAV file.
///
/// All channels must share one length and one sample rate. Frames are
/// interleaved channel by channel.
pub fn write_wav<P: AsRef<Path>>(path: P, channels: &[SampleBuffer]) -> Result<()> {
    let path = path.as_ref();
    let spec = export_spec(channels)?;
    let writer = WavWriter::create(path, spec)?;
    write_frames(writer, channels)?;

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        frames = channels[0].len(),
        "wrote wav"
    );
    Ok(())
}

/// Encode channels as 16-bit PCM WAV bytes.
pub fn encode_wav(channels: &[SampleBuffer]) -> Result<Vec<u8>> {
    let spec = export_spec(channels)?;
    let mut cursor = Cursor::new(Vec::new());
    write_frames(WavWriter::new(&mut cursor, spec)?, channels)?;
    Ok(cursor.into_inner())
}

fn export_spec(channels: &[SampleBuffer]) -> Result<hound::WavSpec> {
    let first = channels.first().ok_or(Error::NoChannels)?;

    for (channel, buffer) in channels.iter().enumerate().skip(1) {
        if buffer.len() != first.len() {
            return Err(Error::ChannelLength {
                channel,
                expected: first.len(),
                found: buffer.len(),
            });
        }
        if buffer.sample_rate() != first.sample_rate() {
            return Err(Error::SampleRateMismatch {
                channel,
                expected: first.sample_rate(),
                found: buffer.sample_rate(),
            });
        }
    }

    let rate = first.sample_rate().round();
    if !(rate >= 1.0 && rate <= u32::MAX as f32) {
        return Err(Error::InvalidSampleRate(first.sample_rate()));
    }
    let channel_count =
        u16::try_from(channels.len()).map_err(|_| Error::ChannelOutOfRange {
            requested: channels.len(),
            available: usize::from(u16::MAX),
        })?;

    Ok(hound::WavSpec {
        channels: channel_count,
        sample_rate: rate as u32,
        bits_per_sample: EXPORT_BITS,
        sample_format: SampleFormat::Int,
    })
}

fn write_frames<W: Write + Seek>(
    mut writer: WavWriter<W>,
    channels: &[SampleBuffer],
) -> Result<()> {
    let frames = channels[0].len();
    for frame in 0..frames {
        for buffer in channels {
            writer.write_sample(f32_to_i16(buffer.samples()[frame]))?;
        }
    }
    writer.finalize()?;
    Ok(())
}

/// Quantize to 16 bits: clamp to [-1, 1], scale asymmetrically, round.
#[inline]
fn f32_to_i16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    let scaled = if s < 0.0 {
        s * I16_NEG_SCALE
    } else {
        s * I16_POS_SCALE
    };
    scaled.round() as i16
}

#[inline]
fn i16_to_f32(value: i32) -> f32 {
    if value < 0 {
        value as f32 / I16_NEG_SCALE
    } else {
        value as f32 / I16_POS_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_quantize_extremes() {
        assert_eq!(f32_to_i16(1.0), 32767);
        assert_eq!(f32_to_i16(-1.0), -32768);
        assert_eq!(f32_to_i16(2.5), 32767);
        assert_eq!(f32_to_i16(-7.0), -32768);
        assert_eq!(f32_to_i16(0.0), 0);
        assert_eq!(i16_to_f32(32767), 1.0);
        assert_eq!(i16_to_f32(-32768), -1.0);
    }

    #[test]
    fn test_quantize_rounds_to_nearest() {
        // 0.5 / 32767 rounds up, just under rounds down
        assert_eq!(f32_to_i16(0.6 / 32767.0), 1);
        assert_eq!(f32_to_i16(0.4 / 32767.0), 0);
        assert_eq!(f32_to_i16(-0.6 / 32768.0), -1);
    }

    #[test]
    fn test_roundtrip_i16() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 100.0).sin() * 0.9).collect();
        let buffer = SampleBuffer::new(samples, 44100.0);

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), std::slice::from_ref(&buffer)).unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].len(), buffer.len());
        assert_eq!(loaded[0].sample_rate(), 44100.0);

        for (a, b) in buffer.samples().iter().zip(loaded[0].samples()) {
            assert!((a - b).abs() <= 1.0 / 32768.0, "{a} vs {b}");
        }
    }

    #[test]
    fn test_stereo_interleave() {
        let left = SampleBuffer::new(vec![0.5, -0.5, 0.25], 8000.0);
        let right = SampleBuffer::new(vec![-1.0, 1.0, 0.0], 8000.0);
        let bytes = encode_wav(&[left.clone(), right.clone()]).unwrap();

        let mut reader = WavReader::new(Cursor::new(&bytes)).unwrap();
        let raw: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(raw, vec![16384, -32768, -16384, 32767, 8192, 0]);

        let (decoded, spec) = decode_wav(&bytes).unwrap();
        assert_eq!(spec.channels, 2);
        assert_eq!(decoded[1].samples(), &[-1.0, 1.0, 0.0]);
        assert!((decoded[0].samples()[0] - 0.5).abs() <= 1.0 / 32768.0);
    }

    #[test]
    fn test_mismatched_channels_rejected() {
        let a = SampleBuffer::new(vec![0.0; 10], 8000.0);
        let b = SampleBuffer::new(vec![0.0; 11], 8000.0);
        assert!(matches!(
            encode_wav(&[a.clone(), b]),
            Err(Error::ChannelLength { channel: 1, expected: 10, found: 11 })
        ));

        let c = SampleBuffer::new(vec![0.0; 10], 16000.0);
        assert!(matches!(
            encode_wav(&[a, c]),
            Err(Error::SampleRateMismatch { channel: 1, .. })
        ));

        assert!(matches!(encode_wav(&[]), Err(Error::NoChannels)));
    }

    #[test]
    fn test_invalid_sample_rate() {
        let zero = SampleBuffer::new(vec![0.0; 4], 0.0);
        assert!(matches!(encode_wav(&[zero]), Err(Error::InvalidSampleRate(_))));
    }

    #[test]
    fn test_reads_float_and_24_bit() {
        let file = NamedTempFile::new().unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        for s in [0.25_f32, -0.75, 1.5] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.format, WavFormat::IeeeFloat);
        assert_eq!(loaded[0].samples(), &[0.25, -0.75, 1.5]);

        let file = NamedTempFile::new().unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        for s in [4_194_304_i32, -8_388_608] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded[0].samples(), &[0.5, -1.0]);
    }

    #[test]
    fn test_channel_out_of_range() {
        let buffer = SampleBuffer::new(vec![0.1; 16], 8000.0);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[buffer]).unwrap();

        assert!(read_wav_channel(file.path(), 0).is_ok());
        assert!(matches!(
            read_wav_channel(file.path(), 1),
            Err(Error::ChannelOutOfRange { requested: 1, available: 1 })
        ));
    }
}
