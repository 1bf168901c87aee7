//! WAV file I/O for Havan
//!
//! Exports generated audio for offline use and reads it back for
//! verification. Buffers are written at their own sample rate; there is no
//! resampling.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};

use crate::engine::buffer::{AudioBuffer, ChannelLayout, SAMPLE_RATE};
use crate::error::{HavanError, Result};

/// Export format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormat {
    /// Target sample rate (must match the buffer)
    pub sample_rate: u32,
    /// Bit depth: 16, 24, or 32 (float)
    pub bit_depth: u16,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::cd_quality()
    }
}

impl ExportFormat {
    pub fn new(sample_rate: u32, bit_depth: u16) -> Self {
        ExportFormat {
            sample_rate,
            bit_depth,
        }
    }

    /// 44.1kHz, 16-bit
    pub fn cd_quality() -> Self {
        ExportFormat {
            sample_rate: SAMPLE_RATE,
            bit_depth: 16,
        }
    }

    /// 44.1kHz, 32-bit float
    pub fn float32() -> Self {
        ExportFormat {
            sample_rate: SAMPLE_RATE,
            bit_depth: 32,
        }
    }
}

/// Write an AudioBuffer to a WAV file
///
/// # Errors
/// * `UnsupportedFormat` - bit depth other than 16/24/32, a sample rate
///   different from the buffer's, or a buffer with more than two channels
/// * `Io` - the file cannot be created or written
pub fn export_wav(buffer: &AudioBuffer, path: &Path, format: ExportFormat) -> Result<()> {
    if format.sample_rate != buffer.sample_rate {
        return Err(HavanError::UnsupportedFormat {
            format: format!(
                "export at {}Hz from a {}Hz buffer (resampling is not supported)",
                format.sample_rate, buffer.sample_rate
            ),
        });
    }

    if buffer.channel_layout().is_none() {
        return Err(HavanError::UnsupportedFormat {
            format: format!("{}-channel audio (only mono/stereo supported)", buffer.channels()),
        });
    }

    let sample_format = match format.bit_depth {
        16 | 24 => SampleFormat::Int,
        32 => SampleFormat::Float,
        other => {
            return Err(HavanError::UnsupportedFormat {
                format: format!("{}-bit audio (only 16, 24, 32 supported)", other),
            });
        }
    };

    let spec = WavSpec {
        channels: buffer.channels() as u16,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format,
    };

    let mut writer = WavWriter::create(path, spec).map_err(hound_to_io)?;

    for sample in buffer.to_interleaved() {
        match format.bit_depth {
            16 => {
                let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer.write_sample(scaled).map_err(hound_to_io)?;
            }
            24 => {
                // 24-bit stored as i32 in hound
                let scaled = (sample * 8388607.0).clamp(-8388608.0, 8388607.0) as i32;
                writer.write_sample(scaled).map_err(hound_to_io)?;
            }
            _ => writer.write_sample(sample).map_err(hound_to_io)?,
        }
    }

    writer.finalize().map_err(hound_to_io)?;

    info!(
        "Wrote {} ({:.2}s, {}Hz, {}-bit)",
        path.display(),
        buffer.duration_secs(),
        format.sample_rate,
        format.bit_depth
    );

    Ok(())
}

/// Read a WAV file into an AudioBuffer at its native sample rate
///
/// # Errors
/// * `FileNotFound` - the file does not exist
/// * `InvalidAudio` - the file is not a readable WAV file
/// * `UnsupportedFormat` - more than two channels or an unusual bit depth
/// * `EmptyAudio` - the file holds no samples
pub fn import_wav(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(HavanError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let reader = WavReader::open(path).map_err(|e| HavanError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let layout = ChannelLayout::from_count(spec.channels as usize).ok_or_else(|| {
        HavanError::UnsupportedFormat {
            format: format!("{}-channel audio (only mono/stereo supported)", spec.channels),
        }
    })?;

    debug!(
        "Reading {}: {} channel(s), {}Hz, {}-bit {:?}",
        path.display(),
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    let samples = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;
    if samples.is_empty() {
        return Err(HavanError::EmptyAudio);
    }

    AudioBuffer::from_interleaved(&samples, layout, spec.sample_rate)
}

/// Read samples from a WAV reader and normalize them to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let collected = match (sample_format, bits_per_sample) {
        (SampleFormat::Float, _) => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>(),
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect(),
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8388608.0))
            .collect(),
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2147483648.0))
            .collect(),
        (SampleFormat::Int, other) => {
            return Err(HavanError::UnsupportedFormat {
                format: format!("{}-bit integer audio", other),
            });
        }
    };

    collected.map_err(|e| HavanError::InvalidAudio {
        reason: format!("Failed to read {}-bit samples: {}", bits_per_sample, e),
        source: Some(Box::new(e)),
    })
}

fn hound_to_io(e: hound::Error) -> HavanError {
    match e {
        hound::Error::IoError(io) => HavanError::Io(io),
        other => HavanError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
