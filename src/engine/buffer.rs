//! Audio Buffer Management
//!
//! Provides the float sample buffer shared by the synthesizer, the loop
//! player and WAV I/O, plus a few level analysis helpers.

use crate::error::{HavanError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Sample rate used for all generated audio (44.1kHz)
pub const SAMPLE_RATE: u32 = 44_100;

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert linear amplitude to decibels
///
/// Returns `f32::NEG_INFINITY` for zero input.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Calculate the RMS level of an audio buffer in dB
///
/// Returns `f32::NEG_INFINITY` for empty or silent buffers.
pub fn calculate_rms(buffer: &AudioBuffer) -> f32 {
    let total_samples = buffer.channels() * buffer.len();
    if total_samples == 0 {
        return f32::NEG_INFINITY;
    }

    let sum_squares: f64 = buffer
        .samples
        .iter()
        .flat_map(|channel| channel.iter())
        .map(|&s| (s as f64) * (s as f64))
        .sum();

    let rms = (sum_squares / total_samples as f64).sqrt() as f32;
    linear_to_db(rms)
}

/// Calculate the peak level of an audio buffer in dB
pub fn calculate_peak(buffer: &AudioBuffer) -> f32 {
    linear_to_db(buffer.peak())
}

// ============================================================================
// Channel Layout
// ============================================================================

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// Single channel, the layout of every synthesized buffer
    #[default]
    Mono,
    /// Two channels (left, right)
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Create a ChannelLayout from a channel count
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Non-interleaved 32-bit float audio
///
/// The outer Vec holds channels, each inner Vec holds that channel's
/// samples. All channels always have the same length.
///
/// # Example
/// ```
/// use havan::engine::buffer::{AudioBuffer, ChannelLayout, SAMPLE_RATE};
///
/// let buffer = AudioBuffer::new(SAMPLE_RATE as usize, ChannelLayout::Mono, SAMPLE_RATE);
/// assert_eq!(buffer.channels(), 1);
/// assert_eq!(buffer.len(), 44_100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is samples
    pub samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a silent buffer with `num_samples` samples per channel
    pub fn new(num_samples: usize, layout: ChannelLayout, sample_rate: u32) -> Self {
        Self {
            samples: vec![vec![0.0_f32; num_samples]; layout.num_channels()],
            sample_rate,
        }
    }

    /// Wrap a single channel of samples
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: vec![samples],
            sample_rate,
        }
    }

    /// Create an audio buffer from interleaved sample data
    ///
    /// Fails if the data length is not a multiple of the channel count.
    pub fn from_interleaved(
        interleaved: &[f32],
        layout: ChannelLayout,
        sample_rate: u32,
    ) -> Result<Self> {
        let num_channels = layout.num_channels();

        if interleaved.len() % num_channels != 0 {
            return Err(HavanError::InvalidAudio {
                reason: format!(
                    "Interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    num_channels
                ),
                source: None,
            });
        }

        let num_samples = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_samples); num_channels];

        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Convert the buffer to interleaved format (L, R, L, R, ...)
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_channels = self.channels();
        let mut interleaved = Vec::with_capacity(num_channels * self.len());

        for index in 0..self.len() {
            for channel in &self.samples {
                interleaved.push(channel[index]);
            }
        }

        interleaved
    }

    /// Number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer holds no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Channel layout, or None for unsupported channel counts
    pub fn channel_layout(&self) -> Option<ChannelLayout> {
        ChannelLayout::from_count(self.channels())
    }

    /// Immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples
            .iter()
            .flat_map(|channel| channel.iter())
            .map(|&s| s.abs())
            .fold(0.0_f32, f32::max)
    }

    /// True when no sample is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.samples
            .iter()
            .flat_map(|channel| channel.iter())
            .all(|s| s.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_buffer_is_silent() {
        let buffer = AudioBuffer::new(1000, ChannelLayout::Stereo, SAMPLE_RATE);
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.peak(), 0.0);
        assert_eq!(calculate_rms(&buffer), f32::NEG_INFINITY);
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::new(SAMPLE_RATE as usize * 10, ChannelLayout::Mono, SAMPLE_RATE);
        assert_relative_eq!(buffer.duration_secs(), 10.0);
    }

    #[test]
    fn test_interleave_roundtrip() {
        let interleaved = vec![1.0, 5.0, 2.0, 6.0, 3.0, 7.0];
        let buffer =
            AudioBuffer::from_interleaved(&interleaved, ChannelLayout::Stereo, SAMPLE_RATE)
                .unwrap();
        assert_eq!(buffer.channel(0), &[1.0, 2.0, 3.0]);
        assert_eq!(buffer.channel(1), &[5.0, 6.0, 7.0]);
        assert_eq!(buffer.to_interleaved(), interleaved);
    }

    #[test]
    fn test_from_interleaved_rejects_ragged_data() {
        let result = AudioBuffer::from_interleaved(&[0.0; 3], ChannelLayout::Stereo, SAMPLE_RATE);
        assert!(matches!(result, Err(HavanError::InvalidAudio { .. })));
    }

    #[test]
    fn test_levels() {
        let buffer = AudioBuffer::from_mono(vec![0.5, -0.5, 0.5, -0.5], SAMPLE_RATE);
        assert_relative_eq!(buffer.peak(), 0.5);
        assert_relative_eq!(calculate_rms(&buffer), -6.0206, epsilon = 0.001);
        assert_relative_eq!(calculate_peak(&buffer), -6.0206, epsilon = 0.001);
        assert_eq!(linear_to_db(0.0), f32::NEG_INFINITY);
        assert_relative_eq!(linear_to_db(1.0), 0.0);
    }

    #[test]
    fn test_is_finite() {
        let buffer = AudioBuffer::new(4, ChannelLayout::Mono, SAMPLE_RATE);
        assert!(buffer.is_finite());
        let buffer = AudioBuffer::from_mono(vec![0.0, 0.1, f32::NAN, 0.0], SAMPLE_RATE);
        assert!(!buffer.is_finite());
    }
}
