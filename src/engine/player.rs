//! Loop Playback
//!
//! Plays a generated buffer as a seamless loop through an [`OutputDevice`].
//!
//! The player owns at most one [`LoopSource`] at a time:
//! - `play()` is idempotent while playing
//! - `stop()` releases the source and is safe when already stopped
//! - `set_volume()` clamps to [0, 1] and never interrupts playback
//!
//! The device is opened on the first `play()` and closed when the player is
//! dropped, whichever way the owner goes away.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::engine::buffer::AudioBuffer;
use crate::error::Result;
use crate::synth::FireSynth;

/// Volume a fresh player starts at
pub const DEFAULT_VOLUME: f32 = 0.4;

// ============================================================================
// Output devices
// ============================================================================

/// Destination for rendered audio blocks
pub trait OutputDevice {
    /// Acquire the device at the given sample rate
    fn open(&mut self, sample_rate: u32) -> Result<()>;

    /// Release the device; must be safe to call when already closed
    fn close(&mut self);

    fn is_open(&self) -> bool;

    /// Deliver one block of mono samples
    fn write(&mut self, block: &[f32]);
}

/// Device that discards everything written to it
#[derive(Debug, Default)]
pub struct NullDevice {
    open: bool,
}

impl OutputDevice for NullDevice {
    fn open(&mut self, _sample_rate: u32) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn write(&mut self, _block: &[f32]) {}
}

/// Device that records every block it receives
#[derive(Debug, Default)]
pub struct CaptureDevice {
    open: bool,
    sample_rate: u32,
    captured: Vec<f32>,
    opened_count: usize,
}

impl CaptureDevice {
    pub fn captured(&self) -> &[f32] {
        &self.captured
    }

    /// Sample rate of the most recent `open`
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// How many times the device has been opened
    pub fn opened_count(&self) -> usize {
        self.opened_count
    }

    /// Take the captured stream as a mono buffer
    pub fn take_buffer(&mut self) -> AudioBuffer {
        AudioBuffer::from_mono(std::mem::take(&mut self.captured), self.sample_rate)
    }
}

impl OutputDevice for CaptureDevice {
    fn open(&mut self, sample_rate: u32) -> Result<()> {
        self.open = true;
        self.sample_rate = sample_rate;
        self.opened_count += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn write(&mut self, block: &[f32]) {
        if self.open {
            self.captured.extend_from_slice(block);
        }
    }
}

// ============================================================================
// Loop source
// ============================================================================

/// Cursor that reads a shared buffer forever, wrapping at the end
#[derive(Debug, Clone)]
pub struct LoopSource {
    buffer: Arc<AudioBuffer>,
    position: usize,
    loops_completed: u64,
}

impl LoopSource {
    pub fn new(buffer: Arc<AudioBuffer>) -> Self {
        Self {
            buffer,
            position: 0,
            loops_completed: 0,
        }
    }

    /// Next sample of the first channel; silence for an empty buffer
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let channel = match self.buffer.samples.first() {
            Some(ch) if !ch.is_empty() => ch,
            _ => return 0.0,
        };

        let sample = channel[self.position];
        self.position += 1;
        if self.position == channel.len() {
            self.position = 0;
            self.loops_completed += 1;
        }
        sample
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn loops_completed(&self) -> u64 {
        self.loops_completed
    }
}

// ============================================================================
// Player
// ============================================================================

/// Whether a loop source is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Stopped => write!(f, "Stopped"),
            PlaybackState::Playing => write!(f, "Playing"),
        }
    }
}

/// Looping player for the fire ambience
pub struct LoopPlayer<D: OutputDevice> {
    device: D,
    synth: FireSynth,
    buffer: Option<Arc<AudioBuffer>>,
    source: Option<LoopSource>,
    volume: f32,
    scratch: Vec<f32>,
}

impl<D: OutputDevice> LoopPlayer<D> {
    /// Create a stopped player; audio is generated on the first `play()`
    pub fn new(device: D) -> Self {
        Self::with_synth(device, FireSynth::default())
    }

    pub fn with_synth(device: D, synth: FireSynth) -> Self {
        Self {
            device,
            synth,
            buffer: None,
            source: None,
            volume: DEFAULT_VOLUME,
            scratch: Vec::new(),
        }
    }

    /// Use a pre-generated buffer instead of synthesizing one
    ///
    /// Takes effect on the next `play()`; an active source keeps its buffer.
    pub fn load(&mut self, buffer: AudioBuffer) {
        self.buffer = Some(Arc::new(buffer));
    }

    /// Start looping; does nothing if already playing
    pub fn play(&mut self) -> Result<()> {
        if self.source.is_some() {
            debug!("play() ignored: already playing");
            return Ok(());
        }

        let buffer = match &self.buffer {
            Some(buffer) => Arc::clone(buffer),
            None => {
                let generated = Arc::new(self.synth.generate());
                self.buffer = Some(Arc::clone(&generated));
                generated
            }
        };

        if !self.device.is_open() {
            self.device.open(buffer.sample_rate)?;
            debug!("Output device opened at {}Hz", buffer.sample_rate);
        }

        info!(
            "Playing {:.1}s loop at volume {:.2}",
            buffer.duration_secs(),
            self.volume
        );
        self.source = Some(LoopSource::new(buffer));
        Ok(())
    }

    /// Release the active source; safe to call when stopped
    pub fn stop(&mut self) {
        if let Some(source) = self.source.take() {
            info!(
                "Stopped after {} full loop(s)",
                source.loops_completed()
            );
        }
    }

    /// Set the output gain, clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn state(&self) -> PlaybackState {
        if self.source.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_playing(&self) -> bool {
        self.source.is_some()
    }

    /// The active source, if any
    pub fn source(&self) -> Option<&LoopSource> {
        self.source.as_ref()
    }

    /// The loaded or generated loop buffer, if any
    pub fn buffer(&self) -> Option<&AudioBuffer> {
        self.buffer.as_deref()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Fill `out` with the next looped samples at the current volume
    ///
    /// Writes silence while stopped.
    pub fn render(&mut self, out: &mut [f32]) {
        match self.source.as_mut() {
            Some(source) => {
                for sample in out.iter_mut() {
                    *sample = source.next_sample() * self.volume;
                }
            }
            None => out.fill(0.0),
        }
    }

    /// Render `frames` samples and deliver them to the device
    pub fn pump(&mut self, frames: usize) {
        let mut block = std::mem::take(&mut self.scratch);
        block.resize(frames, 0.0);
        self.render(&mut block);
        if self.device.is_open() {
            self.device.write(&block);
        }
        self.scratch = block;
    }
}

impl<D: OutputDevice> Drop for LoopPlayer<D> {
    fn drop(&mut self) {
        self.stop();
        if self.device.is_open() {
            self.device.close();
            debug!("Output device closed");
        }
    }
}

impl<D: OutputDevice + fmt::Debug> fmt::Debug for LoopPlayer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopPlayer")
            .field("device", &self.device)
            .field("state", &self.state())
            .field("volume", &self.volume)
            .finish()
    }
}
