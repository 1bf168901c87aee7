//! Audio Engine Module
//!
//! - Audio buffer management and level analysis
//! - WAV file I/O
//! - Loop playback against an output device

pub mod buffer;
pub mod io;
pub mod player;

pub use buffer::{AudioBuffer, ChannelLayout, SAMPLE_RATE};
pub use io::{export_wav, import_wav, ExportFormat};
pub use player::{
    CaptureDevice, LoopPlayer, LoopSource, NullDevice, OutputDevice, PlaybackState,
    DEFAULT_VOLUME,
};
