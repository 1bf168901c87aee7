//! Sound Synthesis
//!
//! Procedural generators for the havan soundscape.

mod fire;

pub use fire::{
    FireConfig, FireSynth, BASE_RUMBLE_FREQ, CRACKLE_DECAY, CRACKLE_PROBABILITY, DURATION_SECS,
    FADE_SECS, NUM_SAMPLES,
};
