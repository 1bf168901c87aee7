//! Havan - fire ambience synthesis and research paper rendering
//!
//! The crate backs a meditation site with two independent engines:
//! 1. A procedural fire synthesizer producing a seamless 10 second loop
//!    (brown noise, random crackles and a modulated low rumble), plus a loop
//!    player that plays it through an abstract output device
//! 2. A renderer for the constrained markdown dialect research papers are
//!    written in, producing the presentational HTML of the paper page
//!
//! Around them sit the site content (papers, the havan mantra cycle, the
//! sacred geometry catalog), a havan session tying fire and mantras together,
//! JSON configuration and the `havan-cli` binary.

pub mod cli;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod markdown;
pub mod session;
pub mod synth;

pub use error::{HavanError, Result};
