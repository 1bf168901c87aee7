//! CLI Module
//!
//! Command-line interface for the havan fire synthesizer and paper renderer.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Havan - procedural fire ambience and research paper rendering
#[derive(Parser, Debug)]
#[command(name = "havan-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the fire loop and write it to a WAV file
    Synth {
        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Seed for a reproducible loop
        #[arg(long)]
        seed: Option<u64>,

        /// Bit depth: 16, 24 or 32 (float); overrides the config
        #[arg(long)]
        bit_depth: Option<u16>,
    },

    /// Render a markdown document to HTML
    Render {
        /// Markdown source file
        input: PathBuf,

        /// Output HTML path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render one paper from a library
    Paper {
        /// Paper slug
        slug: String,

        /// Library JSON file or directory (bundled papers if omitted)
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// Output HTML path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the papers in a library
    Papers {
        /// Library JSON file or directory (bundled papers if omitted)
        #[arg(short, long)]
        library: Option<PathBuf>,
    },

    /// List the havan mantra cycle
    Mantras,

    /// Search the sacred geometry catalog
    Geometry {
        /// Search text (lists everything if omitted)
        query: Option<String>,
    },

    /// Run a simulated havan session
    Havan {
        /// Session length in seconds
        #[arg(short, long, default_value_t = 30)]
        seconds: u64,

        /// Write the captured fire audio to a WAV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
