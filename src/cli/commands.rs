//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::HavanConfig;
use crate::content::{GeometryCatalog, MantraCycle, PaperLibrary};
use crate::engine::buffer::{calculate_peak, calculate_rms, AudioBuffer};
use crate::engine::io::export_wav;
use crate::engine::player::{CaptureDevice, LoopPlayer};
use crate::error::{HavanError, Result};
use crate::markdown;
use crate::session::HavanSession;
use crate::synth::FireSynth;

/// Load the configuration file if one was given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<HavanConfig> {
    match path {
        Some(path) => HavanConfig::load(path),
        None => Ok(HavanConfig::default()),
    }
}

/// Generate the fire loop and export it as WAV.
pub fn synth(
    config: &HavanConfig,
    output: &Path,
    seed: Option<u64>,
    bit_depth: Option<u16>,
) -> Result<()> {
    info!("Synthesizing fire loop to: {}", output.display());

    let synth = FireSynth::new(config.synth.clone())?;
    let buffer = match seed {
        Some(seed) => synth.generate_with_rng(&mut StdRng::seed_from_u64(seed)),
        None => synth.generate(),
    };

    let mut format = config.export_format();
    if let Some(bit_depth) = bit_depth {
        format.bit_depth = bit_depth;
    }
    export_wav(&buffer, output, format)?;

    println!("Fire loop written: {}", output.display());
    println!(
        "  {:.1}s @ {}Hz, {}-bit",
        buffer.duration_secs(),
        buffer.sample_rate,
        format.bit_depth
    );
    for line in level_report(&buffer) {
        println!("  {}", line);
    }

    Ok(())
}

/// Render a markdown file to HTML.
pub fn render(input: &Path, output: Option<&Path>) -> Result<()> {
    info!("Rendering markdown: {}", input.display());

    let source = fs::read_to_string(input).map_err(|e| HavanError::read_failed(input, e))?;

    write_html(&markdown::render(&source), output)
}

/// Peak and RMS lines for a generated buffer.
pub(crate) fn level_report(buffer: &AudioBuffer) -> [String; 2] {
    [
        format!("Peak: {:.1} dBFS", calculate_peak(buffer)),
        format!("RMS:  {:.1} dBFS", calculate_rms(buffer)),
    ]
}

/// The library at `path`, or the bundled papers when no path is given.
fn open_library(path: Option<&Path>) -> Result<PaperLibrary> {
    match path {
        Some(path) => PaperLibrary::load(path),
        None => Ok(PaperLibrary::builtin()),
    }
}

/// Render a single paper from a library.
pub fn paper(library: Option<&Path>, slug: &str, output: Option<&Path>) -> Result<()> {
    info!("Rendering paper '{}'", slug);

    let library = open_library(library)?;
    let paper = library.require(slug)?;

    let mut html = format!("<h1>{}</h1>\n", markdown::escape_html(&paper.title));
    if let Some(subtitle) = &paper.subtitle {
        html.push_str(&format!("<h2>{}</h2>\n", markdown::escape_html(subtitle)));
    }
    html.push_str(&format!(
        "<p>{} &middot; {} &middot; {} &middot; {}</p>\n",
        markdown::escape_html(&paper.author),
        paper.formatted_date(),
        paper.reading_time,
        paper.category
    ));
    html.push_str(&paper.rendered_content());

    write_html(&html, output)
}

/// List slugs and titles in a library.
pub fn list_papers(library: Option<&Path>) -> Result<()> {
    let library = open_library(library)?;

    if library.is_empty() {
        println!("No papers found.");
        return Ok(());
    }

    println!("Papers:");
    println!("{:-<60}", "");
    for paper in library.papers() {
        println!("{:<32} [{}] {}", paper.slug, paper.category, paper.title);
    }
    println!("{:-<60}", "");
    println!("{} paper(s)", library.len());

    Ok(())
}

/// Print the mantra cycle.
pub fn list_mantras() -> Result<()> {
    let cycle = MantraCycle::builtin();

    println!("Havan Mantras:");
    println!("{:-<60}", "");
    for (i, mantra) in cycle.iter().enumerate() {
        println!("{:>2}. {} ({}s)", i + 1, mantra.transliteration, mantra.duration);
        println!("    {}", mantra.sanskrit);
        println!("    {}", mantra.meaning);
    }
    println!("{:-<60}", "");
    println!("Full cycle: {}s", cycle.total_cycle_duration().as_secs());

    Ok(())
}

/// Search the sacred geometry catalog.
pub fn geometry(query: Option<&str>) -> Result<()> {
    let catalog = GeometryCatalog::builtin();
    let results = catalog.search(query.unwrap_or(""));

    if results.is_empty() {
        println!("No sacred geometry matches your search.");
        return Ok(());
    }

    for item in &results {
        match &item.sanskrit {
            Some(sanskrit) => println!("{:<10} {} ({})", item.category, item.name, sanskrit),
            None => println!("{:<10} {}", item.category, item.name),
        }
    }
    println!("{} of {} item(s)", results.len(), catalog.len());

    Ok(())
}

/// Simulate a havan session, printing each mantra as it comes up.
pub fn havan(config: &HavanConfig, seconds: u64, output: Option<&Path>) -> Result<()> {
    if seconds == 0 {
        return Err(HavanError::SessionError {
            reason: "session length must be at least one second".to_string(),
        });
    }

    let synth = FireSynth::new(config.synth.clone())?;
    let sample_rate = synth.config().sample_rate as usize;
    let mut player = LoopPlayer::with_synth(CaptureDevice::default(), synth);
    player.set_volume(config.playback.volume);

    let mut session = HavanSession::with_parts(player, MantraCycle::builtin());
    info!("Starting havan session {}", session.session_id());
    session.start()?;

    print_mantra(&session, 0);
    for second in 1..=seconds {
        session.pump(sample_rate);
        if session.tick(Duration::from_secs(1)) > 0 {
            print_mantra(&session, second);
        }
    }

    session.stop();
    println!(
        "Session complete: {}s, {} mantra change(s)",
        seconds,
        session.cycle_count()
    );

    if let Some(output) = output {
        let captured = session.player_mut().device_mut().take_buffer();
        if captured.is_empty() {
            warn!("No audio captured");
            return Ok(());
        }
        export_wav(&captured, output, config.export_format())?;
        println!("Session audio written: {}", output.display());
    }

    Ok(())
}

fn print_mantra(session: &HavanSession<CaptureDevice>, second: u64) {
    let mantra = session.current_mantra();
    println!("[{:>4}s] {} - {}", second, mantra.transliteration, mantra.meaning);
}

fn write_html(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, html)?;
            println!("HTML written: {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}
