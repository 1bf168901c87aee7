//! Havan CLI
//!
//! Command-line interface for the havan fire synthesizer and paper renderer.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use havan::cli::commands;
use havan::cli::{Cli, Commands};
use havan::config::HavanConfig;
use havan::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Havan v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("Error [{}]: {}", err.error_code(), err);
            for suggestion in err.recovery_suggestions() {
                eprintln!("  - {}", suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(cmd) = cli.command else {
        println!("Havan v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for available commands");
        return Ok(());
    };

    let config = commands::load_config(cli.config.as_deref())?;
    handle_command(cmd, &config)
}

fn handle_command(cmd: Commands, config: &HavanConfig) -> Result<()> {
    match cmd {
        Commands::Synth {
            output,
            seed,
            bit_depth,
        } => commands::synth(config, &output, seed, bit_depth),
        Commands::Render { input, output } => commands::render(&input, output.as_deref()),
        Commands::Paper {
            slug,
            library,
            output,
        } => commands::paper(library.as_deref(), &slug, output.as_deref()),
        Commands::Papers { library } => commands::list_papers(library.as_deref()),
        Commands::Mantras => commands::list_mantras(),
        Commands::Geometry { query } => commands::geometry(query.as_deref()),
        Commands::Havan { seconds, output } => {
            commands::havan(config, seconds, output.as_deref())
        }
    }
}
