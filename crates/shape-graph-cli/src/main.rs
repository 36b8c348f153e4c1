//! Shape Graph CLI
//!
//! Loads a point-cloud sample, builds its k-nearest-neighbor graph and
//! renders the points as a 3D scatter plot.
//!
//! # Commands
//!
//! - `run`: point source → K-NN graph → SVG scatter plot
//! - `build`: point source → K-NN graph → statistics / JSON edge list
//! - `inspect`: point source → bounding box and centroid
//!
//! # Configuration
//!
//! Settings come from `config/default.toml`, `config/{SHAPE_GRAPH_ENV}.toml`
//! and `SHAPE_GRAPH_*` environment variables, or from `--config <file>`.
//! Command-line flags override both.
//!
//! Exit code 0 on success, 1 on runtime failure, 2 on invalid input.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use shape_graph_core::config::LoggingConfig;
use shape_graph_core::Config;

mod commands;
mod error;

use error::exit_code_for_error;

/// Shape Graph CLI - point-cloud K-NN graphs
#[derive(Parser)]
#[command(name = "shape-graph")]
#[command(version)]
#[command(about = "Build k-nearest-neighbor graphs over 3D point-cloud samples")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML); replaces the config/ directory lookup
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a sample, build its K-NN graph and render a scatter plot
    Run(commands::run::RunArgs),
    /// Load a sample, build its K-NN graph and report statistics
    ///
    /// Use --edges-out to export the edge list as JSON.
    Build(commands::build::BuildArgs),
    /// Summarize a sample without building a graph
    Inspect(commands::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(exit_code_for_error(&e).into());
        }
    };

    init_logging(cli.verbose, &config.logging);

    // Dispatch to command handlers
    let exit_code = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args, config),
        Commands::Build(args) => commands::build::handle_build(args, config),
        Commands::Inspect(args) => commands::inspect::handle_inspect(args, config),
    };

    std::process::exit(exit_code);
}

/// Setup logging from `-v` count, falling back to `RUST_LOG`, then config.
fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase())),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.init(),
    }
}
