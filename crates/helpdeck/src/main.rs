//! HelpDeck CLI - content tools for articles and change logs.
//!
//! Provides commands for:
//! - `convert`: Convert plain text or markdown into document JSON
//! - `render`: Render stored content as HTML or a plain-text preview
//! - `migrate`: Convert a directory of legacy articles into document JSON
//! - `slug`: Print the slug for an article title

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, MigrateArgs, RenderArgs, SlugArgs};
use output::Output;

/// HelpDeck - content tools.
#[derive(Parser)]
#[command(name = "helpdeck", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover helpdeck.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert plain text or markdown into document JSON.
    Convert(ConvertArgs),
    /// Render stored content as HTML or a plain-text preview.
    Render(RenderArgs),
    /// Convert every legacy article in a directory into document JSON.
    Migrate(MigrateArgs),
    /// Print the slug for an article title.
    Slug(SlugArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Convert(args) => args.execute(config),
        Commands::Render(args) => args.execute(config),
        Commands::Migrate(args) => args.execute(config),
        Commands::Slug(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
