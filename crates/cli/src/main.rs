//! Command-line frontend for the combat timeline simulator.
//!
//! Run with: `combat-sim <command>`
mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Catalog, Ring, Run};

/// Turn-based combat timeline simulator
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Simulate scripted combat timelines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a timeline against a board and print the results
    Run(Run),

    /// Print the dial hour ring for a caster and a target
    Ring(Ring),

    /// List the spells of a catalog
    Catalog(Catalog),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute().await,
        Command::Ring(cmd) => cmd.execute(),
        Command::Catalog(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so stdout stays clean for results.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
