//! skinforge CLI - Command-line interface for Source engine skin conversion

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "skinforge")]
#[command(about = "skinforge: ports CS:GO weapon skins to Momentum Mod", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the skinforge CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
