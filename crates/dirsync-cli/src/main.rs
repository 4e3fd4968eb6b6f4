mod cli;
mod commands;
mod interactive;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();
    logging::init(cli.log_level);

    commands::Run::execute(&cli).context("Sync failed")?;

    Ok(())
}
