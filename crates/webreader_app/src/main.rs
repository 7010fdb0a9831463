mod cli;
mod commands;
mod progress;

use clap::Parser;
use engine_logging::{engine_info, LogDestination};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    engine_logging::initialize(destination, cli.log_level);
    engine_info!("webreader {} starting", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Extract(args) => {
            let summary = commands::run_extract(args)?;
            engine_info!("Extracted {} records", summary.record_count);
        }
        Command::Convert(args) => {
            commands::run_convert(args)?;
        }
    }
    Ok(())
}
