//! Pelt CLI - Command-line interface for the fur-export pipeline

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{export, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pelt")]
#[command(about = "Versioned fur-cache export pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the caches an export run would pick up, without exporting
    Scan {
        /// Path to the config file
        #[arg(long, default_value = "pelt.toml")]
        config: PathBuf,

        /// Shot directories (relative to the project root); all shots when empty
        shots: Vec<PathBuf>,
    },

    /// Resolve caches and run the export pipeline
    Export {
        /// Path to the config file
        #[arg(long, default_value = "pelt.toml")]
        config: PathBuf,

        /// Shot directories (relative to the project root); all shots when empty
        shots: Vec<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Drive the built-in mock host instead of a real host session
        #[arg(long)]
        mock_host: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { config, shots } => scan::run(&config, shots),
        Commands::Export {
            config,
            shots,
            yes,
            mock_host,
        } => export::run(&config, shots, yes, mock_host),
    }
}
