// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # holefit CLI
//!
//! The `holefit` binary drives the remote CAD platform: it finds holes in a
//! part studio and fills them with copies of a template fastener in an
//! assembly.
//!
//! ## Commands
//!
//! - `holefit analyze` - Detect and summarize holes in a part studio
//! - `holefit place` - Analyze, then insert one template copy per hole
//! - `holefit config show|validate` - Configuration management
//!
//! Credentials are read from `ONSHAPE_ACCESS_KEY` / `ONSHAPE_SECRET_KEY`,
//! optionally via a `.env` file in the working directory.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use holefit_cli::commands::{self, AnalyzeArgs, ConfigCommand, PlaceArgs};

/// holefit - Hole analysis and fastener placement for remote CAD documents
#[derive(Parser)]
#[command(name = "holefit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "HOLEFIT_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "HOLEFIT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect holes in a part studio
    #[command(name = "analyze")]
    Analyze(AnalyzeArgs),

    /// Analyze a part studio and place a template copy at every hole
    #[command(name = "place")]
    Place(PlaceArgs),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, cli.config).await,
        Commands::Place(args) => commands::place::execute(args, cli.config).await,
        Commands::Config { command } => {
            commands::config::handle_command(command, cli.config).await
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
