// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use holefit_core::domain::client_config::{ClientConfig, BASE_URL_ENV, CONFIG_PATH_ENV};
use holefit_core::domain::credentials::{ACCESS_KEY_ENV, SECRET_KEY_ENV};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
    }
}

fn env_or_unset(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| "(not set)".to_string())
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = ClientConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!("  2. {}: {}", CONFIG_PATH_ENV, env_or_unset(CONFIG_PATH_ENV).dimmed());
        println!("  3. ./holefit.yaml");
        println!("  4. ~/.holefit/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Platform:".bold());
    println!("  Base URL: {}", config.normalized_base_url());
    if std::env::var(BASE_URL_ENV).is_ok() {
        println!("    {}", format!("(overridden by {})", BASE_URL_ENV).dimmed());
    }
    match config.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: {}", "(transport default)".dimmed()),
    }
    println!("  Accept: {}", config.accept);
    println!();

    println!("{}", "Template keywords:".bold());
    if config.template_keywords.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for keyword in &config.template_keywords {
        println!("  - {}", keyword);
    }
    println!();

    // Never print key material
    println!("{}", "Credentials:".bold());
    for name in [ACCESS_KEY_ENV, SECRET_KEY_ENV] {
        let state = match std::env::var(name) {
            Ok(v) if !v.trim().is_empty() => "set".green(),
            _ => "missing".red(),
        };
        println!("  {}: {}", name, state);
    }
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ClientConfig::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}
