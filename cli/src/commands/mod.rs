// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for holefit CLI

pub mod analyze;
pub mod config;
pub mod place;

pub use self::analyze::AnalyzeArgs;
pub use self::config::ConfigCommand;
pub use self::place::PlaceArgs;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use holefit_core::domain::client_config::ClientConfig;
use holefit_core::domain::credentials::Credentials;
use holefit_core::domain::hole::HoleClass;
use holefit_core::domain::platform::PlatformTransport;
use holefit_core::infrastructure::onshape_client::OnshapeClient;

/// Command-level failures that end the run with a non-zero exit
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Geometry analysis failed; see the log for the platform response")]
    AnalysisFailed,

    #[error("No holes were found in part studio {element_id}")]
    NoHoles { element_id: String },

    #[error("None of the {found} detected hole(s) are {class} holes; nothing to place")]
    NoHolesOfClass { class: HoleClass, found: usize },

    #[error("No template keywords given; pass --template or set template_keywords in the config")]
    NoTemplateKeywords,
}

/// Load configuration and credentials and build the signed platform client.
///
/// Missing credentials are fatal here, before any request is made.
pub fn connect(
    config_path: Option<PathBuf>,
) -> Result<(ClientConfig, Arc<dyn PlatformTransport>)> {
    let config =
        ClientConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let credentials =
        Credentials::from_env().context("Platform credentials are not configured")?;
    let client =
        OnshapeClient::new(&config, &credentials).context("Failed to create platform client")?;

    tracing::debug!(base_url = client.base_url(), "Platform client ready");
    Ok((config, Arc::new(client)))
}

/// Keywords from the command line, falling back to the configured defaults.
pub fn resolve_keywords(
    cli: Vec<String>,
    config: &ClientConfig,
) -> Result<Vec<String>, CommandError> {
    let keywords: Vec<String> = if cli.is_empty() {
        config.template_keywords.clone()
    } else {
        cli
    };

    let keywords: Vec<String> = keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        return Err(CommandError::NoTemplateKeywords);
    }
    Ok(keywords)
}
