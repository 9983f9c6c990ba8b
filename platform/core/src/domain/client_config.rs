// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Client Configuration Types
//
// Defines the YAML configuration for the platform client:
// - Platform base URL and transport timeout
// - Accept header negotiated with the platform
// - Default template keywords used by batch placement

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "HOLEFIT_CONFIG_PATH";
pub const BASE_URL_ENV: &str = "HOLEFIT_BASE_URL";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read configuration at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Platform root, without trailing slash (e.g. "https://cad.onshape.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional whole-request timeout. Unset means the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Accept header sent with every request
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Keywords used to find the template instance when none are given
    #[serde(default)]
    pub template_keywords: Vec<String>,
}

fn default_base_url() -> String {
    "https://cad.onshape.com".to_string()
}

fn default_accept() -> String {
    "application/json;charset=UTF-8; qs=0.09".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            accept: default_accept(),
            template_keywords: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. HOLEFIT_CONFIG_PATH environment variable
    /// 2. ./holefit.yaml (working directory)
    /// 3. ~/.holefit/config.yaml (user home)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./holefit.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".holefit").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Explicit path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = match Self::discover_config() {
            Some(config_path) => {
                tracing::info!("Loading configuration from discovered path: {:?}", config_path);
                Self::from_yaml_file(config_path)?
            }
            None => {
                tracing::debug!("No configuration file found. Using defaults.");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(BASE_URL_ENV) {
            if val.trim().is_empty() {
                tracing::warn!("Ignoring empty {} override", BASE_URL_ENV);
            } else {
                tracing::info!("Environment override: {}={}", BASE_URL_ENV, val);
                self.base_url = val;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("base_url cannot be empty".to_string()));
        }
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got '{}'",
                base
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.template_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "template_keywords cannot contain empty entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL without trailing slash, ready for path concatenation
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
