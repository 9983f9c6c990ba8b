// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Onshape Client
//!
//! HTTP adapter for the remote CAD platform. Signs every request with
//! [`RequestSigner`] and returns status plus parsed JSON body.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Implements `PlatformTransport` over reqwest
//! - **Integration:** Workflows → signed HTTPS → platform REST API

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::domain::client_config::{ClientConfig, ConfigError};
use crate::domain::credentials::Credentials;
use crate::domain::platform::{
    HttpMethod, PlatformError, PlatformRequest, PlatformResponse, PlatformTransport,
};
use crate::infrastructure::signing::RequestSigner;

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub struct OnshapeClient {
    client: Client,
    base_url: String,
    signer: RequestSigner,
}

impl OnshapeClient {
    pub fn new(config: &ClientConfig, credentials: &Credentials) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            signer: RequestSigner::new(credentials, config.accept.clone())?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PlatformTransport for OnshapeClient {
    async fn send(&self, request: PlatformRequest) -> Result<PlatformResponse, PlatformError> {
        let url = format!("{}{}", self.base_url, request.path);
        let headers = self
            .signer
            .sign(request.method, &request.path, &[], JSON_CONTENT_TYPE);

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        for (name, value) in headers.pairs() {
            req = req.header(name, value);
        }
        if let Some(body) = &request.body {
            req = req.body(body.to_string());
        }

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            "Sending signed platform request"
        );

        let response = req.send().await.map_err(|e| {
            tracing::warn!(path = %request.path, error = %e, "Platform request failed");
            PlatformError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| PlatformError::Transport(format!("Failed to read response body: {}", e)))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
        };

        if !(200..300).contains(&status) {
            tracing::warn!(path = %request.path, status, "Platform rejected request");
        }

        Ok(PlatformResponse { status, body })
    }
}
