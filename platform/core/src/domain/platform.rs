// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Platform
//!
//! Port through which every workflow talks to the remote CAD platform.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Isolates workflows from HTTP and request signing
//!
//! The production adapter lives in `infrastructure::onshape_client`; it signs
//! each request before sending it. Workflows only see method, path, body and
//! the decoded JSON response.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call to the platform REST API
#[derive(Debug, Clone)]
pub struct PlatformRequest {
    pub method: HttpMethod,
    /// Absolute API path, e.g. `/api/assemblies/d/{did}/w/{wid}/e/{eid}`
    pub path: String,
    pub body: Option<Value>,
}

impl PlatformRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Response as seen by the workflows. Non-2xx statuses are not errors at this
/// level; each caller decides what a rejection means for it.
#[derive(Debug, Clone)]
pub struct PlatformResponse {
    pub status: u16,
    /// Parsed JSON body; `Value::Null` when empty, a JSON string when not JSON
    pub body: Value,
}

impl PlatformResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx response, or a `Rejected` error carrying the status
    pub fn into_success(self) -> Result<Value, PlatformError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(PlatformError::Rejected {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Platform rejected request with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

/// Sends requests to the remote platform. Implementations must complete one
/// request fully before returning; callers never overlap calls.
#[async_trait]
pub trait PlatformTransport: Send + Sync {
    async fn send(&self, request: PlatformRequest) -> Result<PlatformResponse, PlatformError>;
}

/// API paths for the endpoints this client consumes
pub mod paths {
    pub fn featurescript(did: &str, wid: &str, eid: &str) -> String {
        format!("/api/partstudios/d/{}/w/{}/e/{}/featurescript", did, wid, eid)
    }

    pub fn assembly(did: &str, wid: &str, eid: &str) -> String {
        format!("/api/assemblies/d/{}/w/{}/e/{}", did, wid, eid)
    }

    pub fn assembly_instances(did: &str, wid: &str, eid: &str) -> String {
        format!("{}/instances", assembly(did, wid, eid))
    }

    pub fn occurrence_transform(did: &str, wid: &str, eid: &str) -> String {
        format!("{}/occurrences/transform", assembly(did, wid, eid))
    }
}
