// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Request Signing
//!
//! HMAC-SHA256 request authentication for the platform REST API.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Produce per-request authentication headers
//!
//! Every request is signed over a lower-cased canonical string:
//!
//! ```text
//! method \n nonce \n date \n content-type \n path \n query \n
//! ```
//!
//! and carries `Authorization: On {access_key}:HmacSHA256:{base64 signature}`.
//! Nonce and date are generated fresh for every call.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::{distr::Alphanumeric, Rng};
use sha2::Sha256;

use crate::domain::client_config::ConfigError;
use crate::domain::credentials::Credentials;
use crate::domain::platform::HttpMethod;

type HmacSha256 = Hmac<Sha256>;

pub const NONCE_LEN: usize = 25;
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Headers attached to one signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub nonce: String,
    pub authorization: String,
    pub content_type: String,
    pub accept: String,
}

impl SignedHeaders {
    /// Header name/value pairs in the order they are sent
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Date", self.date.as_str()),
            ("On-Nonce", self.nonce.as_str()),
            ("Authorization", self.authorization.as_str()),
            ("Content-Type", self.content_type.as_str()),
            ("Accept", self.accept.as_str()),
        ]
    }
}

pub struct RequestSigner {
    access_key: String,
    mac: HmacSha256,
    accept: String,
}

impl RequestSigner {
    pub fn new(credentials: &Credentials, accept: impl Into<String>) -> Result<Self, ConfigError> {
        let mac = HmacSha256::new_from_slice(credentials.secret_key())
            .map_err(|e| ConfigError::Invalid(format!("unusable secret key: {}", e)))?;
        Ok(Self {
            access_key: credentials.access_key().to_string(),
            mac,
            accept: accept.into(),
        })
    }

    /// Sign a request with a fresh nonce and the current time.
    pub fn sign(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        content_type: &str,
    ) -> SignedHeaders {
        self.sign_with(method, path, query, content_type, &make_nonce(), &http_date(Utc::now()))
    }

    /// Sign with an explicit nonce and date. Same inputs, same headers.
    pub fn sign_with(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        content_type: &str,
        nonce: &str,
        date: &str,
    ) -> SignedHeaders {
        let canonical = canonical_string(method, nonce, date, content_type, path, query);

        let mut mac = self.mac.clone();
        mac.update(canonical.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        SignedHeaders {
            date: date.to_string(),
            nonce: nonce.to_string(),
            authorization: format!("On {}:HmacSHA256:{}", self.access_key, signature),
            content_type: content_type.to_string(),
            accept: self.accept.clone(),
        }
    }
}

/// Lower-cased string the signature is computed over.
pub fn canonical_string(
    method: HttpMethod,
    nonce: &str,
    date: &str,
    content_type: &str,
    path: &str,
    query: &[(&str, &str)],
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        method.as_str(),
        nonce,
        date,
        content_type,
        path,
        query_string(query)
    )
    .to_lowercase()
}

pub fn query_string(query: &[(&str, &str)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn make_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

pub fn http_date(now: DateTime<Utc>) -> String {
    now.format(HTTP_DATE_FORMAT).to_string()
}
