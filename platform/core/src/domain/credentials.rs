// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! API key pair used to sign every platform request.

use std::fmt;

use super::client_config::ConfigError;

pub const ACCESS_KEY_ENV: &str = "ONSHAPE_ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "ONSHAPE_SECRET_KEY";

/// Access/secret key pair. Loaded once at startup and never mutated.
#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        if access_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(ACCESS_KEY_ENV));
        }
        if secret_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(SECRET_KEY_ENV));
        }

        Ok(Self {
            access_key,
            secret_key,
        })
    }

    /// Read both keys from the process environment.
    ///
    /// A missing or blank key is a configuration error; callers are expected
    /// to treat it as fatal before serving any request.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_key = std::env::var(ACCESS_KEY_ENV)
            .map_err(|_| ConfigError::MissingCredential(ACCESS_KEY_ENV))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| ConfigError::MissingCredential(SECRET_KEY_ENV))?;
        Self::new(access_key, secret_key)
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keys_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(ConfigError::MissingCredential(ACCESS_KEY_ENV))
        ));
        assert!(matches!(
            Credentials::new("access", "  "),
            Err(ConfigError::MissingCredential(SECRET_KEY_ENV))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("access", "hunter2").unwrap();
        let printed = format!("{:?}", creds);
        assert!(printed.contains("access"));
        assert!(!printed.contains("hunter2"));
    }
}
