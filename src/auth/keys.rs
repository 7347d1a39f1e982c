// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Symmetric signing key material.
//!
//! Both sides of the codec (issuing and verifying) derive from the same
//! configured secret, so the pair is built once here and shared. Derivation
//! is deterministic: the same secret always yields the same key material.

use jsonwebtoken::{DecodingKey, EncodingKey};
use thiserror::Error;

/// Key derivation failure. Raised at startup only; there is no fallback key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The configured secret was missing or blank.
    #[error("signing secret must not be empty")]
    EmptySecret,
}

/// HMAC-SHA256 key pair derived from the configured signing secret.
#[derive(Clone, Debug)]
pub struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    /// Derive key material from the configured secret string.
    ///
    /// An empty or whitespace-only secret is refused so a misconfigured
    /// deployment fails at process start instead of signing tokens with a
    /// predictable key.
    pub fn from_secret(secret: &str) -> Result<Self, KeyError> {
        if secret.trim().is_empty() {
            return Err(KeyError::EmptySecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}
