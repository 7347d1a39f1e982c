// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token codec: issuing and verifying signed bearer tokens.
//!
//! Tokens are compact three-part JWS structures (`header.payload.signature`)
//! signed with HS256. The payload carries the subject, a comma-joined
//! `roles` claim, and numeric issued-at / expiry timestamps. Tokens are
//! self-contained: verification needs no server-side state.
//!
//! `verify` reports the most specific diagnosable failure: structural
//! problems before signature problems, signature problems before expiry.
//! Expiry is checked against the caller-supplied clock, never the wall
//! clock, so the codec is a pure function of its inputs.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use super::identity::Identity;
use super::keys::SigningKeys;
use super::roles::Role;

/// Verification failure kinds.
///
/// Each variant needs a different user-facing message, so they are never
/// collapsed into a generic "invalid token". Callers that only need a
/// boolean can use [`TokenCodec::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature does not match the payload under the configured key.
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Not a structurally valid three-part signed token.
    #[error("Token is malformed")]
    Malformed,
    /// The token's expiry timestamp has passed.
    #[error("Token has expired")]
    Expired,
    /// Signed with an algorithm this service does not accept.
    #[error("Token type is not supported")]
    Unsupported,
    /// Structurally valid but carries no subject.
    #[error("Token claims are empty")]
    EmptyClaims,
}

/// Codec-internal failure, distinct from the verification taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Configured token lifetime was zero or negative.
    #[error("token lifetime must be positive")]
    NonPositiveTtl,
    /// Signing failed; detail is logged server-side.
    #[error("token signing failed")]
    SigningFailed,
}

/// Claims carried in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the unique username.
    pub sub: String,
    /// Granted roles, comma-joined (`"ADMIN,VETERINARIAN"`).
    pub roles: String,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds). The token is invalid exactly at
    /// this instant.
    pub exp: i64,
}

impl Claims {
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Roles granted by this token. Unknown spellings grant nothing.
    pub fn roles(&self) -> Vec<Role> {
        Role::parse_claim(&self.roles)
    }
}

/// Issues and verifies signed tokens with a fixed lifetime.
#[derive(Clone, Debug)]
pub struct TokenCodec {
    keys: SigningKeys,
    ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from derived key material and a token lifetime.
    ///
    /// A non-positive lifetime would mint tokens that are expired at birth,
    /// so construction refuses it.
    pub fn new(keys: SigningKeys, ttl: Duration) -> Result<Self, CodecError> {
        if ttl <= Duration::zero() {
            return Err(CodecError::NonPositiveTtl);
        }
        Ok(Self { keys, ttl })
    }

    /// Configured token lifetime in milliseconds.
    pub fn ttl_ms(&self) -> i64 {
        self.ttl.num_milliseconds()
    }

    /// Build a signed token for a verified identity.
    ///
    /// `iat` is `now`, `exp` is `now + ttl`. The identity is embedded as-is;
    /// tokens are never mutated after issuance.
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, CodecError> {
        let claims = Claims {
            sub: identity.subject.clone(),
            roles: Role::join_claim(&identity.roles),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding()).map_err(|e| {
            error!(error = %e, "failed to sign token");
            CodecError::SigningFailed
        })
    }

    /// Parse and verify a token against the caller-supplied clock.
    ///
    /// Check order: structure, then accepted algorithm, then signature,
    /// then `now < exp`, then a non-empty subject. The first failure wins.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against `now`, not the wall clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, self.keys.decoding(), &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::Unsupported
                }
                _ => TokenError::Malformed,
            }
        })?;

        let claims = data.claims;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.sub.trim().is_empty() {
            return Err(TokenError::EmptyClaims);
        }
        Ok(claims)
    }

    /// Boolean fast path derived from [`verify`](Self::verify).
    ///
    /// The failure detail is discarded by the caller only; internally the
    /// full check still runs.
    pub fn is_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verify(token, now).is_ok()
    }
}
