// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identities and the collaborator contracts that produce them.
//!
//! The auth subsystem does not own user records. It consumes two
//! collaborators: a [`CredentialStore`] that turns a username/password pair
//! into a verified [`Identity`] at login, and an [`IdentityLoader`] that
//! resolves a token subject back to an identity on each request. Both are
//! async trait objects; either may block on I/O, and any timeout policy is
//! theirs, not ours.
//!
//! [`InMemoryDirectory`] implements both contracts and backs the runnable
//! binary and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::roles::Role;

/// A verified identity: unique username plus granted roles.
///
/// Produced by a credential check at login; immutable for the lifetime of
/// any token issued from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub roles: Vec<Role>,
}

/// Identity resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No account exists for the requested subject.
    #[error("no account found for subject")]
    NotFound,
    /// The backing store could not be reached.
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

/// Credential verification failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Unknown username or wrong password. Deliberately not distinguished.
    #[error("invalid username or password")]
    BadCredentials,
    /// The backing store could not be reached.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a token subject to the identity it was issued for.
#[async_trait]
pub trait IdentityLoader: Send + Sync {
    async fn load_by_subject(&self, subject: &str) -> Result<Identity, IdentityError>;
}

/// Verifies a username/password pair at login.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, CredentialError>;
}

struct StoredUser {
    password_digest: [u8; 32],
    roles: Vec<Role>,
}

/// In-memory user directory implementing both collaborator contracts.
///
/// Populated once at startup and read-only afterwards, so it is shared
/// without locking. Passwords are stored as SHA-256 digests; the plaintext
/// is dropped at insertion.
#[derive(Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, StoredUser>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. Call before the directory is shared.
    pub fn insert_user(&mut self, username: &str, password: &str, roles: Vec<Role>) {
        self.users.insert(
            username.to_string(),
            StoredUser {
                password_digest: digest(password),
                roles,
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

#[async_trait]
impl IdentityLoader for InMemoryDirectory {
    async fn load_by_subject(&self, subject: &str) -> Result<Identity, IdentityError> {
        let user = self.users.get(subject).ok_or(IdentityError::NotFound)?;
        Ok(Identity {
            subject: subject.to_string(),
            roles: user.roles.clone(),
        })
    }
}

#[async_trait]
impl CredentialStore for InMemoryDirectory {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, CredentialError> {
        let user = self
            .users
            .get(username)
            .ok_or(CredentialError::BadCredentials)?;
        if user.password_digest != digest(password) {
            return Err(CredentialError::BadCredentials);
        }
        Ok(Identity {
            subject: username.to_string(),
            roles: user.roles.clone(),
        })
    }
}
