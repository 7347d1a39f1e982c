// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless token authentication for the clinic API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in with username/password; the credential store verifies
//!    and the token codec issues a signed bearer token.
//! 2. Client sends `Authorization: Bearer <token>` on every request.
//! 3. The authentication middleware verifies the token, resolves the
//!    identity and attaches an [`AuthenticatedPrincipal`] to the request.
//!    A missing or bad credential makes the request *anonymous*, nothing
//!    more.
//! 4. The authorization gate matches the path against the route policy and
//!    rejects where the requirement is not met.
//!
//! ## Security
//!
//! - Tokens are self-contained HS256 JWS; no server-side session store.
//! - The signing secret is mandatory at startup; there is no default key.
//! - Tokens cannot be revoked before expiry; the lifetime is configurable
//!   and defaults to one hour.
//! - Unmatched routes are denied (fail closed).

pub mod error;
pub mod extractor;
pub mod identity;
pub mod keys;
pub mod middleware;
pub mod policy;
pub mod principal;
pub mod roles;
pub mod token;

pub use error::AuthError;
pub use extractor::Principal;
pub use identity::{CredentialStore, Identity, IdentityLoader, InMemoryDirectory};
pub use keys::SigningKeys;
pub use policy::{Access, RoutePolicy};
pub use principal::AuthenticatedPrincipal;
pub use roles::Role;
pub use token::{Claims, TokenCodec, TokenError};
