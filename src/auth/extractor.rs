// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated principal.
//!
//! Use the `Principal` extractor in handlers that need the caller's
//! identity:
//!
//! ```rust,ignore
//! async fn my_handler(Principal(principal): Principal) -> impl IntoResponse {
//!     // principal is AuthenticatedPrincipal
//! }
//! ```
//!
//! The extractor only reads what the authentication middleware attached;
//! it never re-verifies tokens. Handlers behind the authorization gate can
//! rely on it being present; elsewhere it rejects with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

use super::error::AuthError;
use super::principal::AuthenticatedPrincipal;

/// Extractor for the request's authenticated principal.
pub struct Principal(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(Principal)
            .ok_or(ApiError::Auth(AuthError::Unauthenticated))
    }
}
