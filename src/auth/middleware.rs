// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware.
//!
//! Runs once per request, before the authorization gate. Extracts the
//! bearer credential, verifies it, resolves the identity and attaches an
//! [`AuthenticatedPrincipal`] to the request's extensions for downstream
//! use. A request with no credential, or with a bad one, proceeds
//! *anonymous*: the gate decides whether the route required one. Keeping
//! that decision out of this filter means a bad token aimed at a public
//! route leaks no diagnostic to the caller.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing::{debug, warn};

use crate::state::AppState;

use super::principal::AuthenticatedPrincipal;

/// Exact, case-sensitive credential prefix.
const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer credential from the `Authorization` header.
///
/// Accepted only if the header is present and starts with the exact
/// `"Bearer "` prefix; anything else means "no credential", not an error.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Authentication middleware.
///
/// Mutates only the request's own extensions and always forwards to the
/// next stage; it never writes an HTTP response. The identity-loader
/// lookup is the only I/O on this path.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match state.codec.verify(token, Utc::now()) {
            Ok(claims) => match state.identities.load_by_subject(claims.subject()).await {
                Ok(identity) => {
                    req.extensions_mut()
                        .insert(AuthenticatedPrincipal::from(identity));
                }
                Err(err) => {
                    // No identity may leak into this request.
                    req.extensions_mut().remove::<AuthenticatedPrincipal>();
                    warn!(subject = claims.subject(), error = %err, "token subject did not resolve");
                }
            },
            Err(err) => {
                req.extensions_mut().remove::<AuthenticatedPrincipal>();
                warn!(error = %err, "token verification failed, continuing anonymous");
            }
        }
    } else {
        debug!("no bearer credential, continuing anonymous");
    }

    next.run(req).await
}
