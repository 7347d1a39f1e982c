// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.

use axum::http::StatusCode;
use thiserror::Error;

use super::token::TokenError;

/// Failures raised at the authentication/authorization boundary.
///
/// Token failures keep their specific kind end to end; the display string
/// of each variant is the user-facing message rendered by the failure
/// translator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Token verification failed; carries the specific kind.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The token verified but its subject resolves to no known account.
    #[error("No account exists for this token")]
    UnknownSubject,
    /// The route requires a principal and none is attached.
    #[error("Authentication is required to access this resource")]
    Unauthenticated,
    /// A principal is attached but lacks the required role.
    #[error("Insufficient permissions to access this resource")]
    Forbidden,
}

impl AuthError {
    /// Category label rendered in the error payload's `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            AuthError::Token(_) | AuthError::UnknownSubject | AuthError::Unauthenticated => {
                "Unauthorized"
            }
            AuthError::Forbidden => "Forbidden",
        }
    }

    /// HTTP status for this failure: 401 until a principal exists, 403 when
    /// an authenticated principal lacks the required role.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Token(_) | AuthError::UnknownSubject | AuthError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}
