// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Uniform failure payloads.
//!
//! Every failure the API emits is rendered as the same JSON envelope:
//! `{timestamp, status, error, message, path, validationErrors?}`. The
//! mapping from failure kind to (status, label, message) lives here, in
//! one place. `ApiError::into_response` renders the envelope and also
//! stashes the error in the response extensions so the outermost
//! [`translate_failures`] layer can re-render it with the request path
//! filled in.
//!
//! Anything unclassified falls through to a sanitized 500; the detail is
//! logged server-side and never reaches the client.

use std::collections::HashMap;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::auth::error::AuthError;

/// The uniform error envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// When the failure was rendered (RFC 3339, UTC).
    pub timestamp: DateTime<Utc>,
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Category label, e.g. `"Unauthorized"`.
    pub error: String,
    /// Human-readable message for this specific failure.
    pub message: String,
    /// Path of the request that failed.
    pub path: String,
    /// Per-field messages, present for validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<HashMap<String, String>>,
}

/// Failures the API can surface to a client.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Authentication/authorization failure with its specific kind.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Login credential check failed.
    #[error("Invalid username or password")]
    BadCredentials,
    /// Request payload failed validation; carries per-field messages.
    #[error("Request validation failed")]
    Validation(HashMap<String, String>),
    /// Catch-all. The string is internal detail: logged, never rendered.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(auth) => auth.status_code(),
            ApiError::BadCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApiError::Auth(auth) => auth.label(),
            ApiError::BadCredentials => "Unauthorized",
            ApiError::Validation(_) => "Validation Failed",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }

    /// Message safe to show a client. Internal detail is replaced.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    /// Render the uniform envelope for this failure.
    pub fn to_payload(&self, path: &str) -> ErrorResponse {
        ErrorResponse {
            timestamp: Utc::now(),
            status: self.status().as_u16(),
            error: self.label().to_string(),
            message: self.public_message(),
            path: path.to_string(),
            validation_errors: match self {
                ApiError::Validation(fields) => Some(fields.clone()),
                _ => None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(error = %detail, "unhandled failure");
        }
        let status = self.status();
        let mut response = (status, Json(self.to_payload(""))).into_response();
        // The translate_failures layer re-renders with the request path.
        response.extensions_mut().insert(self);
        response
    }
}

/// Outermost failure-translation layer.
///
/// Captures the request path, and when a handler or inner layer failed
/// with an [`ApiError`], re-renders the envelope with that path echoed.
/// Successful responses pass through untouched.
pub async fn translate_failures(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut response = next.run(req).await;

    if let Some(failure) = response.extensions_mut().remove::<ApiError>() {
        let status = failure.status();
        return (status, Json(failure.to_payload(&path))).into_response();
    }
    response
}
