// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::roles::Role;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Always `"Bearer"`.
    pub token_type: String,
    /// The signed token to present on subsequent requests.
    pub access_token: String,
    /// Token lifetime in milliseconds.
    pub expires_in_ms: i64,
}

// =============================================================================
// Principal
// =============================================================================

/// The caller's authenticated identity, echoed back.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrincipalResponse {
    pub subject: String,
    pub roles: Vec<Role>,
}

// =============================================================================
// Token inspection (admin)
// =============================================================================

/// Admin request to inspect an arbitrary token.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InspectTokenRequest {
    pub token: String,
}

/// Decoded view of a valid token.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenInspection {
    pub subject: String,
    pub roles: Vec<Role>,
    /// Issued-at (Unix timestamp, seconds).
    pub issued_at: i64,
    /// Expiry (Unix timestamp, seconds).
    pub expires_at: i64,
}

// =============================================================================
// Health
// =============================================================================

/// Health probe response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
