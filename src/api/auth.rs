// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::info;

use crate::auth::identity::CredentialError;
use crate::error::ApiError;
use crate::models::{LoginRequest, TokenResponse};
use crate::state::AppState;

/// Login: verify credentials and issue a token.
///
/// The only place a token is ever created. The credential check is the
/// collaborator's; this handler validates the payload shape, maps the
/// outcome, and never reveals whether the username or the password was the
/// wrong half.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 401, description = "Bad credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut fields = HashMap::new();
    if request.username.trim().is_empty() {
        fields.insert("username".to_string(), "must not be blank".to_string());
    }
    if request.password.is_empty() {
        fields.insert("password".to_string(), "must not be blank".to_string());
    }
    if !fields.is_empty() {
        return Err(ApiError::Validation(fields));
    }

    let identity = state
        .credentials
        .verify_credentials(&request.username, &request.password)
        .await
        .map_err(|err| match err {
            CredentialError::BadCredentials => ApiError::BadCredentials,
            CredentialError::Unavailable(detail) => ApiError::Internal(detail),
        })?;

    let access_token = state
        .codec
        .issue(&identity, Utc::now())
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    info!(subject = %identity.subject, "token issued");

    Ok(Json(TokenResponse {
        token_type: "Bearer".to_string(),
        access_token,
        expires_in_ms: state.codec.ttl_ms(),
    }))
}
