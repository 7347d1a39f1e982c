// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::auth::error::AuthError;
use crate::auth::extractor::Principal;
use crate::auth::roles::Role;
use crate::error::ApiError;
use crate::models::{InspectTokenRequest, TokenInspection};
use crate::state::AppState;

/// Decode and verify an arbitrary token on behalf of an administrator.
///
/// Surfaces the specific verification failure (bad signature, malformed,
/// expired, unsupported, empty claims) instead of a generic rejection,
/// which makes this the support tool for "why doesn't my token work".
///
/// The route policy already restricts `/api/admin/**` to admins; the
/// explicit check at the top keeps the requirement visible and enforced
/// even if this handler is ever mounted elsewhere.
#[utoipa::path(
    post,
    path = "/api/admin/tokens/inspect",
    request_body = InspectTokenRequest,
    tag = "Admin",
    responses(
        (status = 200, description = "Decoded claims", body = TokenInspection),
        (status = 401, description = "Submitted token failed verification", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse)
    )
)]
pub async fn inspect_token(
    Principal(principal): Principal,
    State(state): State<AppState>,
    Json(request): Json<InspectTokenRequest>,
) -> Result<Json<TokenInspection>, ApiError> {
    principal.require_role(Role::Admin)?;

    let claims = state
        .codec
        .verify(&request.token, Utc::now())
        .map_err(AuthError::from)?;

    Ok(Json(TokenInspection {
        subject: claims.subject().to_string(),
        roles: claims.roles(),
        issued_at: claims.iat,
        expires_at: claims.exp,
    }))
}
