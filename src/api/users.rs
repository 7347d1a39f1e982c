// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::auth::extractor::Principal;
use crate::models::PrincipalResponse;

/// Echo the caller's authenticated identity.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "The authenticated principal", body = PrincipalResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(Principal(principal): Principal) -> Json<PrincipalResponse> {
    Json(PrincipalResponse {
        subject: principal.subject,
        roles: principal.roles,
    })
}
