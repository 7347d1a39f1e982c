// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped authenticated principal.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::AuthError;
use super::identity::Identity;
use super::roles::Role;

/// Projection of a validated identity onto one request.
///
/// Attached to the request's extensions by the authentication middleware
/// and dropped when the request completes. Never shared across requests and
/// never stored globally; each request carries its own copy.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedPrincipal {
    /// Unique username the token was issued for.
    pub subject: String,
    /// Roles granted to this principal.
    pub roles: Vec<Role>,
}

impl AuthenticatedPrincipal {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Explicit capability check for role-restricted operations.
    ///
    /// Called at the top of a handler that needs more than "authenticated";
    /// the route policy table names the same requirement.
    pub fn require_role(&self, role: Role) -> Result<(), AuthError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl From<Identity> for AuthenticatedPrincipal {
    fn from(identity: Identity) -> Self {
        Self {
            subject: identity.subject,
            roles: identity.roles,
        }
    }
}
