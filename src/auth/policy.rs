// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route authorization policy.
//!
//! An ordered table of (pattern, requirement) pairs, built once at startup
//! and read-only afterwards. For each request the first matching entry
//! decides; a path matching no entry is denied (fail closed). Every request
//! is authorized independently from its attached principal alone; no
//! session state exists or is consulted.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

use super::error::AuthError;
use super::principal::AuthenticatedPrincipal;
use super::roles::Role;

/// Requirement attached to a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Allowed unconditionally.
    Public,
    /// Allowed iff a principal is attached.
    Authenticated,
    /// Allowed iff the attached principal holds the role.
    Role(Role),
}

/// Path pattern: exact, or a `/**` suffix matching the prefix itself and
/// anything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RoutePattern {
    Exact(String),
    Subtree(String),
}

impl RoutePattern {
    fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(prefix) => RoutePattern::Subtree(prefix.to_string()),
            None => RoutePattern::Exact(pattern.to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(exact) => path == exact,
            RoutePattern::Subtree(prefix) => {
                path == prefix || (path.starts_with(prefix) && path[prefix.len()..].starts_with('/'))
            }
        }
    }
}

/// Ordered route policy table. First match wins; no match denies.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    rules: Vec<(RoutePattern, Access)>,
}

impl RoutePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Order is significant: earlier rules shadow later ones.
    pub fn allow(mut self, pattern: &str, access: Access) -> Self {
        self.rules.push((RoutePattern::parse(pattern), access));
        self
    }

    /// The service's standard table: configured public patterns first, then
    /// the admin subtree, then the rest of the API for any authenticated
    /// principal. Everything else falls through to the default deny.
    pub fn standard(public_patterns: &[String]) -> Self {
        let mut policy = Self::new();
        for pattern in public_patterns {
            policy = policy.allow(pattern, Access::Public);
        }
        policy
            .allow("/api/admin/**", Access::Role(Role::Admin))
            .allow("/api/**", Access::Authenticated)
    }

    /// Requirement for a path, if any rule matches.
    pub fn classify(&self, path: &str) -> Option<Access> {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map(|(_, access)| *access)
    }

    /// Decide whether a request may proceed.
    pub fn authorize(
        &self,
        path: &str,
        principal: Option<&AuthenticatedPrincipal>,
    ) -> Result<(), AuthError> {
        match self.classify(path) {
            Some(Access::Public) => Ok(()),
            Some(Access::Authenticated) => match principal {
                Some(_) => Ok(()),
                None => Err(AuthError::Unauthenticated),
            },
            Some(Access::Role(role)) => match principal {
                Some(principal) if principal.has_role(role) => Ok(()),
                Some(_) => Err(AuthError::Forbidden),
                None => Err(AuthError::Unauthenticated),
            },
            // Unlisted paths are denied, not silently exposed.
            None => match principal {
                Some(_) => Err(AuthError::Forbidden),
                None => Err(AuthError::Unauthenticated),
            },
        }
    }
}

/// Authorization gate middleware.
///
/// Runs after the authentication middleware and before any handler. The
/// rejection decision is made here, never in the authenticator, so a bad
/// token on a public route costs nothing.
pub async fn enforce(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path();
    let principal = req.extensions().get::<AuthenticatedPrincipal>();

    match state.policy.authorize(path, principal) {
        Ok(()) => Ok(next.run(req).await),
        Err(denied) => {
            warn!(
                path,
                subject = principal.map(|p| p.subject.as_str()).unwrap_or("<anonymous>"),
                %denied,
                "request denied"
            );
            Err(ApiError::Auth(denied))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: Vec<Role>) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal {
            subject: "jlopez".to_string(),
            roles,
        }
    }

    fn policy() -> RoutePolicy {
        RoutePolicy::standard(&["/api/auth/**".to_string(), "/health/**".to_string()])
    }

    #[test]
    fn subtree_pattern_matches_prefix_and_descendants() {
        let pattern = RoutePattern::parse("/api/auth/**");
        assert!(pattern.matches("/api/auth"));
        assert!(pattern.matches("/api/auth/login"));
        assert!(pattern.matches("/api/auth/login/extra"));
        assert!(!pattern.matches("/api/authx"));
        assert!(!pattern.matches("/api"));
    }

    #[test]
    fn exact_pattern_matches_only_itself() {
        let pattern = RoutePattern::parse("/health");
        assert!(pattern.matches("/health"));
        assert!(!pattern.matches("/health/live"));
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = RoutePolicy::new()
            .allow("/api/reports/public/**", Access::Public)
            .allow("/api/reports/**", Access::Role(Role::Admin));

        assert_eq!(
            policy.classify("/api/reports/public/daily"),
            Some(Access::Public)
        );
        assert_eq!(
            policy.classify("/api/reports/revenue"),
            Some(Access::Role(Role::Admin))
        );
    }

    #[test]
    fn public_route_allows_anonymous() {
        assert!(policy().authorize("/api/auth/login", None).is_ok());
        assert!(policy().authorize("/health", None).is_ok());
    }

    #[test]
    fn protected_route_requires_principal() {
        assert_eq!(
            policy().authorize("/api/pets", None),
            Err(AuthError::Unauthenticated)
        );
        assert!(policy()
            .authorize("/api/pets", Some(&principal(vec![Role::Client])))
            .is_ok());
    }

    #[test]
    fn role_route_requires_the_role() {
        let policy = policy();
        assert_eq!(
            policy.authorize("/api/admin/users", Some(&principal(vec![Role::Client]))),
            Err(AuthError::Forbidden)
        );
        assert!(policy
            .authorize("/api/admin/users", Some(&principal(vec![Role::Admin])))
            .is_ok());
        assert_eq!(
            policy.authorize("/api/admin/users", None),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn unlisted_path_is_denied() {
        let policy = policy();
        assert_eq!(
            policy.authorize("/internal/metrics", None),
            Err(AuthError::Unauthenticated)
        );
        assert_eq!(
            policy.authorize("/internal/metrics", Some(&principal(vec![Role::Admin]))),
            Err(AuthError::Forbidden)
        );
    }
}
