// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - Full access, including staff management
/// - `Veterinarian` - Clinical operations (consultations, treatments)
/// - `Secretary` - Front-desk operations (appointments, client records)
/// - `Client` - Pet owner, can only access own data
///
/// Inside a token the roles travel as a single comma-joined claim
/// (`"ADMIN,VETERINARIAN"`); the uppercase spellings are the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Clinical staff
    Veterinarian,
    /// Front-desk staff
    Secretary,
    /// Pet owner
    Client,
}

impl Role {
    /// Parse a role from its claim spelling (case-insensitive).
    pub fn from_str(s: &str) -> Option<Role> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "VETERINARIAN" => Some(Role::Veterinarian),
            "SECRETARY" => Some(Role::Secretary),
            "CLIENT" => Some(Role::Client),
            _ => None,
        }
    }

    /// The spelling used in the token's `roles` claim.
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Veterinarian => "VETERINARIAN",
            Role::Secretary => "SECRETARY",
            Role::Client => "CLIENT",
        }
    }

    /// Join a role set into the comma-separated claim value.
    pub fn join_claim(roles: &[Role]) -> String {
        roles
            .iter()
            .map(Role::as_claim)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse a comma-separated claim value back into a role set.
    ///
    /// Unknown spellings grant nothing and are skipped.
    pub fn parse_claim(claim: &str) -> Vec<Role> {
        claim.split(',').filter_map(Role::from_str).collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_claim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_case_insensitively() {
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str("Veterinarian"), Some(Role::Veterinarian));
        assert_eq!(Role::from_str(" secretary "), Some(Role::Secretary));
        assert_eq!(Role::from_str("unknown"), None);
    }

    #[test]
    fn claim_round_trips() {
        let roles = vec![Role::Admin, Role::Veterinarian];
        let claim = Role::join_claim(&roles);
        assert_eq!(claim, "ADMIN,VETERINARIAN");
        assert_eq!(Role::parse_claim(&claim), roles);
    }

    #[test]
    fn parse_claim_skips_unknown_spellings() {
        assert_eq!(
            Role::parse_claim("CLIENT,SUPERUSER,,SECRETARY"),
            vec![Role::Client, Role::Secretary]
        );
    }

    #[test]
    fn empty_claim_yields_no_roles() {
        assert!(Role::parse_claim("").is_empty());
    }
}
