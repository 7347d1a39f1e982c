// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and is
//! immutable afterwards. Invalid security-relevant values are fatal: the
//! process refuses to start rather than fall back to a default signing key
//! or a nonsensical token lifetime.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Token signing secret | Required, non-empty |
//! | `JWT_TTL_MS` | Token lifetime in milliseconds | `3600000` (1 hour) |
//! | `PUBLIC_ROUTES` | Comma-separated public route patterns | see below |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SEED_ADMIN_USER` | Username seeded into the in-memory directory | Optional |
//! | `SEED_ADMIN_PASSWORD` | Password for the seeded user | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use thiserror::Error;

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token lifetime (milliseconds).
pub const JWT_TTL_MS_ENV: &str = "JWT_TTL_MS";

/// Environment variable name for the public route patterns.
pub const PUBLIC_ROUTES_ENV: &str = "PUBLIC_ROUTES";

/// Environment variable name for the bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable names for the optional seeded admin account.
pub const SEED_ADMIN_USER_ENV: &str = "SEED_ADMIN_USER";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default token lifetime: one hour.
pub const DEFAULT_TTL_MS: i64 = 3_600_000;

/// Routes reachable without a credential when `PUBLIC_ROUTES` is unset.
/// Login, health probes, and the API documentation. A `/**` pattern also
/// matches its bare prefix, so `/health/**` covers `/health` itself.
pub const DEFAULT_PUBLIC_ROUTES: &[&str] =
    &["/api/auth/**", "/health/**", "/docs/**", "/api-docs/**"];

/// Configuration failure. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{JWT_SECRET_ENV} must be set to a non-empty secret")]
    MissingSecret,
    #[error("{JWT_TTL_MS_ENV} must be a positive integer of milliseconds, got {0:?}")]
    InvalidTtl(String),
    #[error("{PORT_ENV} is not a valid port: {0:?}")]
    InvalidPort(String),
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_ttl_ms: i64,
    pub public_routes: Vec<String>,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup(JWT_SECRET_ENV).unwrap_or_default();
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let jwt_ttl_ms = match lookup(JWT_TTL_MS_ENV) {
            None => DEFAULT_TTL_MS,
            Some(raw) => match raw.parse::<i64>() {
                Ok(ms) if ms > 0 => ms,
                _ => return Err(ConfigError::InvalidTtl(raw)),
            },
        };

        let public_routes = match lookup(PUBLIC_ROUTES_ENV) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_PUBLIC_ROUTES.iter().map(|p| p.to_string()).collect(),
        };

        let host = lookup(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup(PORT_ENV) {
            None => 8080,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
        };

        Ok(Self {
            jwt_secret,
            jwt_ttl_ms,
            public_routes,
            host,
            port,
        })
    }
}
