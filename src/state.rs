// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::identity::{CredentialStore, IdentityLoader};
use crate::auth::policy::RoutePolicy;
use crate::auth::token::TokenCodec;

/// Shared application state.
///
/// Everything in here is immutable after startup and read concurrently
/// without locking; per-request state lives in the request's extensions.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub policy: Arc<RoutePolicy>,
    pub identities: Arc<dyn IdentityLoader>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(
        codec: TokenCodec,
        policy: RoutePolicy,
        identities: Arc<dyn IdentityLoader>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            codec: Arc::new(codec),
            policy: Arc::new(policy),
            identities,
            credentials,
        }
    }
}
