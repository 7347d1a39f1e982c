// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vetclinic_server::api::router;
use vetclinic_server::auth::identity::InMemoryDirectory;
use vetclinic_server::auth::keys::SigningKeys;
use vetclinic_server::auth::policy::RoutePolicy;
use vetclinic_server::auth::roles::Role;
use vetclinic_server::auth::token::TokenCodec;
use vetclinic_server::config::{
    Config, LOG_FORMAT_ENV, SEED_ADMIN_PASSWORD_ENV, SEED_ADMIN_USER_ENV,
};
use vetclinic_server::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    // Configuration is validated up front; a missing or empty signing
    // secret must never degrade into a default key.
    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("invalid configuration: {err}");
        std::process::exit(1);
    });

    let keys = SigningKeys::from_secret(&config.jwt_secret)
        .expect("signing secret already validated by Config");
    let codec = TokenCodec::new(keys, Duration::milliseconds(config.jwt_ttl_ms))
        .expect("token lifetime already validated by Config");

    let mut directory = InMemoryDirectory::new();
    if let (Ok(user), Ok(password)) = (
        env::var(SEED_ADMIN_USER_ENV),
        env::var(SEED_ADMIN_PASSWORD_ENV),
    ) {
        directory.insert_user(&user, &password, vec![Role::Admin]);
        info!(user = %user, "seeded admin account");
    }
    if directory.is_empty() {
        info!("directory is empty; only public routes will be reachable");
    }
    let directory = Arc::new(directory);

    let state = AppState::new(
        codec,
        RoutePolicy::standard(&config.public_routes),
        directory.clone(),
        directory,
    );
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    info!(%addr, "vetclinic server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    match env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutdown signal received");
}
