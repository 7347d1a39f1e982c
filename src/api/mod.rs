// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP API: routes, layer stack, and OpenAPI doc.
//!
//! Layer order matters. Outermost to innermost: CORS, request-id, trace,
//! failure translation, authentication, authorization gate, handlers. The
//! authenticator only attaches a principal; the gate is the single place a
//! request is rejected, and the translator is the single place a failure
//! becomes a payload.

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::middleware::authenticate;
use crate::auth::policy::enforce;
use crate::auth::roles::Role;
use crate::error::{translate_failures, ErrorResponse};
use crate::models::{
    HealthResponse, InspectTokenRequest, LoginRequest, PrincipalResponse, TokenInspection,
    TokenResponse,
};
use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/users/me", get(users::me))
        .route("/api/admin/tokens/inspect", post(admin::inspect_token))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state.clone());

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(translate_failures))
                .layer(middleware::from_fn_with_state(state.clone(), authenticate))
                .layer(middleware::from_fn_with_state(state, enforce)),
        )
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        users::me,
        admin::inspect_token,
        health::health,
        health::liveness
    ),
    components(schemas(
        LoginRequest,
        TokenResponse,
        PrincipalResponse,
        InspectTokenRequest,
        TokenInspection,
        HealthResponse,
        ErrorResponse,
        Role
    )),
    tags(
        (name = "Auth", description = "Login and token issuance"),
        (name = "Users", description = "Authenticated user info"),
        (name = "Admin", description = "Administrative tooling"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use crate::auth::identity::{Identity, InMemoryDirectory};
    use crate::auth::keys::SigningKeys;
    use crate::auth::policy::RoutePolicy;
    use crate::auth::token::TokenCodec;
    use crate::config::DEFAULT_PUBLIC_ROUTES;

    use super::*;

    fn test_state() -> AppState {
        let mut directory = InMemoryDirectory::new();
        directory.insert_user("admin", "admin-pw", vec![Role::Admin]);
        directory.insert_user("mvargas", "vet-pw", vec![Role::Veterinarian]);
        directory.insert_user("cromero", "client-pw", vec![Role::Client]);
        let directory = Arc::new(directory);

        let codec = TokenCodec::new(
            SigningKeys::from_secret("api-test-secret-0123456789").unwrap(),
            Duration::hours(1),
        )
        .unwrap();

        let public: Vec<String> = DEFAULT_PUBLIC_ROUTES.iter().map(|p| p.to_string()).collect();

        AppState::new(
            codec,
            RoutePolicy::standard(&public),
            directory.clone(),
            directory,
        )
    }

    fn app() -> (Router, AppState) {
        let state = test_state();
        (router(state.clone()), state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn login(username: &str, password: &str) -> String {
        let (app, _) = app();
        let (status, body) = send(
            app,
            post_json(
                "/api/auth/login",
                None,
                serde_json::json!({"username": username, "password": password}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["accessToken"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _) = app();
        let (status, body) = send(app, get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn login_issues_a_bearer_token() {
        let (app, _) = app();
        let (status, body) = send(
            app,
            post_json(
                "/api/auth/login",
                None,
                serde_json::json!({"username": "mvargas", "password": "vet-pw"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["expiresInMs"], 3_600_000);
        assert!(!body["accessToken"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_with_blank_fields_returns_the_field_map() {
        let (app, _) = app();
        let (status, body) = send(
            app,
            post_json(
                "/api/auth/login",
                None,
                serde_json::json!({"username": " ", "password": ""}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation Failed");
        assert_eq!(body["path"], "/api/auth/login");
        assert_eq!(body["validationErrors"]["username"], "must not be blank");
        assert_eq!(body["validationErrors"]["password"], "must not be blank");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_401() {
        let (app, _) = app();
        let (status, body) = send(
            app,
            post_json(
                "/api/auth/login",
                None,
                serde_json::json!({"username": "mvargas", "password": "wrong"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
        assert_eq!(body["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn protected_route_without_token_is_401_with_path() {
        let (app, _) = app();
        let (status, body) = send(app, get_request("/api/users/me", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
        assert_eq!(body["path"], "/api/users/me");
    }

    #[tokio::test]
    async fn valid_token_reaches_the_protected_handler() {
        let token = login("mvargas", "vet-pw").await;
        let (app, _) = app();
        let (status, body) = send(app, get_request("/api/users/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subject"], "mvargas");
        assert_eq!(body["roles"], serde_json::json!(["VETERINARIAN"]));
    }

    #[tokio::test]
    async fn tampered_token_is_rejected_without_detail() {
        let mut token = login("mvargas", "vet-pw").await;
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        let (app, _) = app();
        let (status, body) = send(app, get_request("/api/users/me", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        // The caller sees the generic requirement, not why the token failed.
        assert_eq!(
            body["message"],
            "Authentication is required to access this resource"
        );
    }

    #[tokio::test]
    async fn expired_token_downgrades_to_anonymous() {
        let (app, state) = app();
        let stale = state
            .codec
            .issue(
                &Identity {
                    subject: "mvargas".to_string(),
                    roles: vec![Role::Veterinarian],
                },
                Utc::now() - Duration::hours(2),
            )
            .unwrap();

        let (status, body) = send(app, get_request("/api/users/me", Some(&stale))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn admin_route_rejects_non_admin_with_403() {
        let token = login("cromero", "client-pw").await;
        let (app, _) = app();
        let (status, body) = send(
            app,
            post_json(
                "/api/admin/tokens/inspect",
                Some(&token),
                serde_json::json!({"token": "whatever"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden");
        assert_eq!(body["path"], "/api/admin/tokens/inspect");
    }

    #[tokio::test]
    async fn admin_inspects_a_valid_token() {
        let admin_token = login("admin", "admin-pw").await;
        let subject_token = login("cromero", "client-pw").await;

        let (app, _) = app();
        let (status, body) = send(
            app,
            post_json(
                "/api/admin/tokens/inspect",
                Some(&admin_token),
                serde_json::json!({"token": subject_token}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subject"], "cromero");
        assert_eq!(body["roles"], serde_json::json!(["CLIENT"]));
        assert!(body["expiresAt"].as_i64().unwrap() > body["issuedAt"].as_i64().unwrap());
    }

    #[tokio::test]
    async fn admin_inspection_surfaces_the_specific_failure() {
        let admin_token = login("admin", "admin-pw").await;
        let (app, state) = app();
        let expired = state
            .codec
            .issue(
                &Identity {
                    subject: "cromero".to_string(),
                    roles: vec![Role::Client],
                },
                Utc::now() - Duration::hours(2),
            )
            .unwrap();

        let (status, body) = send(
            app,
            post_json(
                "/api/admin/tokens/inspect",
                Some(&admin_token),
                serde_json::json!({"token": expired}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token has expired");
    }

    #[tokio::test]
    async fn unlisted_route_fails_closed() {
        let (anon_app, _) = app();
        let (status, body) = send(anon_app, get_request("/internal/metrics", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["path"], "/internal/metrics");

        let token = login("cromero", "client-pw").await;
        let (app, _) = app();
        let (status, _) = send(app, get_request("/internal/metrics", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (app, _) = app();
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
