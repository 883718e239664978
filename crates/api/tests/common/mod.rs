//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) on top of a `#[sqlx::test]`-provisioned pool and provides
//! small request/response helpers around `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use quizhub_api::auth::jwt::{generate_access_token, JwtConfig};
use quizhub_api::config::ServerConfig;
use quizhub_api::router::build_app_router;
use quizhub_api::state::AppState;
use quizhub_core::types::DbId;
use quizhub_db::models::user::{CreateUser, User};
use quizhub_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        redis_url: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. The answer log is disabled in tests.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        answer_log: None,
    };
    build_app_router(state, &config)
}

/// Create a user directly in the database and return it with a valid
/// access token.
pub async fn create_user_with_token(pool: &PgPool, email: &str) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            first_name: None,
            last_name: None,
            email: email.to_string(),
            password_hash: None,
        },
    )
    .await
    .expect("user creation should succeed");

    let token = token_for(user.id);
    (user, token)
}

/// Generate an access token for an arbitrary user id with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Perform an unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

/// Perform a GET with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

/// Perform an unauthenticated POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

/// Perform a POST with a Bearer token and a JSON body.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

/// Perform a bodyless POST with a Bearer token.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), None).await
}

/// Perform a PUT with a Bearer token and a JSON body.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

/// Perform a DELETE with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should succeed")
}
