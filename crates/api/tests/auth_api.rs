//! HTTP-level integration tests for registration, login, and the
//! authentication extractor.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use sqlx::PgPool;

/// Successful registration returns 201 with a token and the user record.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "password": "difference-engine"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert!(json["user"].get("password_hash").is_none());
}

/// Registering an email twice returns 409 Conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "dup@example.com", "password": "long-enough-pw" });
    let first = post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

/// A too-short password is rejected before any write.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_short_password_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "email": "short@example.com", "password": "short" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "no user row may be written");
}

/// Login returns a token for correct credentials and 401 otherwise.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);

    let register = serde_json::json!({ "email": "bob@example.com", "password": "hunter2hunter2" });
    post_json(app.clone(), "/api/v1/auth/register", register).await;

    let good = serde_json::json!({ "email": "bob@example.com", "password": "hunter2hunter2" });
    let response = post_json(app.clone(), "/api/v1/auth/login", good).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());

    let bad = serde_json::json!({ "email": "bob@example.com", "password": "wrong-password" });
    let response = post_json(app, "/api/v1/auth/login", bad).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// `/auth/me` echoes the resolved user; missing or garbage tokens are 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_requires_valid_token(pool: PgPool) {
    let (user, token) = common::create_user_with_token(&pool, "me@example.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["email"], "me@example.com");

    let response = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
