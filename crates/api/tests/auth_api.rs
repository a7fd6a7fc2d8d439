//! HTTP-level integration tests for registration, login, and the bearer
//! token lifecycle: header parsing, expiry, and last-token-wins.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get, get_auth, get_raw_auth, post_json, register};
use sqlx::PgPool;
use todohub_api::auth::token::{validate_token, TokenError};
use todohub_db::repositories::{TokenRepo, UserRepo};

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registering returns a token that immediately authenticates requests.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_working_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let token = register(app.clone(), "alice", "s3cret-pass").await;

    let response = get_auth(app, "/todos", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The token resolves to the row that registration created.
    let alice = UserRepo::find_by_name(&pool, "alice")
        .await
        .unwrap()
        .expect("alice must exist");
    let user_id = validate_token(&pool, &token)
        .await
        .expect("token must validate");
    assert_eq!(user_id, alice.id);
}

/// A duplicate name is rejected with 409 and a generic conflict body.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_registration_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    register(app.clone(), "alice", "s3cret-pass").await;

    let body = serde_json::json!({ "name": "alice", "password": "other-pass" });
    let response = post_json(app, "/users", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

/// Missing or empty fields are a 400, not a deserialization error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_registration_requires_both_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    for body in [
        serde_json::json!({ "name": "alice" }),
        serde_json::json!({ "password": "s3cret-pass" }),
        serde_json::json!({ "name": "", "password": "s3cret-pass" }),
        serde_json::json!({}),
    ] {
        let response = post_json(app.clone(), "/users", body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {body} must be rejected"
        );
    }
}

/// GET /users lists id and name only -- no hash material.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_exposes_no_secrets(pool: PgPool) {
    let app = common::build_test_app(pool);

    register(app.clone(), "alice", "s3cret-pass").await;
    register(app.clone(), "bob", "s3cret-pass").await;

    let response = get(app, "/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let users = json.as_array().expect("response must be an array");
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user["id"].is_i64());
        assert!(user["name"].is_string());
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password_hash").is_none());
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Register-then-login with the same credentials always succeeds and the
/// new token validates to the same user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    register(app.clone(), "alice", "s3cret-pass").await;

    let body = serde_json::json!({ "name": "alice", "password": "s3cret-pass" });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["token"].as_str().expect("login must return a token");

    let alice = UserRepo::find_by_name(&pool, "alice").await.unwrap().unwrap();
    let user_id = validate_token(&pool, token).await.expect("token must validate");
    assert_eq!(user_id, alice.id);
}

/// Wrong password and unknown user both return the same generic 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let app = common::build_test_app(pool);

    register(app.clone(), "alice", "s3cret-pass").await;

    let wrong_password = post_json(
        app.clone(),
        "/login",
        serde_json::json!({ "name": "alice", "password": "wrong" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = body_json(wrong_password).await;

    let unknown_user = post_json(
        app,
        "/login",
        serde_json::json!({ "name": "ghost", "password": "whatever" }),
    )
    .await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body = body_json(unknown_user).await;

    assert_eq!(
        wrong_password_body, unknown_user_body,
        "failure bodies must not reveal whether the user exists"
    );
}

/// Logging in twice issues two distinct tokens and only the latest works.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_last_token_wins(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = register(app.clone(), "alice", "s3cret-pass").await;

    let response = post_json(
        app.clone(),
        "/login",
        serde_json::json!({ "name": "alice", "password": "s3cret-pass" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    assert_ne!(first, second, "each login must issue a fresh token");

    let stale = get_auth(app.clone(), "/todos", &first).await;
    assert_eq!(
        stale.status(),
        StatusCode::UNAUTHORIZED,
        "the overwritten token must stop authenticating"
    );

    let live = get_auth(app, "/todos", &second).await;
    assert_eq!(live.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Bearer header and token lifecycle
// ---------------------------------------------------------------------------

/// Anything but the exact `Bearer <value>` shape is a 400, before any
/// token lookup.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_authorization_header_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    for header in ["Basic abc", "Bearer", "Bearer a b", "bearer abc", "abc"] {
        let response = get_raw_auth(app.clone(), "/todos", header).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "header {header:?} must be a 400"
        );
    }

    // Missing header is malformed too, not a 401.
    let response = get(app, "/todos").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A token nobody issued is a 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/todos", "deadbeef".repeat(8).as_str()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An expired token fails as expired -- distinct from unknown -- and is a
/// 401 at the HTTP boundary.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_expired_token_is_rejected_as_expired(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    register(app.clone(), "alice", "s3cret-pass").await;
    let alice = UserRepo::find_by_name(&pool, "alice").await.unwrap().unwrap();

    // Overwrite alice's token with one that expired a minute ago.
    let stale_value = "a".repeat(64);
    TokenRepo::upsert(
        &pool,
        alice.id,
        &stale_value,
        Utc::now() - Duration::minutes(1),
    )
    .await
    .expect("upsert should succeed");

    let result = validate_token(&pool, &stale_value).await;
    assert!(
        matches!(result, Err(TokenError::Expired)),
        "a known-but-stale token must fail as Expired, not Invalid"
    );

    let response = get_auth(app, "/todos", &stale_value).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
