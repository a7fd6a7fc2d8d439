//! Shared harness for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on top
//! of a test database pool and provides small request/response helpers
//! around `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use todohub_api::auth::token::TokenConfig;
use todohub_api::config::ServerConfig;
use todohub_api::router::build_app_router;
use todohub_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        token: TokenConfig { ttl_mins: 5 },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should not fail")
}

fn json_request(
    method: Method,
    uri: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request must build")
}

/// GET without authentication.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request must build");
    send(app, request).await
}

/// GET with a bearer token.
#[allow(dead_code)]
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request must build");
    send(app, request).await
}

/// GET with a raw `Authorization` header value, for malformed-header tests.
#[allow(dead_code)]
pub async fn get_raw_auth(app: Router, uri: &str, header_value: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, header_value)
        .body(Body::empty())
        .expect("request must build");
    send(app, request).await
}

/// POST a JSON body without authentication.
#[allow(dead_code)]
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

/// POST a JSON body with a bearer token.
#[allow(dead_code)]
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

/// PATCH a JSON body with a bearer token.
#[allow(dead_code)]
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::PATCH, uri, &body, Some(token))).await
}

/// DELETE with a bearer token and no body.
#[allow(dead_code)]
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request must build");
    send(app, request).await
}

/// DELETE with a JSON body and a bearer token.
#[allow(dead_code)]
pub async fn delete_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::DELETE, uri, &body, Some(token))).await
}

/// Collect a response body and parse it as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Register a user through the API and return their bearer token.
#[allow(dead_code)]
pub async fn register(app: Router, name: &str, password: &str) -> String {
    let body = serde_json::json!({ "name": name, "password": password });
    let response = post_json(app, "/users", body).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "registration of {name} should succeed"
    );
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("registration must return a token")
        .to_string()
}

/// Create a todo through the API and return its id.
#[allow(dead_code)]
pub async fn create_todo(app: Router, token: &str, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title, "text": format!("{title} body") });
    let response = post_json_auth(app, "/todos", body, token).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "todo creation should succeed"
    );
    let json = body_json(response).await;
    json["id"].as_i64().expect("todo must have an id")
}
