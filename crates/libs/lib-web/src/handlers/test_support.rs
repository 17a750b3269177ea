//! Shared helpers for router-level tests: an in-memory store, a real router,
//! and shortcuts for the register/login dance.

use crate::server::{create_router, AppState};
use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use lib_core::{migrate, Config, DbPool};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// In-memory database with the schema applied.
pub async fn setup_test_db() -> DbPool {
    // One connection that never idles out: every `:memory:` connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate(&pool).await.expect("Failed to run migrations");

    pool
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: Some(TEST_SECRET.to_string()),
    }
}

/// The production router over `pool`.
pub fn test_app(pool: DbPool, config: Config) -> Router {
    create_router(AppState::new(pool, &config), &[])
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send_raw(app, req).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    let body = json!({ "name": name, "email": email, "password": password });
    send(app, json_request(Method::POST, "/api/auth/register", None, Some(body))).await
}

pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let body = json!({ "email": email, "password": password });
    send(app, json_request(Method::POST, "/api/auth/login", None, Some(body))).await
}

/// Register a user and return a fresh token for them.
pub async fn signed_in(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = register(app, name, email, "secret123").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(app, email, "secret123").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}
