//! # Login Tests

use crate::handlers::test_support::*;
use axum::http::{Method, StatusCode};
use chrono::Utc;
use lib_auth::TokenVerifier;
use serde_json::json;

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let app = test_app(setup_test_db().await, test_config());
    register(&app, "A", "a@x.com", "secret123").await;

    // Act
    let (status, body) = login(&app, "a@x.com", "secret123").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "A");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().expect("token should be a string");
    let claims = TokenVerifier::new(Some(TEST_SECRET))
        .verify(token, Utc::now())
        .expect("issued token should verify");
    assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_alike() {
    let app = test_app(setup_test_db().await, test_config());
    register(&app, "A", "a@x.com", "secret123").await;

    let wrong_password = json!({ "email": "a@x.com", "password": "wrong" });
    let unknown_email = json!({ "email": "nobody@x.com", "password": "secret123" });

    let (status_a, body_a) = send_raw(
        &app,
        json_request(Method::POST, "/api/auth/login", None, Some(wrong_password)),
    )
    .await;
    let (status_b, body_b) = send_raw(
        &app,
        json_request(Method::POST, "/api/auth/login", None, Some(unknown_email)),
    )
    .await;

    assert_eq!(status_a, StatusCode::BAD_REQUEST);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);
    assert_eq!(&body_a[..], br#"{"msg":"Invalid credentials"}"#);
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let app = test_app(setup_test_db().await, test_config());
    register(&app, "A", "a@x.com", "secret123").await;

    let (status, body) = login(&app, "A@X.COM", "secret123").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "Invalid credentials" }));
}

#[tokio::test]
async fn test_login_without_signing_secret() {
    let pool = setup_test_db().await;
    let mut config = test_config();
    config.jwt_secret = None;
    let app = test_app(pool, config);
    register(&app, "A", "a@x.com", "secret123").await;

    let (status, body) = login(&app, "a@x.com", "secret123").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "msg": "Server configuration error" }));
}

#[tokio::test]
async fn test_each_login_issues_a_working_token() {
    let app = test_app(setup_test_db().await, test_config());
    register(&app, "A", "a@x.com", "secret123").await;

    for _ in 0..2 {
        let (_, body) = login(&app, "a@x.com", "secret123").await;
        let token = body["token"].as_str().unwrap();

        let (status, _) = send(
            &app,
            json_request(Method::GET, "/api/user/profile", Some(token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
