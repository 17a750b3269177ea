//! # Registration Tests

use crate::handlers::test_support::*;
use axum::http::StatusCode;
use lib_core::model::store::UserRepository;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    // Arrange
    let pool = setup_test_db().await;
    let app = test_app(pool.clone(), test_config());

    // Act
    let (status, body) = register(&app, "A", "a@x.com", "secret123").await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "msg": "User registered successfully" }));
    assert!(body.get("token").is_none());

    let user = UserRepository::find_by_email(&pool, "a@x.com")
        .await
        .unwrap()
        .expect("User should be stored");
    assert_eq!(user.name, "A");
}

#[tokio::test]
async fn test_register_never_stores_plaintext() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone(), test_config());

    register(&app, "A", "a@x.com", "secret123").await;

    let user = UserRepository::find_by_email(&pool, "a@x.com").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "secret123");
    assert!(!user.password_hash.contains("secret123"));
    assert!(lib_auth::verify_password("secret123", &user.password_hash).unwrap());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone(), test_config());

    let (first, _) = register(&app, "A", "a@x.com", "secret123").await;
    let (second, body) = register(&app, "Other", "a@x.com", "different").await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "User already exists" }));
    assert_eq!(UserRepository::list_all(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_email_match_is_case_sensitive() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone(), test_config());

    register(&app, "A", "a@x.com", "secret123").await;
    let (status, _) = register(&app, "A2", "A@x.com", "secret123").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(UserRepository::list_all(&pool).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_register_rejects_malformed_input() {
    let app = test_app(setup_test_db().await, test_config());

    let (blank_name, _) = register(&app, "  ", "a@x.com", "secret123").await;
    let (bad_email, body) = register(&app, "A", "not-an-email", "secret123").await;
    let (no_password, _) = register(&app, "A", "a@x.com", "").await;

    assert_eq!(blank_name, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "msg": "Invalid email format" }));
    assert_eq!(no_password, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_works_without_signing_secret() {
    let mut config = test_config();
    config.jwt_secret = None;
    let app = test_app(setup_test_db().await, config);

    let (status, _) = register(&app, "A", "a@x.com", "secret123").await;

    assert_eq!(status, StatusCode::CREATED);
}
