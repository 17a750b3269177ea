//! # Authentication Handlers
//!
//! Public endpoints: account registration and login.
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{login, register};
//!
//! let app = Router::new()
//!     .route("/api/auth/register", post(register))
//!     .route("/api/auth/login", post(login))
//!     .with_state(state);
//! ```

use crate::services::AccountService;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use lib_auth::TokenIssuer;
use lib_core::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use lib_core::{DbPool, Result};
use lib_utils::now_utc;
use std::sync::Arc;
use tracing::info;

/// Register handler - creates a new account.
///
/// * `201 {"msg": "User registered successfully"}`
/// * `400 {"msg": "User already exists"}` for an email already on file
/// * `400` for blank name/password or a malformed email
/// * `500 {"msg": "Server error"}` when the store fails
pub async fn register(
    State(pool): State<DbPool>,
    State(issuer): State<Arc<TokenIssuer>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    info!("[REGISTER] New registration request");

    AccountService::new(pool, issuer).register(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Login handler - exchanges email and password for a bearer token.
///
/// * `200 {"token": ..., "user": {"id", "name", "email"}}`
/// * `400 {"msg": "Invalid credentials"}` for an unknown email or a wrong
///   password alike
/// * `500 {"msg": "Server configuration error"}` when no signing secret is set
pub async fn login(
    State(pool): State<DbPool>,
    State(issuer): State<Arc<TokenIssuer>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    info!("[LOGIN] Login attempt");

    let res = AccountService::new(pool, issuer)
        .login(&req, now_utc())
        .await?;

    Ok(Json(res))
}

#[cfg(test)]
mod tests;
