//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] returned by
//! services and handlers, and its mapping onto HTTP responses.
//!
//! ## Error Categories
//!
//! 1. **Validation failures** (400) - user-correctable input problems
//!    - [`Validation`](AppError::Validation), [`DuplicateAccount`](AppError::DuplicateAccount)
//!    - [`InvalidCredentials`](AppError::InvalidCredentials): one message for
//!      "no such user" and "wrong password" alike
//!
//! 2. **Auth failures** (401)
//!    - [`Unauthorized`](AppError::Unauthorized): carries no reason at all, so
//!      a missing, malformed, forged or expired token all look the same
//!
//! 3. **Missing resources** (404) - [`NotFound`](AppError::NotFound)
//!
//! 4. **Server errors** (500)
//!    - [`Config`](AppError::Config) - operator must fix configuration
//!    - [`Store`](AppError::Store) - the user store failed; not retried here
//!    - [`Internal`](AppError::Internal)
//!
//! Every response body has the shape `{"msg": "..."}`. Server-side detail is
//! logged, never sent.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration with an email that is already on file.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Account already exists")]
    DuplicateAccount,

    /// Unknown email or wrong password.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired bearer token.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested resource not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error, e.g. no signing secret.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// User store unreachable or erroring.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Store error: {0}")]
    Store(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DuplicateAccount | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message sent to the client.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::DuplicateAccount => "User already exists".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Config(_) => "Server configuration error".to_string(),
            AppError::Store(_) | AppError::Internal(_) => "Server error".to_string(),
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({ "msg": self.user_message() }));

        (status, body).into_response()
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                AppError::Store(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Store(format!("Database error: {}", err)),
        }
    }
}

/// Convert `lib_auth::Error` to `AppError`.
impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        match err {
            lib_auth::Error::MissingSigningSecret => AppError::Config(err.to_string()),
            lib_auth::Error::HashingFailure(_) | lib_auth::Error::TokenEncode(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}
