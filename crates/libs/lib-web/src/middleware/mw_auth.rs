//! # Authorization Gate
//!
//! Turns the `Authorization: Bearer <token>` header of a request into an
//! authenticated [`Ctx`], or rejects the request.
//!
//! ```text
//! Unauthenticated ──header ok, token verifies──▶ Authenticated (Ctx in extensions)
//!        │
//!        └──no header / no token segment / token fails──▶ Rejected (401)
//! ```
//!
//! The three rejection reasons are logged but never returned: every rejection
//! is the same `401 {"msg":"Unauthorized"}`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use lib_web::middleware::require_auth;
//!
//! let protected = Router::new()
//!     .route("/profile", get(get_profile))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers then take the identity as `Extension<Ctx>`:
//!
//! ```rust,ignore
//! async fn get_profile(Extension(ctx): Extension<Ctx>) -> String {
//!     format!("Hello, user {}!", ctx.subject())
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use lib_auth::{TokenError, TokenVerifier};
use lib_core::{AppError, Ctx};
use lib_utils::now_utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Internal reason a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("no token provided")]
    NoTokenProvided,
    #[error("token missing")]
    TokenMissing,
    #[error("invalid token: {0}")]
    InvalidToken(TokenError),
}

/// Run the gate against request headers at instant `now`.
///
/// The credential is the second space-separated segment of the header value.
pub fn authorize(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
    now: DateTime<Utc>,
) -> Result<Ctx, GateRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(GateRejection::NoTokenProvided)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.split(' ').nth(1))
        .filter(|token| !token.is_empty())
        .ok_or(GateRejection::TokenMissing)?;

    let claims = verifier
        .verify(token, now)
        .map_err(GateRejection::InvalidToken)?;

    Ok(Ctx::new(claims.sub))
}

/// Authentication middleware.
///
/// - **Valid token**: continues with `Ctx` in the request extensions
/// - **Anything else**: `401 Unauthorized`, reason logged at `warn`
pub async fn require_auth(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = authorize(req.headers(), &verifier, now_utc()).map_err(|rejection| {
        warn!(reason = %rejection, "[AUTH] Request rejected");
        AppError::Unauthorized
    })?;

    debug!("[AUTH] Authenticated user: {}", ctx.subject());

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::{Duration, TimeZone};
    use lib_auth::{TokenIssuer, TOKEN_LIFETIME};

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn token_for(subject: &str) -> String {
        TokenIssuer::new(Some(SECRET)).issue(subject, t0()).unwrap()
    }

    #[test]
    fn test_valid_token_yields_ctx() {
        let verifier = TokenVerifier::new(Some(SECRET));
        let headers = headers(&format!("Bearer {}", token_for("user-1")));

        let ctx = authorize(&headers, &verifier, t0()).expect("gate should accept");
        assert_eq!(ctx.subject(), "user-1");
    }

    #[test]
    fn test_absent_header() {
        let verifier = TokenVerifier::new(Some(SECRET));

        assert_eq!(
            authorize(&HeaderMap::new(), &verifier, t0()),
            Err(GateRejection::NoTokenProvided)
        );
    }

    #[test]
    fn test_header_without_second_segment() {
        let verifier = TokenVerifier::new(Some(SECRET));

        let bare_token = token_for("user-1");

        for value in ["Bearer", "Bearer ", bare_token.as_str()] {
            assert_eq!(
                authorize(&headers(value), &verifier, t0()),
                Err(GateRejection::TokenMissing),
                "header value {value:?}"
            );
        }
    }

    #[test]
    fn test_expired_token() {
        let verifier = TokenVerifier::new(Some(SECRET));
        let headers = headers(&format!("Bearer {}", token_for("user-1")));
        let later = t0() + TOKEN_LIFETIME + Duration::seconds(1);

        assert_eq!(
            authorize(&headers, &verifier, later),
            Err(GateRejection::InvalidToken(TokenError::Expired))
        );
    }

    #[test]
    fn test_foreign_signature() {
        let verifier = TokenVerifier::new(Some("another-secret-key-that-is-also-long-enough"));
        let headers = headers(&format!("Bearer {}", token_for("user-1")));

        assert_eq!(
            authorize(&headers, &verifier, t0()),
            Err(GateRejection::InvalidToken(TokenError::InvalidSignature))
        );
    }
}
