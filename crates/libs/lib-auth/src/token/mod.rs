//! # Bearer Token Management
//!
//! Issue and verify signed, time-bounded JWTs (HS256).
//!
//! The signing secret is injected once, at construction, into a [`TokenIssuer`]
//! and a [`TokenVerifier`]; both are immutable afterwards and safe to share
//! across requests. There is no server-side token storage and no revocation:
//! a token is valid exactly when its signature checks out and `now <= exp`.

use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed validity window of every issued token.
pub const TOKEN_LIFETIME: Duration = Duration::hours(2);

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a token. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Why a token was rejected.
///
/// Meant for logs only. Everything outward-facing collapses these into one
/// unauthorized signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

// region:    --- Issuer

/// Produces signed tokens for verified identities.
pub struct TokenIssuer {
    key: Option<EncodingKey>,
}

impl TokenIssuer {
    /// `None` builds an issuer that refuses to issue.
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            key: secret.map(|s| EncodingKey::from_secret(s.as_bytes())),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Issue a token for `subject`, valid from `now` for [`TOKEN_LIFETIME`].
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
        let key = self.key.as_ref().ok_or(Error::MissingSigningSecret)?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + TOKEN_LIFETIME).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, key).map_err(|e| Error::TokenEncode(e.to_string()))
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("configured", &self.is_configured())
            .finish()
    }
}

// endregion: --- Issuer

// region:    --- Verifier

/// Validates tokens and recovers their claims.
pub struct TokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    /// `None` builds a verifier that rejects every token.
    pub fn new(secret: Option<&str>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: secret.map(|s| DecodingKey::from_secret(s.as_bytes())),
            validation,
        }
    }

    /// Verify signature, then expiry (`now <= exp`).
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> std::result::Result<Claims, TokenError> {
        let key = self.key.as_ref().ok_or(TokenError::InvalidSignature)?;

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?
            .claims;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("configured", &self.key.is_some())
            .finish()
    }
}

// endregion: --- Verifier
