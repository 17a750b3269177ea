//! # Auth Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the hasher and the token issuer.
///
/// Token *verification* failures are not here; see [`crate::token::TokenError`].
#[derive(Debug, Error)]
pub enum Error {
    /// RNG/resource exhaustion while hashing, or a structurally malformed stored hash.
    #[error("password hashing failure: {0}")]
    HashingFailure(String),

    /// The process was started without a signing secret.
    #[error("token signing secret is not configured")]
    MissingSigningSecret,

    #[error("token encoding failed: {0}")]
    TokenEncode(String),
}
