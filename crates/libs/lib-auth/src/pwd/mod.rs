//! # Password Hashing
//!
//! Salted, adaptive-cost password hashing and verification using Argon2id.
//!
//! The work factor is fixed at build time. Every call to [`hash_password`]
//! draws a fresh salt, and the salt plus parameters are embedded in the PHC
//! string that gets stored, so [`verify_password`] needs nothing else.

use crate::{Error, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::OnceLock;

/// Memory cost in KiB.
const M_COST: u32 = 19_456;
/// Iterations.
const T_COST: u32 = 2;
/// Lanes.
const P_COST: u32 = 1;

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(M_COST, T_COST, P_COST, None)
        .map_err(|e| Error::HashingFailure(format!("invalid argon2 params: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password using the Argon2id algorithm.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::HashingFailure(format!("failed to hash password: {e}")))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored Argon2 hash.
///
/// A mismatch is `Ok(false)`. Only an unparsable `hash` is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::HashingFailure(format!("failed to parse hash: {e}")))?;

    match hasher()?.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::HashingFailure(format!(
            "failed to verify password: {e}"
        ))),
    }
}

/// Hash compared against when there is no stored hash to check.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    DUMMY_HASH
        .get_or_init(|| hash_password("no-account-placeholder").ok())
        .as_deref()
}

/// Run a full verification against a placeholder hash and discard the result.
///
/// Lets a login for an unknown account cost the same as a wrong password.
pub fn verify_password_placeholder(password: &str) {
    if let Some(hash) = dummy_hash() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "secret123";
        let hash = hash_password(password)
            .expect("Password hashing should succeed for valid password");

        assert!(verify_password(password, &hash)
            .expect("Password verification should succeed for correct password"));
        assert!(!verify_password("secret124", &hash)
            .expect("Password mismatch should be a plain false, not an error"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("secret123").unwrap();
        let second = hash_password("secret123").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret123", &first).unwrap());
        assert!(verify_password("secret123", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let password = "plaintext-marker";
        let hash = hash_password(password).unwrap();

        assert!(!hash.contains(password));
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password(" ", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_hashing_failure() {
        let result = verify_password("secret123", "not-a-phc-string");
        assert!(matches!(result, Err(Error::HashingFailure(_))));
    }

    #[test]
    fn test_placeholder_hash_uses_full_work_factor() {
        let hash = dummy_hash().expect("placeholder hash should be computed");

        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(!verify_password("secret123", hash).unwrap());

        // Computed once, then reused.
        assert!(std::ptr::eq(hash, dummy_hash().unwrap()));
        verify_password_placeholder("secret123");
    }
}
