//! # Authentication Library
//!
//! Password hashing and signed bearer-token management.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_password, verify_password_placeholder};
pub use token::{Claims, TokenError, TokenIssuer, TokenVerifier, TOKEN_LIFETIME};
