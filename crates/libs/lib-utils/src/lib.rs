//! # Utilities Library
//!
//! Shared helpers for environment variables, the clock, and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::get_env_opt;
pub use time::now_utc;
pub use validation::{validate_email, validate_not_empty};
