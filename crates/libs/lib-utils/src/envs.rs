//! # Environment Variables
//!
//! Utilities for reading environment variables.

use std::env;

/// Get an optional environment variable; unset and blank values are both `None`.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|val| !val.trim().is_empty())
}
