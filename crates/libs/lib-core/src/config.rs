//! # Application Configuration
//!
//! Configuration loaded from environment variables at startup.
//!
//! There is no global accessor: the loaded [`Config`] is handed to whatever
//! needs it, which is also how tests inject their own signing secret.

use lib_utils::envs::get_env_opt;

/// Minimum accepted length for `JWT_SECRET`.
pub const MIN_JWT_SECRET_LEN: usize = 32;

const DEFAULT_DATABASE_URL: &str = "sqlite:data/skillboard.db";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for token signing and verification.
    ///
    /// May be absent: the server still starts, but every login fails with
    /// a configuration error until an operator sets it.
    pub jwt_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url =
            get_env_opt("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Self {
            database_url,
            jwt_secret: get_env_opt("JWT_SECRET"),
        }
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(secret) = &self.jwt_secret {
            if secret.len() < MIN_JWT_SECRET_LEN {
                return Err(format!(
                    "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters long"
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: Option<&str>) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: secret.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_accepts_missing_secret() {
        assert!(config(None).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let err = config(Some("too-short")).validate().unwrap_err();
        assert!(err.contains("JWT_SECRET"));
    }

    #[test]
    fn test_validate_accepts_long_secret() {
        assert!(config(Some("test-secret-key-must-be-at-least-32-chars-long!"))
            .validate()
            .is_ok());
    }
}
