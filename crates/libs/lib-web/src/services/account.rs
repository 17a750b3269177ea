//! # Account Service
//!
//! Registration and login.
//!
//! ## Registration
//!
//! 1. Validate input
//! 2. Reject an email that is already on file (exact match)
//! 3. Hash the password and store the record; the plaintext goes nowhere else
//!
//! Registration does not log the user in.
//!
//! ## Login
//!
//! 1. Look up by email
//! 2. Verify the password against the stored hash
//! 3. Issue a token bound to the record's id
//!
//! Steps 1 and 2 fail with the same [`AppError::InvalidCredentials`], so the
//! response never tells whether an email is registered. An unknown email
//! still pays for one Argon2 verification, so response time does not tell either.

use chrono::{DateTime, Utc};
use lib_auth::{hash_password, verify_password, verify_password_placeholder, TokenIssuer};
use lib_core::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use lib_core::model::store::{UserForCreate, UserRepository};
use lib_core::{AppError, DbPool, Result};
use lib_utils::{validate_email, validate_not_empty};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Registration and login against the user store.
pub struct AccountService {
    db: DbPool,
    issuer: Arc<TokenIssuer>,
}

impl AccountService {
    pub fn new(db: DbPool, issuer: Arc<TokenIssuer>) -> Self {
        Self { db, issuer }
    }

    /// Create a new account.
    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn register(&self, req: &RegisterRequest) -> Result<()> {
        validate_not_empty(&req.name, "Name").map_err(AppError::Validation)?;
        validate_email(&req.email).map_err(AppError::Validation)?;
        if req.password.is_empty() {
            return Err(AppError::Validation("Password cannot be empty".to_string()));
        }

        if UserRepository::find_by_email(&self.db, &req.email).await?.is_some() {
            warn!("[REGISTER] Email already registered");
            return Err(AppError::DuplicateAccount);
        }

        debug!("[REGISTER] Hashing password...");
        let password = req.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))??;

        let user_data = UserForCreate::new(req.name.clone(), req.email.clone(), password_hash);
        let user = match UserRepository::create(&self.db, user_data).await {
            Ok(user) => user,
            // Lost a race with a concurrent registration of the same email.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!("[REGISTER] Email registered concurrently");
                return Err(AppError::DuplicateAccount);
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, "[REGISTER] User created");
        Ok(())
    }

    /// Check credentials and issue a token valid from `now`.
    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn login(&self, req: &LoginRequest, now: DateTime<Utc>) -> Result<LoginResponse> {
        let Some(user) = UserRepository::find_by_email(&self.db, &req.email).await? else {
            warn!("[LOGIN] Unknown email");
            let password = req.password.clone();
            tokio::task::spawn_blocking(move || verify_password_placeholder(&password))
                .await
                .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))?;
            return Err(AppError::InvalidCredentials);
        };

        debug!("[LOGIN] Verifying password...");
        let password = req.password.clone();
        let stored_hash = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))??;

        if !is_valid {
            warn!(user_id = %user.id, "[LOGIN] Wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issuer.issue(&user.id, now).map_err(|e| {
            error!("[LOGIN] Cannot issue token: {}", e);
            AppError::from(e)
        })?;

        info!(user_id = %user.id, "[LOGIN] User authenticated");

        Ok(LoginResponse {
            token,
            user: UserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
            },
        })
    }
}
