//! # Core Library
//!
//! Configuration, error taxonomy, request context, DTOs, and the user store.

pub mod config;
pub mod ctx;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use ctx::Ctx;
pub use error::{AppError, Result};
pub use model::store::{create_pool, migrate, DbPool};
