//! # Services Layer
//!
//! Business logic between the HTTP handlers and the user store:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → UserRepository / lib-auth
//! ```
//!
//! - [`account`] - registration and login
//! - [`skills`] - skill-list editing and statistics
//!
//! Services return `lib_core::Result<T>`; handlers turn the `AppError` into a response.

pub mod account;
pub mod skills;

pub use account::AccountService;
