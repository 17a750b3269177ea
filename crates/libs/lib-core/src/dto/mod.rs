//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the REST API.

pub mod auth;
pub mod user;

pub use auth::*;
pub use user::*;
