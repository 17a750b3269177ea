//! # Web Library
//!
//! HTTP handlers, middleware, services, and server bootstrap.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, start_server, AppState, ServerConfig};
