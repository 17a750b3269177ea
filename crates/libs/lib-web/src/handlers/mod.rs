//! # HTTP Request Handlers
//!
//! Axum handlers, grouped by feature. Handlers extract, delegate to
//! [`crate::services`] or the store, and shape the JSON response; failures are
//! returned as [`lib_core::AppError`], which renders itself as `{"msg": ...}`.
//!
//! - **[`auth`]**: public account endpoints
//!   - `POST /api/auth/register`
//!   - `POST /api/auth/login`
//!
//! - **[`user`]**: endpoints behind the auth gate, scoped to the caller's `Ctx`
//!   - `GET|PUT /api/user/profile`
//!   - `GET|POST /api/user/skills`, `DELETE /api/user/skills/{skill_name}`
//!   - `GET /api/user/skills/stats`
//!   - `GET /api/user/all`
//!
//! ```rust,ignore
//! async fn handler(
//!     State(db): State<DbPool>,             // Shared state
//!     Extension(ctx): Extension<Ctx>,       // Identity from the auth gate
//!     Json(payload): Json<RequestBody>,     // Request body
//! ) -> Result<Json<Response>> {
//!     // Handler logic...
//! }
//! ```

pub mod auth;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
