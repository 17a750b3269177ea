//! # Time Utilities

use chrono::{DateTime, Utc};

/// Get current UTC time.
///
/// Request-handling code reads the clock once through here and passes the
/// instant down, so token issuance and verification stay testable.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}
