//! # Request Context
//!
//! The authenticated identity of one request. Built by the auth middleware
//! from a verified token, read by handlers, dropped with the request.

/// Identity attached to an authenticated request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    subject: String,
}

impl Ctx {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Identifier of the user the request acts for.
    pub fn subject(&self) -> &str {
        &self.subject
    }
}
