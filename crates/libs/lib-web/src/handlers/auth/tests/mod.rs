//! # Auth Handler Tests
//!
//! Registration and login driven through the real router.

mod login;
mod register;
