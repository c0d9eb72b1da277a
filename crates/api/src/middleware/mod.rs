//! Request guards.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`throttle`] -- Per-IP rate limiting for the credential endpoints.

pub mod auth;
pub mod throttle;
