//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller's owner id from a JWT Bearer token.

pub mod auth;
