//! Access-gate extractors.
//!
//! - [`auth::Identity`] -- the caller, anonymous or a user; never rejects.
//! - [`auth::AuthUser`] -- requires a live session.
//! - [`rbac::RequireAdmin`] -- requires a live session of an admin user.

pub mod auth;
pub mod rbac;
