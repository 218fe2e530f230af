//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- opaque session tokens, their digests and the session cookie.
//! - [`google`] -- third-party ID-token verification behind [`google::IdentityVerifier`].

pub mod google;
pub mod password;
pub mod session;
