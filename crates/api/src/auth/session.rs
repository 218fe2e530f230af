//! Opaque session tokens.
//!
//! A token is a random UUID handed to the client once. Only its SHA-256 hex
//! digest is stored, so a leaked `user_sessions` table cannot be replayed.
//! Clients send the token back as `Authorization: Bearer <token>` or in the
//! `session` cookie.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use cityguide_core::types::DbId;
use cityguide_db::models::session::CreateSession;
use cityguide_db::repositories::SessionRepo;
use cityguide_db::DbPool;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Generate a new session token, returning `(plaintext, sha256_hex_hash)`.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Persist a new session for `user_id` and return the plaintext token.
pub async fn start_session(
    pool: &DbPool,
    user_id: DbId,
    expiry_days: i64,
) -> Result<String, sqlx::Error> {
    let (token, token_hash) = generate_session_token();
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            token_hash,
            expires_at: Utc::now() + Duration::days(expiry_days),
        },
    )
    .await?;
    Ok(token)
}

/// Pull the session token from the request: bearer header first, then cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value that stores `token` for `expiry_days`.
pub fn session_cookie(token: &str, expiry_days: i64) -> String {
    let max_age = Duration::days(expiry_days).num_seconds();
    format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}
