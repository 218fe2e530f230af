//! User accounts.

use cityguide_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// Identity established by a successful login.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    /// Only applied when the user is created; existing users keep their role.
    pub is_admin: bool,
}
