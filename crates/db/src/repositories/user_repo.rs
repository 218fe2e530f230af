//! Repository for the `users` table.

use cityguide_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{NewUser, User};

const COLUMNS: &str = "id, email, name, is_admin, created_at";

pub struct UserRepo;

impl UserRepo {
    /// Return the user with `input.email`, creating it on first sight.
    ///
    /// `is_admin` only applies on creation; an existing user keeps its role.
    pub async fn find_or_create(pool: &PgPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, is_admin)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_users_email
             DO UPDATE SET email = EXCLUDED.email
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All users, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Flip the admin flag.
    pub async fn toggle_admin(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET is_admin = NOT is_admin WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
