//! Repository for `company_photos` and `property_photos`.
//!
//! Both tables are addressed through [`PhotoParent`]; table and column names
//! come from that enum, never from caller input.

use cityguide_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{NewPhoto, Photo, PhotoParent};

fn columns(parent: PhotoParent) -> String {
    format!(
        "id, {} AS parent_id, filename, original_name, is_main, created_at",
        parent.fk_column()
    )
}

pub struct PhotoRepo;

impl PhotoRepo {
    /// Attach a photo whose file is already stored.
    ///
    /// The parent row is locked for the duration of the insert so two
    /// concurrent first uploads cannot both become the main photo. The new
    /// photo is main exactly when the parent had no photos before.
    ///
    /// Returns `None` if the parent does not exist.
    pub async fn create(
        pool: &PgPool,
        parent: PhotoParent,
        parent_id: DbId,
        input: &NewPhoto,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> = sqlx::query_scalar(&format!(
            "SELECT id FROM {} WHERE id = $1 FOR UPDATE",
            parent.parent_table()
        ))
        .bind(parent_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let existing: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1",
            parent.table(),
            parent.fk_column()
        ))
        .bind(parent_id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO {} ({}, filename, original_name, is_main)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            parent.table(),
            parent.fk_column(),
            columns(parent)
        );
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(parent_id)
            .bind(&input.filename)
            .bind(&input.original_name)
            .bind(existing == 0)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(photo))
    }

    /// Photos of one parent, oldest first.
    pub async fn list_for_parent(
        pool: &PgPool,
        parent: PhotoParent,
        parent_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY created_at, id",
            columns(parent),
            parent.table(),
            parent.fk_column()
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Photos of many parents in one round trip, grouped by parent then oldest first.
    pub async fn list_for_parents(
        pool: &PgPool,
        parent: PhotoParent,
        parent_ids: &[DbId],
    ) -> Result<Vec<Photo>, sqlx::Error> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {cols} FROM {table} WHERE {fk} = ANY($1) ORDER BY {fk}, created_at, id",
            cols = columns(parent),
            table = parent.table(),
            fk = parent.fk_column()
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(parent_ids)
            .fetch_all(pool)
            .await
    }

    /// Delete one photo of a given parent. Returns the removed row so the
    /// caller can delete its file. The main flag is not moved to another photo.
    pub async fn delete(
        pool: &PgPool,
        parent: PhotoParent,
        parent_id: DbId,
        photo_id: DbId,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 AND {} = $2 RETURNING {}",
            parent.table(),
            parent.fk_column(),
            columns(parent)
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(photo_id)
            .bind(parent_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether any photo row references `filename`.
    pub async fn filename_exists(pool: &PgPool, filename: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM company_photos WHERE filename = $1)
                 OR EXISTS (SELECT 1 FROM property_photos WHERE filename = $1)",
        )
        .bind(filename)
        .fetch_one(pool)
        .await
    }
}
