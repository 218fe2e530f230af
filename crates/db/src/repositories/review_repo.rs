//! Repository for the `reviews` table.
//!
//! Approving or removing a review changes the parent company's aggregate
//! `rating` and `review_count`; both happen in the same transaction.

use cityguide_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::review::{CreateReview, PendingReview, Review};

const COLUMNS: &str =
    "id, company_id, author_name, author_email, rating, comment, approved, created_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert an unapproved review. Returns `None` if the company does not exist.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (company_id, author_name, author_email, rating, comment, approved)
             SELECT id, $2, $3, $4, $5, false FROM companies WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(company_id)
            .bind(&input.author_name)
            .bind(&input.author_email)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approved reviews of a company, newest first.
    pub async fn list_approved_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE company_id = $1 AND approved = true
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Unapproved reviews with their company name, newest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<PendingReview>, sqlx::Error> {
        sqlx::query_as::<_, PendingReview>(
            "SELECT r.id, r.company_id, r.author_name, r.author_email, r.rating, r.comment,
                    r.approved, r.created_at, c.name AS company_name
             FROM reviews r
             JOIN companies c ON c.id = r.company_id
             WHERE r.approved = false
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Mark a review approved and refresh the company's rating. Idempotent.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("UPDATE reviews SET approved = true WHERE id = $1 RETURNING {COLUMNS}");
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(review) = review else {
            tx.rollback().await?;
            return Ok(None);
        };

        refresh_company_rating(&mut *tx, review.company_id).await?;
        tx.commit().await?;
        Ok(Some(review))
    }

    /// Delete a review and refresh the company's rating. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let company_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM reviews WHERE id = $1 RETURNING company_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(company_id) = company_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        refresh_company_rating(&mut *tx, company_id).await?;
        tx.commit().await?;
        Ok(true)
    }
}

/// Recompute `rating` (mean of approved ratings, 0 when none) and
/// `review_count` for one company.
async fn refresh_company_rating(conn: &mut PgConnection, company_id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE companies SET
            rating = stats.avg_rating,
            review_count = stats.approved_count
         FROM (
            SELECT COALESCE(AVG(rating), 0)::float8 AS avg_rating,
                   COUNT(*)::int AS approved_count
            FROM reviews
            WHERE company_id = $1 AND approved = true
         ) AS stats
         WHERE companies.id = $1",
    )
    .bind(company_id)
    .execute(conn)
    .await?;
    Ok(())
}
