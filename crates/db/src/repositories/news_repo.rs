//! Repository for the `news` table.

use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery};
use crate::models::clearable;
use crate::models::news::{CreateNews, News, UpdateNews, NEWS_COLUMNS as COLUMNS};

pub struct NewsRepo;

impl NewsRepo {
    pub async fn create(pool: &PgPool, input: &CreateNews, published: bool) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news
                (title, content, category, author, featured, urgent, published, image_url)
             VALUES ($1, $2, $3, $4, COALESCE($5, false), COALESCE($6, false), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.author)
            .bind(input.featured)
            .bind(input.urgent)
            .bind(published)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bump the view counter atomically and return the updated article.
    ///
    /// Leaves `updated_at` alone: a read is not an edit.
    pub async fn record_view(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("UPDATE news SET views = views + 1 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<News>, sqlx::Error> {
        fetch_page::<News>(pool, query).await
    }

    /// Published and featured articles, newest first.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news
             WHERE published = true AND featured = true
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Published and urgent articles, newest first.
    pub async fn list_urgent(pool: &PgPool, limit: i64) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news
             WHERE published = true AND urgent = true
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let (image_url_set, image_url) = clearable(&input.image_url);
        let query = format!(
            "UPDATE news SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                author = COALESCE($5, author),
                featured = COALESCE($6, featured),
                urgent = COALESCE($7, urgent),
                published = COALESCE($8, published),
                image_url = CASE WHEN $9 THEN $10 ELSE image_url END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.author)
            .bind(input.featured)
            .bind(input.urgent)
            .bind(input.published)
            .bind(image_url_set)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
