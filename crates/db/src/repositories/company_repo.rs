//! Repository for the `companies` table.

use cityguide_core::catalog::DEFAULT_PLAN;
use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery};
use crate::models::clearable;
use crate::models::company::{Company, CreateCompany, UpdateCompany, COMPANY_COLUMNS as COLUMNS};

/// Provides CRUD and moderation operations for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company. It always starts unapproved and unfeatured.
    pub async fn create(pool: &PgPool, input: &CreateCompany) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies
                (name, description, category, address, phone, email, website, plan, approved)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, $9), false)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.website)
            .bind(&input.plan)
            .bind(DEFAULT_PLAN)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered, paginated listing (featured first, newest first).
    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Company>, sqlx::Error> {
        fetch_page::<Company>(pool, query).await
    }

    /// Unapproved companies, newest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies WHERE approved = false
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Company>(&query).fetch_all(pool).await
    }

    /// Apply every present field in one statement and refresh `updated_at`.
    /// Nullable columns sent as `null` are cleared.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompany,
    ) -> Result<Option<Company>, sqlx::Error> {
        let (description_set, description) = clearable(&input.description);
        let (address_set, address) = clearable(&input.address);
        let (phone_set, phone) = clearable(&input.phone);
        let (email_set, email) = clearable(&input.email);
        let (website_set, website) = clearable(&input.website);
        let query = format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                category = COALESCE($5, category),
                address = CASE WHEN $6 THEN $7 ELSE address END,
                phone = CASE WHEN $8 THEN $9 ELSE phone END,
                email = CASE WHEN $10 THEN $11 ELSE email END,
                website = CASE WHEN $12 THEN $13 ELSE website END,
                plan = COALESCE($14, plan),
                approved = COALESCE($15, approved),
                featured = COALESCE($16, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(description_set)
            .bind(description)
            .bind(&input.category)
            .bind(address_set)
            .bind(address)
            .bind(phone_set)
            .bind(phone)
            .bind(email_set)
            .bind(email)
            .bind(website_set)
            .bind(website)
            .bind(&input.plan)
            .bind(input.approved)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    /// Set the approval flag. Setting the current value again is a no-op
    /// apart from `updated_at`.
    pub async fn set_approved(
        pool: &PgPool,
        id: DbId,
        approved: bool,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET approved = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(approved)
            .fetch_optional(pool)
            .await
    }

    /// Flip the featured flag.
    pub async fn toggle_featured(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET featured = NOT featured, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a company with its photos and reviews in one transaction.
    ///
    /// Returns the stored filenames of the removed photos so the caller can
    /// delete the files, or `None` if the company does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let filenames: Vec<String> =
            sqlx::query_scalar("DELETE FROM company_photos WHERE company_id = $1 RETURNING filename")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        sqlx::query("DELETE FROM reviews WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(filenames))
    }
}
