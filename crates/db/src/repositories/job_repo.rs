//! Repository for the `jobs` table.

use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery};
use crate::models::clearable;
use crate::models::job::{CreateJob, Job, UpdateJob, JOB_COLUMNS as COLUMNS};

pub struct JobRepo;

impl JobRepo {
    /// Insert a job posting. `active` defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateJob, active: bool) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs
                (title, company_name, description, location, salary, contract_type,
                 category, active, contact_email, contact_phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.title)
            .bind(&input.company_name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.salary)
            .bind(&input.contract_type)
            .bind(&input.category)
            .bind(active)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Job>, sqlx::Error> {
        fetch_page::<Job>(pool, query).await
    }

    /// Update a job. Absent fields are kept; nullable ones sent as `null` are cleared.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJob,
    ) -> Result<Option<Job>, sqlx::Error> {
        let (location_set, location) = clearable(&input.location);
        let (salary_set, salary) = clearable(&input.salary);
        let (contract_type_set, contract_type) = clearable(&input.contract_type);
        let (category_set, category) = clearable(&input.category);
        let (contact_email_set, contact_email) = clearable(&input.contact_email);
        let (contact_phone_set, contact_phone) = clearable(&input.contact_phone);
        let query = format!(
            "UPDATE jobs SET
                title = COALESCE($2, title),
                company_name = COALESCE($3, company_name),
                description = COALESCE($4, description),
                location = CASE WHEN $5 THEN $6 ELSE location END,
                salary = CASE WHEN $7 THEN $8 ELSE salary END,
                contract_type = CASE WHEN $9 THEN $10 ELSE contract_type END,
                category = CASE WHEN $11 THEN $12 ELSE category END,
                active = COALESCE($13, active),
                featured = COALESCE($14, featured),
                contact_email = CASE WHEN $15 THEN $16 ELSE contact_email END,
                contact_phone = CASE WHEN $17 THEN $18 ELSE contact_phone END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.company_name)
            .bind(&input.description)
            .bind(location_set)
            .bind(location)
            .bind(salary_set)
            .bind(salary)
            .bind(contract_type_set)
            .bind(contract_type)
            .bind(category_set)
            .bind(category)
            .bind(input.active)
            .bind(input.featured)
            .bind(contact_email_set)
            .bind(contact_email)
            .bind(contact_phone_set)
            .bind(contact_phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete a job by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
