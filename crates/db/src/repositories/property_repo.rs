//! Repository for the `properties` table.

use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery};
use crate::models::clearable;
use crate::models::property::{
    CreateProperty, Property, UpdateProperty, PROPERTY_COLUMNS as COLUMNS,
};

pub struct PropertyRepo;

impl PropertyRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateProperty,
        active: bool,
    ) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties
                (title, description, property_type, purpose, price, address, neighborhood,
                 bedrooms, bathrooms, area, contact_name, contact_email, contact_phone, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.property_type)
            .bind(&input.purpose)
            .bind(input.price)
            .bind(&input.address)
            .bind(&input.neighborhood)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.area)
            .bind(&input.contact_name)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, query: &ListQuery) -> Result<Page<Property>, sqlx::Error> {
        fetch_page::<Property>(pool, query).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        let (description_set, description) = clearable(&input.description);
        let (address_set, address) = clearable(&input.address);
        let (neighborhood_set, neighborhood) = clearable(&input.neighborhood);
        let (bedrooms_set, bedrooms) = clearable(&input.bedrooms);
        let (bathrooms_set, bathrooms) = clearable(&input.bathrooms);
        let (area_set, area) = clearable(&input.area);
        let (contact_name_set, contact_name) = clearable(&input.contact_name);
        let (contact_email_set, contact_email) = clearable(&input.contact_email);
        let (contact_phone_set, contact_phone) = clearable(&input.contact_phone);
        let query = format!(
            "UPDATE properties SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                property_type = COALESCE($5, property_type),
                purpose = COALESCE($6, purpose),
                price = COALESCE($7, price),
                address = CASE WHEN $8 THEN $9 ELSE address END,
                neighborhood = CASE WHEN $10 THEN $11 ELSE neighborhood END,
                bedrooms = CASE WHEN $12 THEN $13 ELSE bedrooms END,
                bathrooms = CASE WHEN $14 THEN $15 ELSE bathrooms END,
                area = CASE WHEN $16 THEN $17 ELSE area END,
                contact_name = CASE WHEN $18 THEN $19 ELSE contact_name END,
                contact_email = CASE WHEN $20 THEN $21 ELSE contact_email END,
                contact_phone = CASE WHEN $22 THEN $23 ELSE contact_phone END,
                active = COALESCE($24, active),
                featured = COALESCE($25, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(description_set)
            .bind(description)
            .bind(&input.property_type)
            .bind(&input.purpose)
            .bind(input.price)
            .bind(address_set)
            .bind(address)
            .bind(neighborhood_set)
            .bind(neighborhood)
            .bind(bedrooms_set)
            .bind(bedrooms)
            .bind(bathrooms_set)
            .bind(bathrooms)
            .bind(area_set)
            .bind(area)
            .bind(contact_name_set)
            .bind(contact_name)
            .bind(contact_email_set)
            .bind(contact_email)
            .bind(contact_phone_set)
            .bind(contact_phone)
            .bind(input.active)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a property and its photo rows in one transaction.
    ///
    /// Returns the removed photo filenames, or `None` if the property does
    /// not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let filenames: Vec<String> = sqlx::query_scalar(
            "DELETE FROM property_photos WHERE property_id = $1 RETURNING filename",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
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
