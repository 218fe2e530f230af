//! Repository for the `site_settings` table.

use sqlx::PgPool;

pub struct SettingsRepo;

impl SettingsRepo {
    /// Every stored `(key, value)` pair, ordered by key.
    pub async fn list_pairs(pool: &PgPool) -> Result<Vec<(String, Option<String>)>, sqlx::Error> {
        sqlx::query_as("SELECT key, value FROM site_settings ORDER BY key")
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite every pair in one transaction.
    pub async fn upsert_many(
        pool: &PgPool,
        pairs: &[(String, Option<String>)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (key, value) in pairs {
            sqlx::query(
                "INSERT INTO site_settings (key, value)
                 VALUES ($1, $2)
                 ON CONFLICT ON CONSTRAINT uq_site_settings_key
                 DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
