//! Aggregate queries backing the admin dashboard.

use cityguide_core::catalog::{PURPOSE_RENT, PURPOSE_SALE};
use sqlx::PgPool;

use crate::models::dashboard::{
    CompanyStats, DashboardStats, JobStats, NewsStats, PropertyStats, ReviewStats, UserStats,
};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Collect every counter from one consistent snapshot.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let companies = sqlx::query_as::<_, CompanyStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE approved) AS approved,
                    COUNT(*) FILTER (WHERE NOT approved) AS pending,
                    COUNT(*) FILTER (WHERE featured) AS featured
             FROM companies",
        )
        .fetch_one(&mut *tx)
        .await?;

        let news = sqlx::query_as::<_, NewsStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE published) AS published,
                    COUNT(*) FILTER (WHERE NOT published) AS draft,
                    COUNT(*) FILTER (WHERE featured) AS featured
             FROM news",
        )
        .fetch_one(&mut *tx)
        .await?;

        let jobs = sqlx::query_as::<_, JobStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE active) AS active,
                    COUNT(*) FILTER (WHERE NOT active) AS inactive
             FROM jobs",
        )
        .fetch_one(&mut *tx)
        .await?;

        let properties = sqlx::query_as::<_, PropertyStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE active) AS active,
                    COUNT(*) FILTER (WHERE active AND purpose = $1) AS for_sale,
                    COUNT(*) FILTER (WHERE active AND purpose = $2) AS for_rent
             FROM properties",
        )
        .bind(PURPOSE_SALE)
        .bind(PURPOSE_RENT)
        .fetch_one(&mut *tx)
        .await?;

        let reviews = sqlx::query_as::<_, ReviewStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE approved) AS approved,
                    COUNT(*) FILTER (WHERE NOT approved) AS pending
             FROM reviews",
        )
        .fetch_one(&mut *tx)
        .await?;

        let users = sqlx::query_as::<_, UserStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE is_admin) AS admins
             FROM users",
        )
        .fetch_one(&mut *tx)
        .await?;

        let categories: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) FROM companies
             WHERE approved = true
             GROUP BY category",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            companies,
            news,
            jobs,
            properties,
            reviews,
            users,
            categories: categories.into_iter().collect(),
        })
    }
}
