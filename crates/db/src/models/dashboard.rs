//! Aggregate counters for the admin dashboard.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct CompanyStats {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
    pub featured: i64,
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct NewsStats {
    pub total: i64,
    pub published: i64,
    pub draft: i64,
    pub featured: i64,
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct JobStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct PropertyStats {
    pub total: i64,
    pub active: i64,
    pub for_sale: i64,
    pub for_rent: i64,
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ReviewStats {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
}

#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct UserStats {
    pub total: i64,
    pub admins: i64,
}

/// Everything the dashboard shows in one response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub companies: CompanyStats,
    pub news: NewsStats,
    pub jobs: JobStats,
    pub properties: PropertyStats,
    pub reviews: ReviewStats,
    pub users: UserStats,
    /// Approved companies per category.
    pub categories: BTreeMap<String, i64>,
}
