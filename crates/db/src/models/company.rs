//! Company entity model and DTOs.

use cityguide_core::catalog::{validate_not_blank, validate_plan};
use cityguide_core::error::CoreError;
use cityguide_core::moderation::VisibilityFlag;
use cityguide_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::listing::Listable;

/// A row from the `companies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub plan: String,
    pub approved: bool,
    pub featured: bool,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Listable for Company {
    const TABLE: &'static str = "companies";
    const COLUMNS: &'static str = COMPANY_COLUMNS;
    const VISIBILITY: VisibilityFlag = VisibilityFlag::Approved;
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "description"];
    const HAS_FEATURED: bool = true;
}

pub(crate) const COMPANY_COLUMNS: &str = "id, name, description, category, address, phone, \
    email, website, plan, approved, featured, rating, review_count, created_at, updated_at";

/// DTO for registering a company. New companies always await approval.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompany {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub website: Option<String>,
    /// Defaults to `basico` when omitted.
    pub plan: Option<String>,
}

impl CreateCompany {
    /// Domain checks that the derive cannot express.
    pub fn check_rules(&self) -> Result<(), CoreError> {
        validate_not_blank("name", &self.name)?;
        validate_not_blank("category", &self.category)?;
        if let Some(plan) = &self.plan {
            validate_plan(plan)?;
        }
        Ok(())
    }
}

/// Admin update of a company. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCompany {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub phone: Option<Option<String>>,
    #[validate(email)]
    #[serde(default, deserialize_with = "super::nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub website: Option<Option<String>>,
    pub plan: Option<String>,
    pub approved: Option<bool>,
    pub featured: Option<bool>,
}

impl UpdateCompany {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_not_blank("name", name)?;
        }
        if let Some(category) = &self.category {
            validate_not_blank("category", category)?;
        }
        if let Some(plan) = &self.plan {
            validate_plan(plan)?;
        }
        Ok(())
    }
}
