//! Job listing model and DTOs.

use cityguide_core::catalog::validate_not_blank;
use cityguide_core::error::CoreError;
use cityguide_core::moderation::VisibilityFlag;
use cityguide_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::listing::Listable;

/// A row from the `jobs` table. Jobs have no `updated_at`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub contract_type: Option<String>,
    pub category: Option<String>,
    pub active: bool,
    pub featured: bool,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: Timestamp,
}

impl Listable for Job {
    const TABLE: &'static str = "jobs";
    const COLUMNS: &'static str = JOB_COLUMNS;
    const VISIBILITY: VisibilityFlag = VisibilityFlag::Active;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description", "company_name"];
    const HAS_FEATURED: bool = true;
}

pub(crate) const JOB_COLUMNS: &str = "id, title, company_name, description, location, salary, \
    contract_type, category, active, featured, contact_email, contact_phone, created_at";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJob {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub contract_type: Option<String>,
    pub category: Option<String>,
    /// Defaults to `true`.
    pub active: Option<bool>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl CreateJob {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        validate_not_blank("title", &self.title)?;
        validate_not_blank("company_name", &self.company_name)?;
        validate_not_blank("description", &self.description)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJob {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub company_name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub salary: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub contract_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub category: Option<Option<String>>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
    #[validate(email)]
    #[serde(default, deserialize_with = "super::nullable")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub contact_phone: Option<Option<String>>,
}

impl UpdateJob {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("title", &self.title),
            ("company_name", &self.company_name),
            ("description", &self.description),
        ] {
            if let Some(value) = value {
                validate_not_blank(field, value)?;
            }
        }
        Ok(())
    }
}
