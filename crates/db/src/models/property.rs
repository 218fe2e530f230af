//! Property (real-estate) listing model and DTOs.

use cityguide_core::catalog::{validate_not_blank, validate_purpose};
use cityguide_core::error::CoreError;
use cityguide_core::moderation::VisibilityFlag;
use cityguide_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::listing::Listable;

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub property_type: String,
    pub purpose: String,
    pub price: f64,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub active: bool,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Listable for Property {
    const TABLE: &'static str = "properties";
    const COLUMNS: &'static str = PROPERTY_COLUMNS;
    const VISIBILITY: VisibilityFlag = VisibilityFlag::Active;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description", "address"];
    const HAS_FEATURED: bool = true;
}

pub(crate) const PROPERTY_COLUMNS: &str = "id, title, description, property_type, purpose, \
    price, address, neighborhood, bedrooms, bathrooms, area, contact_name, contact_email, \
    contact_phone, active, featured, created_at, updated_at";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProperty {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub property_type: String,
    pub purpose: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,
    #[validate(range(min = 0.0))]
    pub area: Option<f64>,
    pub contact_name: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// Defaults to `true`.
    pub active: Option<bool>,
}

impl CreateProperty {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        validate_not_blank("title", &self.title)?;
        validate_not_blank("property_type", &self.property_type)?;
        validate_purpose(&self.purpose)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProperty {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, max = 50))]
    pub property_type: Option<String>,
    pub purpose: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub neighborhood: Option<Option<String>>,
    #[validate(range(min = 0))]
    #[serde(default, deserialize_with = "super::nullable")]
    pub bedrooms: Option<Option<i32>>,
    #[validate(range(min = 0))]
    #[serde(default, deserialize_with = "super::nullable")]
    pub bathrooms: Option<Option<i32>>,
    #[validate(range(min = 0.0))]
    #[serde(default, deserialize_with = "super::nullable")]
    pub area: Option<Option<f64>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub contact_name: Option<Option<String>>,
    #[validate(email)]
    #[serde(default, deserialize_with = "super::nullable")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub contact_phone: Option<Option<String>>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
}

impl UpdateProperty {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            validate_not_blank("title", title)?;
        }
        if let Some(property_type) = &self.property_type {
            validate_not_blank("property_type", property_type)?;
        }
        if let Some(purpose) = &self.purpose {
            validate_purpose(purpose)?;
        }
        Ok(())
    }
}
