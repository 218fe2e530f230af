//! Photo rows owned by companies and properties.
//!
//! Both photo tables share one shape; [`PhotoParent`] selects the table and
//! its foreign-key column.

use cityguide_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Which entity a photo belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoParent {
    Company,
    Property,
}

impl PhotoParent {
    pub fn table(self) -> &'static str {
        match self {
            PhotoParent::Company => "company_photos",
            PhotoParent::Property => "property_photos",
        }
    }

    pub fn fk_column(self) -> &'static str {
        match self {
            PhotoParent::Company => "company_id",
            PhotoParent::Property => "property_id",
        }
    }

    pub fn parent_table(self) -> &'static str {
        match self {
            PhotoParent::Company => "companies",
            PhotoParent::Property => "properties",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity(self) -> &'static str {
        match self {
            PhotoParent::Company => "Company",
            PhotoParent::Property => "Property",
        }
    }
}

/// A photo row. `parent_id` is the owning company or property.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub parent_id: DbId,
    pub filename: String,
    pub original_name: Option<String>,
    pub is_main: bool,
    pub created_at: Timestamp,
}

/// Metadata for a photo whose file has already been written.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub filename: String,
    pub original_name: Option<String>,
}
