//! Company review model and DTOs.

use cityguide_core::catalog::{validate_not_blank, MAX_RATING, MIN_RATING};
use cityguide_core::error::CoreError;
use cityguide_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub company_id: DbId,
    pub author_name: String,
    pub author_email: Option<String>,
    pub rating: i32,
    pub comment: Option<String>,
    pub approved: bool,
    pub created_at: Timestamp,
}

/// An unapproved review joined with its company's name for the moderation queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingReview {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub company_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    #[validate(length(min = 1, max = 200))]
    pub author_name: String,
    #[validate(email)]
    pub author_email: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub comment: Option<String>,
}

impl CreateReview {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        validate_not_blank("author_name", &self.author_name)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(CoreError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(())
    }
}
