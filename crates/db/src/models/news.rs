//! News article model and DTOs.

use cityguide_core::catalog::validate_not_blank;
use cityguide_core::error::CoreError;
use cityguide_core::moderation::VisibilityFlag;
use cityguide_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::listing::Listable;

/// A row from the `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub featured: bool,
    pub urgent: bool,
    pub published: bool,
    pub views: i32,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Listable for News {
    const TABLE: &'static str = "news";
    const COLUMNS: &'static str = NEWS_COLUMNS;
    const VISIBILITY: VisibilityFlag = VisibilityFlag::Published;
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "content"];
    const HAS_FEATURED: bool = true;
}

pub(crate) const NEWS_COLUMNS: &str = "id, title, content, category, author, featured, urgent, \
    published, views, image_url, created_at, updated_at";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNews {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(min = 1, max = 200))]
    pub author: String,
    pub featured: Option<bool>,
    pub urgent: Option<bool>,
    /// Defaults to `true`.
    pub published: Option<bool>,
    pub image_url: Option<String>,
}

impl CreateNews {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        validate_not_blank("title", &self.title)?;
        validate_not_blank("content", &self.content)?;
        validate_not_blank("category", &self.category)?;
        validate_not_blank("author", &self.author)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNews {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub author: Option<String>,
    pub featured: Option<bool>,
    pub urgent: Option<bool>,
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub image_url: Option<Option<String>>,
}

impl UpdateNews {
    pub fn check_rules(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("title", &self.title),
            ("content", &self.content),
            ("category", &self.category),
            ("author", &self.author),
        ] {
            if let Some(value) = value {
                validate_not_blank(field, value)?;
            }
        }
        Ok(())
    }
}
