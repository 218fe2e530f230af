//! Row models and request DTOs, one module per table.

use serde::{Deserialize, Deserializer};

pub mod company;
pub mod dashboard;
pub mod job;
pub mod news;
pub mod photo;
pub mod property;
pub mod review;
pub mod session;
pub mod settings;
pub mod user;

/// Deserializer for clearable update fields: a missing field stays `None`
/// (with `#[serde(default)]`) while an explicit `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// `(provided, value)` bind pair for a clearable column, used with
/// `col = CASE WHEN $n THEN $n+1 ELSE col END`.
pub(crate) fn clearable<T: Clone>(field: &Option<Option<T>>) -> (bool, Option<T>) {
    (field.is_some(), field.clone().flatten())
}
