//! Site settings: a string key/value map with defaults synthesized at read time.
//!
//! Defaults are never written to the store; they only fill gaps when the
//! settings are read back.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// Keys every settings read is guaranteed to contain.
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    ("site_title", "Eu Indico Cabreúva"),
    ("site_description", "Guia Completo da Cidade"),
    ("contact_phone", "(11) 4528-1000"),
    ("contact_email", "contato@euindicocabreuva.com.br"),
    ("hero_background_color", "#065f46"),
    ("primary_color", "#10b981"),
    ("secondary_color", "#059669"),
];

/// Merge stored rows over the default set. Stored values always win.
pub fn with_defaults(
    stored: impl IntoIterator<Item = (String, Option<String>)>,
) -> BTreeMap<String, Option<String>> {
    let mut merged: BTreeMap<String, Option<String>> = stored.into_iter().collect();
    for (key, value) in DEFAULT_SETTINGS {
        merged
            .entry((*key).to_string())
            .or_insert_with(|| Some((*value).to_string()));
    }
    merged
}

/// Validate a settings update body before anything is written.
///
/// The body must be a JSON object whose keys are non-empty and whose values
/// are strings or `null`.
pub fn parse_update(body: &serde_json::Value) -> Result<Vec<(String, Option<String>)>, CoreError> {
    let obj = body
        .as_object()
        .ok_or_else(|| CoreError::Validation("Settings must be a JSON object".into()))?;

    obj.iter()
        .map(|(key, value)| {
            if key.trim().is_empty() {
                return Err(CoreError::Validation("Setting keys must not be empty".into()));
            }
            match value {
                serde_json::Value::String(s) => Ok((key.clone(), Some(s.clone()))),
                serde_json::Value::Null => Ok((key.clone(), None)),
                _ => Err(CoreError::Validation(format!(
                    "Setting '{key}' must be a string or null"
                ))),
            }
        })
        .collect()
}
