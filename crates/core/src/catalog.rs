//! Fixed enumerations served verbatim to clients, plus the validators
//! that enforce the closed ones on writes.
//!
//! Categories are free-form on write (the lists are suggestions for the UI);
//! company plans and property purposes are closed sets.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

pub const JOB_CATEGORIES: &[&str] = &[
    "administracao",
    "vendas",
    "producao",
    "servicos",
    "saude",
    "educacao",
    "tecnologia",
    "construcao",
    "alimentacao",
    "turismo",
];

pub const CONTRACT_TYPES: &[&str] = &["CLT", "PJ", "Temporario", "Estagio", "Freelancer"];

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

pub const NEWS_CATEGORIES: &[&str] = &[
    "prefeitura",
    "eventos",
    "obras",
    "saude",
    "educacao",
    "turismo",
    "economia",
    "cultura",
    "esportes",
    "meio-ambiente",
];

/// How many featured articles `/news/featured` returns.
pub const FEATURED_NEWS_LIMIT: i64 = 5;

/// How many urgent articles `/news/urgent` returns.
pub const URGENT_NEWS_LIMIT: i64 = 3;

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

pub const PROPERTY_TYPES: &[&str] = &[
    "casa",
    "apartamento",
    "terreno",
    "comercial",
    "chacara",
    "sitio",
];

pub const PURPOSE_SALE: &str = "venda";
pub const PURPOSE_RENT: &str = "locacao";
pub const PROPERTY_PURPOSES: &[&str] = &[PURPOSE_SALE, PURPOSE_RENT];

pub const NEIGHBORHOODS: &[&str] = &[
    "Centro",
    "Jacaré",
    "Vilarejo",
    "Pinhal",
    "Bananal",
    "São Francisco",
    "Jundiuvira",
    "Bonfim",
    "Caí",
    "Piraí",
    "Guaxatuba",
    "Campininha",
    "Itaguá",
    "Barrinha",
];

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

pub const DEFAULT_PLAN: &str = "basico";
pub const COMPANY_PLANS: &[&str] = &[
    DEFAULT_PLAN,
    "simples",
    "intermediario",
    "avancado",
    "master_plus",
];

/// Lowest and highest star rating a review may carry.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

fn validate_member(kind: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {kind} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

pub fn validate_plan(plan: &str) -> Result<(), CoreError> {
    validate_member("plan", plan, COMPANY_PLANS)
}

pub fn validate_purpose(purpose: &str) -> Result<(), CoreError> {
    validate_member("purpose", purpose, PROPERTY_PURPOSES)
}

/// Reject a present-but-blank value for a field that must carry text.
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn known_plans_pass() {
        for plan in COMPANY_PLANS {
            assert!(validate_plan(plan).is_ok());
        }
    }

    #[test]
    fn unknown_plan_fails() {
        assert_matches!(validate_plan("gold"), Err(CoreError::Validation(msg)) if msg.contains("gold"));
    }

    #[test]
    fn purposes() {
        assert!(validate_purpose(PURPOSE_SALE).is_ok());
        assert!(validate_purpose(PURPOSE_RENT).is_ok());
        assert!(validate_purpose("permuta").is_err());
    }

    #[test]
    fn blank_values_fail() {
        assert!(validate_not_blank("name", "   ").is_err());
        assert!(validate_not_blank("name", "Padaria Sol").is_ok());
    }

    #[test]
    fn default_plan_is_listed_first() {
        assert_eq!(COMPANY_PLANS[0], DEFAULT_PLAN);
    }
}
