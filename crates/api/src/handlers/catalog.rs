//! Fixed enumerations served verbatim to clients.

use axum::Json;
use cityguide_core::catalog::{
    COMPANY_PLANS, CONTRACT_TYPES, JOB_CATEGORIES, NEIGHBORHOODS, NEWS_CATEGORIES, PROPERTY_TYPES,
};

use crate::response::DataResponse;

type Enumeration = Json<DataResponse<&'static [&'static str]>>;

fn serve(values: &'static [&'static str]) -> Enumeration {
    Json(DataResponse { data: values })
}

/// GET /api/v1/jobs/categories
pub async fn job_categories() -> Enumeration {
    serve(JOB_CATEGORIES)
}

/// GET /api/v1/jobs/contract-types
pub async fn contract_types() -> Enumeration {
    serve(CONTRACT_TYPES)
}

/// GET /api/v1/news/categories
pub async fn news_categories() -> Enumeration {
    serve(NEWS_CATEGORIES)
}

/// GET /api/v1/properties/types
pub async fn property_types() -> Enumeration {
    serve(PROPERTY_TYPES)
}

/// GET /api/v1/properties/neighborhoods
pub async fn neighborhoods() -> Enumeration {
    serve(NEIGHBORHOODS)
}

/// GET /api/v1/companies/plans
pub async fn company_plans() -> Enumeration {
    serve(COMPANY_PLANS)
}
