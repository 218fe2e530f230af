//! Route definitions for the `/jobs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{catalog, jobs};
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /categories        -> catalog::job_categories
/// GET    /contract-types    -> catalog::contract_types
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update (admin)
/// DELETE /{id}              -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list).post(jobs::create))
        .route("/categories", get(catalog::job_categories))
        .route("/contract-types", get(catalog::contract_types))
        .route(
            "/{id}",
            get(jobs::get_by_id).put(jobs::update).delete(jobs::delete),
        )
}
