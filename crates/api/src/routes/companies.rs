//! Route definitions for the `/companies` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{catalog, companies};
use crate::state::AppState;

/// Routes mounted at `/companies`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /plans                     -> catalog::company_plans
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update (admin)
/// DELETE /{id}                      -> delete (admin)
/// POST   /{id}/photos               -> upload_photo
/// DELETE /{id}/photos/{photo_id}    -> delete_photo (admin)
/// GET    /{id}/reviews              -> list_reviews
/// POST   /{id}/reviews              -> create_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(companies::list).post(companies::create))
        .route("/plans", get(catalog::company_plans))
        .route(
            "/{id}",
            get(companies::get_by_id)
                .put(companies::update)
                .delete(companies::delete),
        )
        .route("/{id}/photos", axum::routing::post(companies::upload_photo))
        .route("/{id}/photos/{photo_id}", delete(companies::delete_photo))
        .route(
            "/{id}/reviews",
            get(companies::list_reviews).post(companies::create_review),
        )
}
