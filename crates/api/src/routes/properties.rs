//! Route definitions for the `/properties` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{catalog, properties};
use crate::state::AppState;

/// Routes mounted at `/properties`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /types                     -> catalog::property_types
/// GET    /neighborhoods             -> catalog::neighborhoods
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update (admin)
/// DELETE /{id}                      -> delete (admin)
/// POST   /{id}/photos               -> upload_photo
/// DELETE /{id}/photos/{photo_id}    -> delete_photo (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(properties::list).post(properties::create))
        .route("/types", get(catalog::property_types))
        .route("/neighborhoods", get(catalog::neighborhoods))
        .route(
            "/{id}",
            get(properties::get_by_id)
                .put(properties::update)
                .delete(properties::delete),
        )
        .route("/{id}/photos", post(properties::upload_photo))
        .route("/{id}/photos/{photo_id}", delete(properties::delete_photo))
}
