//! Route definitions for the `/news` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{catalog, news};
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (admin)
/// GET    /featured      -> featured
/// GET    /urgent        -> urgent
/// GET    /categories    -> catalog::news_categories
/// GET    /{id}          -> get_by_id (counts a view)
/// PUT    /{id}          -> update (admin)
/// DELETE /{id}          -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list).post(news::create))
        .route("/featured", get(news::featured))
        .route("/urgent", get(news::urgent))
        .route("/categories", get(catalog::news_categories))
        .route(
            "/{id}",
            get(news::get_by_id).put(news::update).delete(news::delete),
        )
}
