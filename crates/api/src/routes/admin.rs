//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require an admin session (enforced by handler extractors).
///
/// ```text
/// GET    /dashboard/stats              -> dashboard_stats
/// GET    /companies/pending            -> pending_companies
/// PUT    /companies/{id}/approve       -> approve_company
/// PUT    /companies/{id}/reject        -> reject_company
/// PUT    /companies/{id}/feature       -> feature_company
/// GET    /reviews/pending              -> pending_reviews
/// PUT    /reviews/{id}/approve         -> approve_review
/// DELETE /reviews/{id}/reject          -> reject_review
/// GET    /settings                     -> get_settings
/// PUT    /settings                     -> update_settings
/// GET    /users                        -> list_users
/// PUT    /users/{id}/toggle-admin      -> toggle_admin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(admin::dashboard_stats))
        .route("/companies/pending", get(admin::pending_companies))
        .route("/companies/{id}/approve", put(admin::approve_company))
        .route("/companies/{id}/reject", put(admin::reject_company))
        .route("/companies/{id}/feature", put(admin::feature_company))
        .route("/reviews/pending", get(admin::pending_reviews))
        .route("/reviews/{id}/approve", put(admin::approve_review))
        .route("/reviews/{id}/reject", delete(admin::reject_review))
        .route(
            "/settings",
            get(admin::get_settings).put(admin::update_settings),
        )
        .route("/users", get(admin::list_users))
        .route("/users/{id}/toggle-admin", put(admin::toggle_admin))
}
