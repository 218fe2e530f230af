pub mod admin;
pub mod auth;
pub mod companies;
pub mod health;
pub mod jobs;
pub mod news;
pub mod photos;
pub mod properties;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login/google                       Google ID-token login (public)
/// /auth/login/admin                        admin bootstrap login (public)
/// /auth/logout                             revoke session
/// /auth/me                                 current user (requires auth)
/// /auth/check-admin                        identity check
///
/// /companies                               list, create (public)
/// /companies/plans                         plan catalog
/// /companies/{id}                          get, update, delete
/// /companies/{id}/photos                   upload (multipart)
/// /companies/{id}/photos/{photo_id}        delete (admin)
/// /companies/{id}/reviews                  list approved, submit
///
/// /jobs                                    list, create (public)
/// /jobs/categories, /jobs/contract-types   catalogs
/// /jobs/{id}                               get, update, delete
///
/// /properties                              list, create (public)
/// /properties/types, /properties/neighborhoods
/// /properties/{id}                         get, update, delete
/// /properties/{id}/photos                  upload (multipart)
/// /properties/{id}/photos/{photo_id}       delete (admin)
///
/// /news                                    list, create (admin)
/// /news/featured, /news/urgent             promoted articles
/// /news/categories                         catalog
/// /news/{id}                               get (counts a view), update, delete
///
/// /photos/{filename}                       stored JPEG bytes
///
/// /admin/dashboard/stats                   aggregate counters
/// /admin/companies/pending                 moderation queue
/// /admin/companies/{id}/approve|reject|feature
/// /admin/reviews/pending                   moderation queue
/// /admin/reviews/{id}/approve|reject
/// /admin/settings                          get, update
/// /admin/users                             list
/// /admin/users/{id}/toggle-admin           flip admin flag
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/companies", companies::router())
        .nest("/jobs", jobs::router())
        .nest("/properties", properties::router())
        .nest("/news", news::router())
        .nest("/photos", photos::router())
        .nest("/admin", admin::router())
}
