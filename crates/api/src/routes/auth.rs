//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login/google   -> login_google
/// POST /login/admin    -> login_admin
/// POST /logout         -> logout
/// GET  /me             -> me (requires auth)
/// GET  /check-admin    -> check_admin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login/google", post(auth::login_google))
        .route("/login/admin", post(auth::login_admin))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/check-admin", get(auth::check_admin))
}
