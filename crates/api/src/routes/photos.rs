//! Route definitions for the `/photos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// Routes mounted at `/photos`.
///
/// ```text
/// GET /{filename}   -> serve
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{filename}", get(photos::serve))
}
