use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Payload of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency below is usable, `degraded` otherwise.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the photo upload directory exists and is a directory.
    pub uploads_ready: bool,
}

/// GET /health
///
/// Reports database reachability and whether photos can be stored. Always
/// answers 200 so load balancers can read the body.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = cityguide_db::health_check(&state.pool).await.is_ok();
    let uploads_ready = tokio::fs::metadata(state.photos.root())
        .await
        .is_ok_and(|meta| meta.is_dir());

    if !uploads_ready {
        tracing::warn!(dir = %state.photos.root().display(), "Upload directory unavailable");
    }

    Json(HealthResponse {
        status: if db_healthy && uploads_ready { "ok" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
