use std::sync::Arc;

use crate::auth::google::IdentityVerifier;
use crate::config::ServerConfig;
use crate::storage::PhotoStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cityguide_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Uploaded photo files.
    pub photos: Arc<PhotoStore>,
    /// Verifier for third-party login tokens.
    pub verifier: Arc<dyn IdentityVerifier>,
}
