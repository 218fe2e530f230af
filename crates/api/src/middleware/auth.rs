//! Session-based identity extractors for Axum handlers.
//!
//! Every extraction re-reads the session and the user row, so a revoked
//! session or a revoked admin flag takes effect on the very next request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cityguide_core::error::CoreError;
use cityguide_db::models::session::UserSession;
use cityguide_db::models::user::User;
use cityguide_db::repositories::{SessionRepo, UserRepo};

use crate::auth::session::{hash_session_token, token_from_headers};
use crate::error::AppError;
use crate::state::AppState;

async fn active_session(parts: &Parts, state: &AppState) -> Result<Option<UserSession>, AppError> {
    let Some(token) = token_from_headers(&parts.headers) else {
        return Ok(None);
    };
    Ok(SessionRepo::find_active(&state.pool, &hash_session_token(&token)).await?)
}

/// Who is calling. Unknown, expired or revoked tokens are anonymous.
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    User(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::User(user) => Some(user),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|u| u.is_admin)
    }

    /// Whether a listing must hide records whose visibility flag is off.
    ///
    /// Only admins may ask to see hidden records; everyone else always gets
    /// the gated view.
    pub fn visibility_only(&self, requested: Option<bool>) -> bool {
        if self.is_admin() {
            requested.unwrap_or(true)
        } else {
            true
        }
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(session) = active_session(parts, state).await? else {
            return Ok(Identity::Anonymous);
        };
        Ok(match UserRepo::find_by_id(&state.pool, session.user_id).await? {
            Some(user) => Identity::User(user),
            None => Identity::Anonymous,
        })
    }
}

/// Authenticated user extracted from a live session.
///
/// Rejects with 401 when there is no live session or the session's user no
/// longer exists.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = active_session(parts, state).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Not authenticated".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, session.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not authenticated".into())))?;

        Ok(AuthUser { user })
    }
}
