//! Handlers for the `/auth` resource (logins, logout, identity checks).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use cityguide_core::error::CoreError;
use cityguide_db::models::user::{NewUser, User};
use cityguide_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::session::{
    clear_session_cookie, hash_session_token, session_cookie, start_session, token_from_headers,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, Identity};
use crate::response::DataResponse;
use crate::state::AppState;

/// Display name given to the bootstrap admin account on first login.
const ADMIN_DISPLAY_NAME: &str = "Administrador";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login/google`.
#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub token: Option<String>,
}

/// Request body for `POST /auth/login/admin`.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both login routes.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
    pub redirect_url: &'static str,
    /// Session token, also set as the `session` cookie.
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct CheckAdminResponse {
    pub authenticated: bool,
    pub is_admin: bool,
    pub user: Option<User>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Open a session for `user` and build the login response with its cookie.
async fn login_response(state: &AppState, user: User) -> AppResult<impl IntoResponse> {
    let days = state.config.session_expiry_days;
    let token = start_session(&state.pool, user.id, days).await?;
    let redirect_url = if user.is_admin { "/admin" } else { "/dashboard" };

    tracing::info!(user_id = user.id, is_admin = user.is_admin, "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token, days))]),
        Json(DataResponse {
            data: LoginResponse {
                success: true,
                user,
                redirect_url,
                token,
            },
        }),
    ))
}

/// POST /api/v1/auth/login/google
///
/// Exchange a Google ID token for a session. First-time users are created
/// without admin rights.
pub async fn login_google(
    State(state): State<AppState>,
    AppJson(input): AppJson<GoogleLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let id_token = input
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Token not provided".into()))?;

    let identity = state.verifier.verify(&id_token).await?;
    let user = UserRepo::find_or_create(
        &state.pool,
        &NewUser {
            email: identity.email,
            name: identity.name,
            is_admin: false,
        },
    )
    .await?;

    login_response(&state, user).await
}

/// POST /api/v1/auth/login/admin
///
/// Bootstrap login with the configured admin credentials.
pub async fn login_admin(
    State(state): State<AppState>,
    AppJson(input): AppJson<AdminLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));
    let admin = &state.config.admin;

    if input.email != admin.email {
        return Err(invalid());
    }
    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(email = %input.email, "Rejected admin login");
        return Err(invalid());
    }

    let user = UserRepo::find_or_create(
        &state.pool,
        &NewUser {
            email: admin.email.clone(),
            name: ADMIN_DISPLAY_NAME.into(),
            is_admin: true,
        },
    )
    .await?;

    login_response(&state, user).await
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented session, if any, and clear the cookie. Always 200.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    if let Some(token) = token_from_headers(&headers) {
        let revoked = SessionRepo::revoke(&state.pool, &hash_session_token(&token)).await?;
        tracing::debug!(revoked, "Logout");
    }

    Ok((
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(DataResponse {
            data: LogoutResponse { success: true },
        }),
    ))
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser) -> Json<DataResponse<MeResponse>> {
    Json(DataResponse {
        data: MeResponse { user: auth.user },
    })
}

/// GET /api/v1/auth/check-admin
///
/// Never fails; anonymous callers get `authenticated: false`.
pub async fn check_admin(identity: Identity) -> Json<DataResponse<CheckAdminResponse>> {
    let is_admin = identity.is_admin();
    let user = match identity {
        Identity::Anonymous => None,
        Identity::User(user) => Some(user),
    };
    Json(DataResponse {
        data: CheckAdminResponse {
            authenticated: user.is_some(),
            is_admin,
            user,
        },
    })
}
