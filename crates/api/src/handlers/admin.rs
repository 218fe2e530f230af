//! Handlers for the `/admin` resource: dashboard, moderation queues,
//! site settings and user roles.
//!
//! All handlers require an admin session via [`RequireAdmin`].

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cityguide_core::settings::{parse_update, with_defaults};
use cityguide_core::types::DbId;
use cityguide_db::models::company::Company;
use cityguide_db::models::dashboard::DashboardStats;
use cityguide_db::models::review::{PendingReview, Review};
use cityguide_db::models::user::User;
use cityguide_db::repositories::{
    CompanyRepo, DashboardRepo, ReviewRepo, SettingsRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

type Settings = BTreeMap<String, Option<String>>;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard/stats
pub async fn dashboard_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Company moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/companies/pending
pub async fn pending_companies(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Company>>>> {
    let companies = CompanyRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: companies }))
}

async fn set_company_approval(
    state: &AppState,
    admin_id: DbId,
    id: DbId,
    approved: bool,
) -> AppResult<Company> {
    let company = CompanyRepo::set_approved(&state.pool, id, approved)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))?;
    tracing::info!(company_id = id, approved, admin_id, "Company moderated");
    Ok(company)
}

/// PUT /api/v1/admin/companies/{id}/approve
pub async fn approve_company(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    let company = set_company_approval(&state, admin.user.id, id, true).await?;
    Ok(Json(DataResponse { data: company }))
}

/// PUT /api/v1/admin/companies/{id}/reject
///
/// Hides the company again; the row is kept.
pub async fn reject_company(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    let company = set_company_approval(&state, admin.user.id, id, false).await?;
    Ok(Json(DataResponse { data: company }))
}

/// PUT /api/v1/admin/companies/{id}/feature
pub async fn feature_company(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    let company = CompanyRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))?;
    Ok(Json(DataResponse { data: company }))
}

// ---------------------------------------------------------------------------
// Review moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/reviews/pending
pub async fn pending_reviews(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PendingReview>>>> {
    let reviews = ReviewRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// PUT /api/v1/admin/reviews/{id}/approve
pub async fn approve_review(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Review>>> {
    let review = ReviewRepo::approve(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Review", id))?;
    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/admin/reviews/{id}/reject
pub async fn reject_review(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Review", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

async fn merged_settings(state: &AppState) -> AppResult<Settings> {
    Ok(with_defaults(SettingsRepo::list_pairs(&state.pool).await?))
}

/// GET /api/v1/admin/settings
pub async fn get_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Settings>>> {
    Ok(Json(DataResponse {
        data: merged_settings(&state).await?,
    }))
}

/// PUT /api/v1/admin/settings
///
/// Body is a flat JSON object of string (or null) values. The whole body is
/// checked before anything is written.
pub async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(body): AppJson<serde_json::Value>,
) -> AppResult<Json<DataResponse<Settings>>> {
    let pairs = parse_update(&body)?;
    SettingsRepo::upsert_many(&state.pool, &pairs).await?;
    tracing::info!(keys = pairs.len(), admin_id = admin.user.id, "Site settings updated");
    Ok(Json(DataResponse {
        data: merged_settings(&state).await?,
    }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// PUT /api/v1/admin/users/{id}/toggle-admin
pub async fn toggle_admin(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::toggle_admin(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    tracing::info!(
        user_id = id,
        is_admin = user.is_admin,
        admin_id = admin.user.id,
        "User role toggled",
    );
    Ok(Json(DataResponse { data: user }))
}
