//! Handlers for the `/jobs` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cityguide_core::moderation::ModeratedEntity;
use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use cityguide_db::models::job::{CreateJob, Job, UpdateJob};
use cityguide_db::repositories::JobRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::middleware::auth::Identity;
use crate::middleware::rbac::RequireAdmin;
use crate::query::JobListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/jobs
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    AppQuery(params): AppQuery<JobListParams>,
) -> AppResult<Json<DataResponse<Page<Job>>>> {
    let visibility_only = identity.visibility_only(params.active_only);
    let page = JobRepo::list(&state.pool, &params.into_query(visibility_only)).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/jobs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Job", id))?;
    Ok(Json(DataResponse { data: job }))
}

/// POST /api/v1/jobs
///
/// Public. The posting is active unless the body says otherwise.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateJob>,
) -> AppResult<(StatusCode, Json<DataResponse<Job>>)> {
    input.check_rules()?;
    let active = ModeratedEntity::Job.initial_visibility(input.active);
    let job = JobRepo::create(&state.pool, &input, active).await?;
    tracing::info!(job_id = job.id, "Job posted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// PUT /api/v1/jobs/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateJob>,
) -> AppResult<Json<DataResponse<Job>>> {
    input.check_rules()?;
    let job = JobRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Job", id))?;
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/jobs/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !JobRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Job", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
