//! Handlers for the `/companies` resource, its photos and its reviews.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use cityguide_db::models::company::{Company, CreateCompany, UpdateCompany};
use cityguide_db::models::photo::PhotoParent;
use cityguide_db::models::review::{CreateReview, Review};
use cityguide_db::repositories::{CompanyRepo, ReviewRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::handlers::photos::{self, PhotoResponse};
use crate::middleware::auth::Identity;
use crate::middleware::rbac::RequireAdmin;
use crate::query::CompanyListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A company with its photos.
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    #[serde(flatten)]
    pub company: Company,
    pub photos: Vec<PhotoResponse>,
}

async fn find_company(state: &AppState, id: DbId) -> AppResult<Company> {
    CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))
}

async fn with_photos(state: &AppState, company: Company) -> AppResult<CompanyResponse> {
    let photos = photos::photos_of(&state.pool, PhotoParent::Company, company.id).await?;
    Ok(CompanyResponse { company, photos })
}

/// GET /api/v1/companies
///
/// Paginated listing. Anonymous and non-admin callers only ever see approved
/// companies; admins may pass `approved_only=false`.
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    AppQuery(params): AppQuery<CompanyListParams>,
) -> AppResult<Json<DataResponse<Page<CompanyResponse>>>> {
    let visibility_only = identity.visibility_only(params.approved_only);
    let page = CompanyRepo::list(&state.pool, &params.into_query(visibility_only)).await?;

    let ids: Vec<DbId> = page.items.iter().map(|c| c.id).collect();
    let mut photos = photos::photos_by_parent(&state.pool, PhotoParent::Company, &ids).await?;
    let page = page.map(|company| CompanyResponse {
        photos: photos.remove(&company.id).unwrap_or_default(),
        company,
    });

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<CompanyResponse>>> {
    let company = find_company(&state, id).await?;
    Ok(Json(DataResponse {
        data: with_photos(&state, company).await?,
    }))
}

/// POST /api/v1/companies
///
/// Public registration. The company is created unapproved.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateCompany>,
) -> AppResult<(StatusCode, Json<DataResponse<Company>>)> {
    input.check_rules()?;
    let company = CompanyRepo::create(&state.pool, &input).await?;
    tracing::info!(company_id = company.id, name = %company.name, "Company registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: company })))
}

/// PUT /api/v1/companies/{id}
///
/// Admin-only partial update.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateCompany>,
) -> AppResult<Json<DataResponse<Company>>> {
    input.check_rules()?;
    let company = CompanyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))?;
    Ok(Json(DataResponse { data: company }))
}

/// DELETE /api/v1/companies/{id}
///
/// Admin-only. Removes the company, its reviews, its photo rows and then
/// its photo files.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let filenames = CompanyRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))?;

    state.photos.remove_all_logged(&filenames).await;
    tracing::info!(company_id = id, photos = filenames.len(), "Company deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/companies/{id}/photos
///
/// Multipart upload with the image in the `file` field.
pub async fn upload_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<PhotoResponse>>)> {
    find_company(&state, id).await?;
    let photo = photos::store_upload(&state, PhotoParent::Company, id, multipart).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PhotoResponse::from(photo),
        }),
    ))
}

/// DELETE /api/v1/companies/{id}/photos/{photo_id}
pub async fn delete_photo(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath((id, photo_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    photos::remove_photo(&state, PhotoParent::Company, id, photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/companies/{id}/reviews
///
/// Approved reviews only, newest first.
pub async fn list_reviews(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    find_company(&state, id).await?;
    let reviews = ReviewRepo::list_approved_for_company(&state.pool, id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// POST /api/v1/companies/{id}/reviews
///
/// Public submission. The review waits for admin approval.
pub async fn create_review(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    input.check_rules()?;
    let review = ReviewRepo::create(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))?;
    tracing::info!(company_id = id, review_id = review.id, "Review submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}
