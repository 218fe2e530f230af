//! Handlers for the `/news` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cityguide_core::catalog::{FEATURED_NEWS_LIMIT, URGENT_NEWS_LIMIT};
use cityguide_core::moderation::ModeratedEntity;
use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use cityguide_db::models::news::{CreateNews, News, UpdateNews};
use cityguide_db::repositories::NewsRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::middleware::auth::Identity;
use crate::middleware::rbac::RequireAdmin;
use crate::query::NewsListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/news
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    AppQuery(params): AppQuery<NewsListParams>,
) -> AppResult<Json<DataResponse<Page<News>>>> {
    let visibility_only = identity.visibility_only(params.published_only);
    let page = NewsRepo::list(&state.pool, &params.into_query(visibility_only)).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/news/{id}
///
/// Counts as a view.
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<News>>> {
    let article = NewsRepo::record_view(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("News", id))?;
    Ok(Json(DataResponse { data: article }))
}

/// GET /api/v1/news/featured
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<News>>>> {
    let items = NewsRepo::list_featured(&state.pool, FEATURED_NEWS_LIMIT).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/news/urgent
pub async fn urgent(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<News>>>> {
    let items = NewsRepo::list_urgent(&state.pool, URGENT_NEWS_LIMIT).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/news
///
/// Admin-only. Published unless the body says otherwise.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateNews>,
) -> AppResult<(StatusCode, Json<DataResponse<News>>)> {
    input.check_rules()?;
    let published = ModeratedEntity::News.initial_visibility(input.published);
    let article = NewsRepo::create(&state.pool, &input, published).await?;
    tracing::info!(news_id = article.id, user_id = admin.user.id, "News article created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /api/v1/news/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateNews>,
) -> AppResult<Json<DataResponse<News>>> {
    input.check_rules()?;
    let article = NewsRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("News", id))?;
    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/news/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("News", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
