//! Handlers for the `/properties` resource and its photos.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use cityguide_core::moderation::ModeratedEntity;
use cityguide_core::pagination::Page;
use cityguide_core::types::DbId;
use cityguide_db::models::photo::PhotoParent;
use cityguide_db::models::property::{CreateProperty, Property, UpdateProperty};
use cityguide_db::repositories::PropertyRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidJson};
use crate::handlers::photos::{self, PhotoResponse};
use crate::middleware::auth::Identity;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PropertyListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A property with its photos.
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    #[serde(flatten)]
    pub property: Property,
    pub photos: Vec<PhotoResponse>,
}

async fn find_property(state: &AppState, id: DbId) -> AppResult<Property> {
    PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Property", id))
}

/// GET /api/v1/properties
pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
    AppQuery(params): AppQuery<PropertyListParams>,
) -> AppResult<Json<DataResponse<Page<PropertyResponse>>>> {
    let visibility_only = identity.visibility_only(params.active_only);
    let page = PropertyRepo::list(&state.pool, &params.into_query(visibility_only)).await?;

    let ids: Vec<DbId> = page.items.iter().map(|p| p.id).collect();
    let mut photos = photos::photos_by_parent(&state.pool, PhotoParent::Property, &ids).await?;
    let page = page.map(|property| PropertyResponse {
        photos: photos.remove(&property.id).unwrap_or_default(),
        property,
    });

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/properties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<PropertyResponse>>> {
    let property = find_property(&state, id).await?;
    let photos = photos::photos_of(&state.pool, PhotoParent::Property, id).await?;
    Ok(Json(DataResponse {
        data: PropertyResponse { property, photos },
    }))
}

/// POST /api/v1/properties
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateProperty>,
) -> AppResult<(StatusCode, Json<DataResponse<Property>>)> {
    input.check_rules()?;
    let active = ModeratedEntity::Property.initial_visibility(input.active);
    let property = PropertyRepo::create(&state.pool, &input, active).await?;
    tracing::info!(property_id = property.id, "Property listed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: property })))
}

/// PUT /api/v1/properties/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidJson(input): ValidJson<UpdateProperty>,
) -> AppResult<Json<DataResponse<Property>>> {
    input.check_rules()?;
    let property = PropertyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Property", id))?;
    Ok(Json(DataResponse { data: property }))
}

/// DELETE /api/v1/properties/{id}
///
/// Removes the property and its photo rows in one transaction, then the
/// photo files.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let filenames = PropertyRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Property", id))?;

    state.photos.remove_all_logged(&filenames).await;
    tracing::info!(property_id = id, photos = filenames.len(), "Property deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/properties/{id}/photos
pub async fn upload_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<PhotoResponse>>)> {
    find_property(&state, id).await?;
    let photo = photos::store_upload(&state, PhotoParent::Property, id, multipart).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PhotoResponse::from(photo),
        }),
    ))
}

/// DELETE /api/v1/properties/{id}/photos/{photo_id}
pub async fn delete_photo(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath((id, photo_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    photos::remove_photo(&state, PhotoParent::Property, id, photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
