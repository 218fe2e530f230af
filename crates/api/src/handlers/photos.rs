//! Photo upload, deletion and serving, shared by companies and properties.
//!
//! Upload order: validate the name, transcode off the async runtime, write
//! the file, then insert the row. If the insert fails the file is removed
//! again, so a row never points at a missing file and a failed upload never
//! leaves a file behind.

use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use cityguide_core::error::CoreError;
use cityguide_core::photo::{is_safe_filename, storage_filename, transcode_to_jpeg, validate_upload_name};
use cityguide_core::types::DbId;
use cityguide_db::models::photo::{NewPhoto, Photo, PhotoParent};
use cityguide_db::repositories::PhotoRepo;
use cityguide_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::state::AppState;

/// Multipart field that carries the image.
const FILE_FIELD: &str = "file";

/// A photo row plus the URL it is served from.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    #[serde(flatten)]
    pub photo: Photo,
    pub url: String,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        let url = format!("/api/v1/photos/{}", photo.filename);
        Self { photo, url }
    }
}

/// Photos for many parents, keyed by parent id.
pub async fn photos_by_parent(
    pool: &DbPool,
    parent: PhotoParent,
    parent_ids: &[DbId],
) -> Result<HashMap<DbId, Vec<PhotoResponse>>, sqlx::Error> {
    let mut grouped: HashMap<DbId, Vec<PhotoResponse>> = HashMap::new();
    for photo in PhotoRepo::list_for_parents(pool, parent, parent_ids).await? {
        grouped
            .entry(photo.parent_id)
            .or_default()
            .push(PhotoResponse::from(photo));
    }
    Ok(grouped)
}

pub async fn photos_of(
    pool: &DbPool,
    parent: PhotoParent,
    parent_id: DbId,
) -> Result<Vec<PhotoResponse>, sqlx::Error> {
    Ok(PhotoRepo::list_for_parent(pool, parent, parent_id)
        .await?
        .into_iter()
        .map(PhotoResponse::from)
        .collect())
}

/// Pull the `file` field out of a multipart body as `(original_name, bytes)`.
async fn read_file_field(mut multipart: Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok((original_name, data.to_vec()));
    }
    Err(AppError::Core(CoreError::Validation("No file provided".into())))
}

/// Run the full upload pipeline for a parent that the caller has already
/// confirmed exists.
pub async fn store_upload(
    state: &AppState,
    parent: PhotoParent,
    parent_id: DbId,
    multipart: Multipart,
) -> AppResult<Photo> {
    let (original_name, data) = read_file_field(multipart).await?;
    let ext = validate_upload_name(&original_name)?;

    let jpeg = tokio::task::spawn_blocking(move || transcode_to_jpeg(&data))
        .await
        .map_err(|e| AppError::InternalError(format!("Image task failed: {e}")))??;

    let filename = storage_filename(&ext);
    state
        .photos
        .save(&filename, &jpeg)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store photo: {e}")))?;

    let input = NewPhoto {
        filename: filename.clone(),
        original_name: Some(original_name),
    };
    let created = PhotoRepo::create(&state.pool, parent, parent_id, &input).await;

    match created {
        Ok(Some(photo)) => {
            tracing::info!(
                parent = parent.entity(),
                parent_id,
                photo_id = photo.id,
                filename = %photo.filename,
                is_main = photo.is_main,
                "Photo uploaded",
            );
            Ok(photo)
        }
        Ok(None) => {
            state.photos.remove_all_logged(&[filename]).await;
            Err(AppError::not_found(parent.entity(), parent_id))
        }
        Err(e) => {
            state.photos.remove_all_logged(&[filename]).await;
            Err(e.into())
        }
    }
}

/// Delete one photo row of a parent and then its file.
pub async fn remove_photo(
    state: &AppState,
    parent: PhotoParent,
    parent_id: DbId,
    photo_id: DbId,
) -> AppResult<()> {
    let photo = PhotoRepo::delete(&state.pool, parent, parent_id, photo_id)
        .await?
        .ok_or_else(|| AppError::not_found("Photo", photo_id))?;

    state.photos.remove_all_logged(&[photo.filename]).await;
    tracing::info!(parent = parent.entity(), parent_id, photo_id, "Photo deleted");
    Ok(())
}

/// GET /api/v1/photos/{filename}
///
/// Serve a stored photo. Names that could escape the upload directory, and
/// files no photo row references, are reported as not found.
pub async fn serve(
    State(state): State<AppState>,
    AppPath(filename): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let not_found = || {
        AppError::Core(CoreError::NotFoundByKey {
            entity: "Photo",
            key: filename.clone(),
        })
    };

    if !is_safe_filename(&filename) || !PhotoRepo::filename_exists(&state.pool, &filename).await? {
        return Err(not_found());
    }

    let bytes = state
        .photos
        .read(&filename)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read photo: {e}")))?
        .ok_or_else(not_found)?;

    Ok((
        [
            (CONTENT_TYPE, "image/jpeg"),
            (CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    ))
}
