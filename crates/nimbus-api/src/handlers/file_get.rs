//! File listing and lookup handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use nimbus_core::models::Asset;
use nimbus_core::AppError;
use nimbus_storage::StorageError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// List assets in the configured folder, newest first.
#[utoipa::path(
    get,
    path = "/api/cloudinary/files",
    tag = "files",
    responses(
        (status = 200, description = "One page of assets, newest first", body = Vec<Asset>),
        (status = 500, description = "Provider listing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_files"))]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let assets = state.gateway.list(None, None).await?;

    tracing::debug!(count = assets.len(), "Listed assets");
    Ok(Json(assets))
}

/// Fetch one asset by identifier.
///
/// The router has already percent-decoded the path segment, so an encoded
/// separator (`media%2Fsunset`) reaches the provider as `media/sunset`.
#[utoipa::path(
    get,
    path = "/api/cloudinary/file/{publicId}",
    tag = "files",
    params(
        ("publicId" = String, Path, description = "Asset identifier; folder separators may arrive percent-encoded")
    ),
    responses(
        (status = 200, description = "Provider descriptor for the asset", body = Asset),
        (status = 500, description = "Lookup failed, including unknown identifiers", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_file", public_id = %public_id))]
pub async fn get_file(
    Path(public_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let asset = state
        .gateway
        .fetch_one(&public_id)
        .await
        .map_err(|err| match err {
            // This route exposes no 404: an unknown identifier is a plain
            // fetch failure to callers.
            StorageError::NotFound(id) => {
                HttpAppError(AppError::Fetch(format!("no such asset: {id}")))
            }
            other => HttpAppError::from(other),
        })?;

    Ok(Json(asset))
}
