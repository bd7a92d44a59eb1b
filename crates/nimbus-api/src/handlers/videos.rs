//! Video registry handlers
//!
//! These routes track caller-supplied video metadata in process memory.
//! They never call the provider; deleting a registry entry does not touch
//! the stored asset.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use nimbus_core::models::VideoRecord;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Register metadata for an already-uploaded video.
#[utoipa::path(
    post,
    path = "/api/cloudinary/videos",
    tag = "videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video metadata registered", body = VideoRecord),
        (status = 400, description = "Missing url or publicId", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "register_video"))]
pub async fn register_video(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let url = request.url.unwrap_or_default();
    let public_id = request.public_id.unwrap_or_default();

    let record = state
        .videos
        .register(&url, &public_id, request.duration)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// List every registered video, in registration order.
#[utoipa::path(
    get,
    path = "/api/cloudinary/videos",
    tag = "videos",
    responses(
        (status = 200, description = "All registered videos", body = Vec<VideoRecord>)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_videos"))]
pub async fn list_videos(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.videos.list_all().await)
}

/// Remove every registry record matching `publicId`.
///
/// Reports success whether or not anything matched, so retries and
/// already-gone entries look the same to callers.
#[utoipa::path(
    delete,
    path = "/api/cloudinary/videos/{publicId}",
    tag = "videos",
    params(
        ("publicId" = String, Path, description = "Registered public identifier")
    ),
    responses(
        (status = 200, description = "Matching records removed, possibly zero", body = DeletedResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_video", public_id = %public_id))]
pub async fn delete_video(
    Path(public_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let removed = state.videos.delete_by_public_id(&public_id).await;

    tracing::debug!(removed, "Video records removed");
    Json(DeletedResponse { deleted: true })
}
