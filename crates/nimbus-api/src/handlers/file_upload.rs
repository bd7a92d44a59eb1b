//! File upload handler

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

use nimbus_core::models::Asset;

use crate::error::{ErrorResponse, HttpAppError};
use crate::extract::extract_file_field;
use crate::state::AppState;

/// Upload one file to the media provider.
///
/// The whole field is read before the provider call; the body-limit layer
/// caps how much that can be.
#[utoipa::path(
    post,
    path = "/api/cloudinary/upload",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Provider descriptor for the stored file", body = Asset),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 413, description = "File exceeds the configured size cap", body = ErrorResponse),
        (status = 500, description = "Provider rejected the upload", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let file = extract_file_field(multipart).await.map_err(HttpAppError::from)?;

    tracing::debug!(
        filename = %file.filename,
        content_type = %file.content_type,
        size_bytes = file.data.len(),
        "Received upload"
    );

    let asset = state
        .gateway
        .store(None, &file.filename, &file.content_type, file.data)
        .await?;

    Ok(Json(asset))
}
