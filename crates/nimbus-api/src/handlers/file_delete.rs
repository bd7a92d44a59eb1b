//! File deletion handler

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Delete one asset by identifier.
///
/// The provider's receipt is returned verbatim with HTTP 200, including
/// `{"result": "not found"}`: a missing asset is a result value here, not
/// an HTTP failure. Only a failed provider call maps to 500.
#[utoipa::path(
    delete,
    path = "/api/cloudinary/file/{publicId}",
    tag = "files",
    params(
        ("publicId" = String, Path, description = "Asset identifier; folder separators may arrive percent-encoded")
    ),
    responses(
        (status = 200, description = "Provider destroy receipt, verbatim", body = serde_json::Value),
        (status = 500, description = "Provider destroy call failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_file", public_id = %public_id))]
pub async fn delete_file(
    Path(public_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let receipt = state.gateway.delete(&public_id).await?;

    tracing::debug!(result = %receipt.result, "Delete completed");
    Ok(Json(receipt))
}
