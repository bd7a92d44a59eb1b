//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use nimbus_core::models;

/// Returns the OpenAPI spec.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nimbus API",
        version = "0.1.0",
        description = "HTTP proxy for Cloudinary media operations: upload, folder listing, single-asset lookup, and deletion with image/video fallback, plus an ephemeral in-memory video registry. All endpoints live under /api/cloudinary/."
    ),
    paths(
        // Files
        handlers::file_upload::upload_file,
        handlers::file_get::list_files,
        handlers::file_get::get_file,
        handlers::file_delete::delete_file,
        // Videos
        handlers::videos::register_video,
        handlers::videos::list_videos,
        handlers::videos::delete_video,
    ),
    components(schemas(
        models::Asset,
        models::VideoRecord,
        handlers::videos::CreateVideoRequest,
        handlers::videos::DeletedResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "files", description = "Provider-backed file operations"),
        (name = "videos", description = "Ephemeral video metadata registry")
    )
)]
pub struct ApiDoc;
