//! Multipart extraction for the upload route

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use nimbus_core::AppError;

/// One uploaded file: raw bytes plus client-supplied name and type.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

fn multipart_error(err: MultipartError, what: &str) -> AppError {
    // Body-limit trips surface through the multipart reader; keep their
    // status instead of collapsing them into a caller mistake.
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{what}: {err}"))
    } else {
        AppError::Validation(format!("{what}: {err}"))
    }
}

/// Extract the single `file` field from a multipart form.
///
/// Unknown fields are ignored. Exactly one field named `file` must be
/// present; zero or more than one is rejected.
pub async fn extract_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart form"))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();
        if field_name != "file" {
            continue;
        }

        if file.is_some() {
            return Err(AppError::Validation(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read file data"))?;

        file = Some(UploadedFile {
            data,
            filename,
            content_type,
        });
    }

    file.ok_or_else(|| AppError::Validation("No file provided".to_string()))
}
